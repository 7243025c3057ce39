//! The decode collaborator.
//!
//! A [`Decoder`] turns a complete cached file into the caller's result
//! type. Closures of the right shape are decoders.

use std::path::Path;

use cidfetch_core::BoxError;

use crate::format::PayloadFormat;

/// Deserializes a cached file.
pub trait Decoder {
    /// The decoded value.
    type Output;
    /// The decoder's error type.
    type Error: Into<BoxError>;

    /// Decode the file at `path`, whose leading bytes identify it as `format`.
    fn decode(&self, path: &Path, format: PayloadFormat) -> Result<Self::Output, Self::Error>;
}

impl<F, T, E> Decoder for F
where
    F: Fn(&Path, PayloadFormat) -> Result<T, E>,
    E: Into<BoxError>,
{
    type Output = T;
    type Error = E;

    fn decode(&self, path: &Path, format: PayloadFormat) -> Result<T, E> {
        self(path, format)
    }
}
