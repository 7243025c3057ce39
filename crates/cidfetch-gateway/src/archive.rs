//! Archive envelope extraction.
//!
//! The gateway wraps the requested object in a tar stream. Only
//! regular-file entries are considered; directories, links and other
//! special entries are skipped.
//!
//! ## Selection Rule
//!
//! The payload is the FIRST regular-file entry in archive order. Entries
//! are read lazily, so anything after it is never parsed.

use std::io::{Cursor, Read};

use cidfetch_core::FetchError;

/// Extract the payload bytes from a tar envelope.
///
/// Returns [`FetchError::ArchiveFormat`] if the stream is malformed, holds
/// no regular-file entry, or ends before the selected entry's declared size.
pub fn extract_payload(envelope: &[u8]) -> Result<Vec<u8>, FetchError> {
    let mut archive = tar::Archive::new(Cursor::new(envelope));
    let entries = archive
        .entries()
        .map_err(|e| FetchError::ArchiveFormat(format!("cannot read envelope: {e}")))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| FetchError::ArchiveFormat(format!("corrupt envelope entry: {e}")))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "<unnamed>".to_string());
        // The declared size comes from the gateway; the envelope bounds it.
        let declared = entry.size();
        let reserve = declared.min(envelope.len() as u64);
        let mut buf = Vec::with_capacity(usize::try_from(reserve).unwrap_or(0));
        entry
            .read_to_end(&mut buf)
            .map_err(|e| FetchError::ArchiveFormat(format!("cannot read entry {name}: {e}")))?;
        if buf.len() as u64 != declared {
            return Err(FetchError::ArchiveFormat(format!(
                "truncated entry {name}: header declares {declared} bytes, envelope holds {}",
                buf.len()
            )));
        }
        tracing::debug!(entry = %name, bytes = buf.len(), "selected envelope entry");
        return Ok(buf);
    }

    Err(FetchError::ArchiveFormat(
        "envelope contains no regular file entry".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cidfetch_core::ErrorKind;

    fn file_header(path: &str, len: usize) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(len as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        header
    }

    fn dir_header(path: &str) -> tar::Header {
        let mut header = tar::Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        header
    }

    fn envelope(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (path, data) in entries {
            match data {
                Some(bytes) => {
                    let header = file_header(path, bytes.len());
                    builder.append(&header, *bytes).unwrap();
                }
                None => {
                    let header = dir_header(path);
                    builder.append(&header, std::io::empty()).unwrap();
                }
            }
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn single_file_entry_is_the_payload() {
        let env = envelope(&[("model.bin", Some(&b"\x00\x01"[..]))]);
        assert_eq!(extract_payload(&env).unwrap(), b"\x00\x01");
    }

    #[test]
    fn directories_are_skipped() {
        let env = envelope(&[("QmDir", None), ("QmDir/weights.pt", Some(&b"weights"[..]))]);
        assert_eq!(extract_payload(&env).unwrap(), b"weights");
    }

    #[test]
    fn first_file_entry_wins() {
        let env = envelope(&[("a.bin", Some(&b"first"[..])), ("b.bin", Some(&b"second"[..]))]);
        assert_eq!(extract_payload(&env).unwrap(), b"first");
    }

    #[test]
    fn empty_file_entry_is_a_valid_payload() {
        let env = envelope(&[("empty.bin", Some(&b""[..]))]);
        assert!(extract_payload(&env).unwrap().is_empty());
    }

    #[test]
    fn no_file_entry_is_archive_format_error() {
        let env = envelope(&[("QmDir", None)]);
        let err = extract_payload(&env).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveFormat);
    }

    #[test]
    fn empty_body_is_archive_format_error() {
        let err = extract_payload(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveFormat);
    }

    #[test]
    fn garbage_body_is_archive_format_error() {
        let garbage = vec![0x5au8; 1024];
        let err = extract_payload(&garbage).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveFormat);
    }

    /// Header for a regular file followed by fewer data bytes than declared.
    fn truncated_envelope(declared: u64, data: &[u8]) -> Vec<u8> {
        let mut header = tar::Header::new_gnu();
        header.set_path("model.bin").unwrap();
        header.set_size(declared);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        let mut env = header.as_bytes().to_vec();
        env.extend_from_slice(data);
        env
    }

    #[test]
    fn truncated_entry_is_archive_format_error() {
        let err = extract_payload(&truncated_envelope(100, &[7u8; 10])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveFormat);
        assert!(format!("{err}").contains("truncated entry"), "{err}");
    }

    #[test]
    fn oversized_declared_size_is_archive_format_error() {
        let err = extract_payload(&truncated_envelope(u64::MAX / 2, &[7u8; 10])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArchiveFormat);
    }
}
