//! Pre-read checks shared by all source formats.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Maximum source file size (64 MB default).
pub const MAX_SOURCE_FILE_SIZE: u64 = 64 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Check file size against the default limit.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_SOURCE_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Read a whole file as UTF-8 text, dropping a leading UTF-8 BOM.
///
/// UTF-16 files are rejected by their byte order mark.
pub fn read_utf8(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    check_utf16_bom(path, &bytes)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_string()),
        Err(err) => Err(IngestError::InvalidUtf8 {
            path: path.to_path_buf(),
            offset: err.valid_up_to(),
        }),
    }
}

fn check_utf16_bom(path: &Path, bytes: &[u8]) -> Result<()> {
    let encoding = match bytes.get(..2) {
        Some([0xFF, 0xFE]) => "UTF-16 LE",
        Some([0xFE, 0xFF]) => "UTF-16 BE",
        _ => return Ok(()),
    };
    Err(IngestError::UnsupportedEncoding {
        path: path.to_path_buf(),
        encoding,
    })
}

pub(crate) fn io_error(path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write temp file");
        file
    }

    #[test]
    fn utf16_bom_is_rejected() {
        let file = temp_file(&[0xFF, 0xFE, b'A', 0x00]);
        assert!(matches!(
            read_utf8(file.path()),
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let file = temp_file(b"\xEF\xBB\xBFB72AE6F13C\n");
        assert_eq!(read_utf8(file.path()).expect("read"), "B72AE6F13C\n");
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let file = temp_file(b"AB\xFFCD");
        assert!(matches!(
            read_utf8(file.path()),
            Err(IngestError::InvalidUtf8 { offset: 2, .. })
        ));
    }

    #[test]
    fn size_limit_is_enforced() {
        let file = temp_file(b"0123456789");
        assert!(check_file_size_with_limit(file.path(), 10).is_ok());
        assert!(matches!(
            check_file_size_with_limit(file.path(), 9),
            Err(IngestError::FileTooLarge {
                size: 10,
                max_size: 9,
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.csv");
        assert!(matches!(
            check_file_size(&path),
            Err(IngestError::FileNotFound { .. })
        ));
    }
}
