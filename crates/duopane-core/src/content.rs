//! Decoding file contents into editable text.

use std::path::Path;

use crate::FsError;

/// Number of bytes to inspect for binary detection.
pub const BINARY_CHECK_BYTES: usize = 1024;

/// Decode raw file contents into buffer text.
///
/// Content with a NUL byte near the start is treated as binary and replaced
/// by a placeholder. Anything else is decoded as UTF-8, with invalid
/// sequences replaced rather than rejected.
pub fn decode_text(path: &Path, bytes: &[u8]) -> String {
    let check_len = bytes.len().min(BINARY_CHECK_BYTES);
    if bytes[..check_len].contains(&0) {
        return format!(
            "[Binary file: {} ({} bytes), preview disabled]",
            path.display(),
            bytes.len()
        );
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Placeholder text shown when a file cannot be read.
pub fn read_placeholder(error: &FsError) -> String {
    format!("[Read error: {error}]")
}
