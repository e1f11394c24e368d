use std::path::Path;

/// Read a local manifest as UTF-8 text.
///
/// # Errors
///
/// Missing file, permission denied, a directory, or non-UTF-8 content.
pub fn read_local(path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
