//! Command utility types and helpers.

use std::path::Path;

/// Error indicating a flag value that clap accepted but the command cannot use.
///
/// The binary reports it with the same exit code as clap usage errors.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// Check if an error is a [`FlagError`].
pub fn is_flag_error(err: &anyhow::Error) -> bool {
    err.downcast_ref::<FlagError>().is_some()
}

/// Validate a `--repo-dir` style flag: the path must exist.
///
/// # Errors
///
/// Returns a [`FlagError`] naming the flag when the path does not exist.
pub fn existing_path<'a>(flag: &str, path: &'a Path) -> Result<&'a Path, FlagError> {
    if path.exists() {
        Ok(path)
    } else {
        Err(FlagError(format!(
            "invalid value for {flag}: {} does not exist",
            path.display()
        )))
    }
}
