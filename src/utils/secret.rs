use std::fs;

use tracing::error;

/// Resolves a secret that may be given inline or through a file path.
///
/// The file wins when both are present, so container secrets mounted as files
/// override anything left in the environment.
pub fn resolve_secret(
    file_path: Option<String>,
    inline: Option<String>,
) -> Result<Option<String>, std::io::Error> {
    if let Some(secret_file_path) = file_path {
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                Err(e)
            }
        }
    } else {
        Ok(inline.filter(|value| !value.trim().is_empty()))
    }
}
