//! Static file loading module
//!
//! Reads the file a resolution points at and infers its MIME type. This is
//! the only place that actually touches file contents; the resolver only ever
//! performs existence checks.

use crate::http::mime;
use crate::logger;
use crate::resolver::Resolution;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Load the file a resolution points at.
///
/// Returns the file contents and inferred content type, or `None` when the
/// file cannot be served. An absent file is a normal outcome here: the
/// resolver may hand us a fallback index document that was never provisioned,
/// and the caller turns `None` into a 404.
pub async fn load_resolved(resolution: &Resolution<'_>) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolution.base_dir.join(&resolution.relative_path);

    // The resolver already strips traversal segments; canonicalizing both
    // sides catches anything that still escapes (e.g. symlinks out of the root)
    let base_canonical = resolution.base_dir.canonicalize().ok()?;
    let file_canonical = file_path.canonicalize().ok()?;
    if !file_canonical.starts_with(&base_canonical) {
        logger::log_warning(&format!(
            "Path escape blocked: {} -> {}",
            resolution.relative_path,
            file_canonical.display()
        ));
        return None;
    }

    if !file_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = content_type_for(&file_canonical);
    Some((content, content_type))
}

fn content_type_for(path: &Path) -> &'static str {
    mime::get_content_type(path.extension().and_then(|e| e.to_str()))
}
