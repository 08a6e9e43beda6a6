use std::path::Path;

/// Longest extension kept from an uploaded file name.
const MAX_EXTENSION_LENGTH: usize = 16;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Extension of an uploaded file name, lower-cased, without the dot.
///
/// Only the last path component is considered. Returns `None` when there is
/// no extension or it is not 1-16 ASCII alphanumeric characters, so the
/// result is always safe to put into a stored file name.
pub fn avatar_extension(original: &str) -> Option<String> {
    let name = original.rsplit(['/', '\\']).next()?.trim();
    let (stem, ext) = name.rsplit_once('.')?;

    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXTENSION_LENGTH {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Media type of an upload: the declared one, else a guess from the file
/// name, else `application/octet-stream`.
pub fn resolve_media_type(declared: Option<&str>, file_name: Option<&str>) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|s| !s.is_empty()) {
        return declared.to_string();
    }
    file_name
        .and_then(|name| mime_guess::from_path(Path::new(name)).first())
        .map(|m| m.to_string())
        .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string())
}
