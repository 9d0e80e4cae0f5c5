use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use camino::Utf8Path;
use std::fs;

/// Detects the MIME type for an image file extension. Returns None for
/// anything we won't inline into the webview.
pub fn mime_for_ext(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Encodes raw image bytes as a data URI, guessing the MIME type from the
/// file name the bytes came from.
pub fn data_uri_from_bytes(file_name: &str, bytes: &[u8]) -> Option<String> {
    let ext = Utf8Path::new(file_name).extension()?;
    let mime_type = mime_for_ext(ext)?;
    Some(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
}

/// Loads an image file and encodes it as a data URI string.
/// Returns None if the file doesn't exist or has an unsupported format.
pub fn load_as_data_uri(path: &Utf8Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    data_uri_from_bytes(path.as_str(), &bytes)
}
