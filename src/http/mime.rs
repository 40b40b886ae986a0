//! # Tipos MIME
//! src/http/mime.rs
//!
//! Tabla fija extensión → `Content-Type`. Lo que no está en la tabla se
//! sirve como `application/octet-stream`.

use std::path::Path;

pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Content-Type para un archivo según su extensión
///
/// # Ejemplo
/// ```
/// use minihttp::http::mime::content_type_for;
/// use std::path::Path;
///
/// assert_eq!(content_type_for(Path::new("a/b/index.html")), "text/html");
/// assert_eq!(content_type_for(Path::new("song.MP3")), "audio/mpeg");
/// assert_eq!(content_type_for(Path::new("Makefile")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        // Texto
        Some("html" | "htm") => "text/html",
        Some("txt") => "text/plain",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",

        // Imágenes
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",

        // Audio y video
        Some("mp3") => "audio/mpeg",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        // Documentos
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }

        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("index.html", "text/html")]
    #[case("notes.txt", "text/plain")]
    #[case("photo.jpg", "image/jpeg")]
    #[case("photo.JPEG", "image/jpeg")]
    #[case("clip.webm", "video/webm")]
    #[case("report.pdf", "application/pdf")]
    #[case("letter.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document")]
    fn test_known_extensions(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(Path::new(name)), expected);
    }

    #[rstest]
    #[case("archive.xyz")]
    #[case("no_extension")]
    #[case(".hidden")]
    fn test_unknown_extension(#[case] name: &str) {
        assert_eq!(content_type_for(Path::new(name)), DEFAULT_MIME);
    }
}
