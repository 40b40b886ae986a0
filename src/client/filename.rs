//! # Nombre del archivo de salida
//! src/client/filename.rs
//!
//! Reglas, en orden:
//!
//! 1. Si `Content-Disposition` trae un token `filename=`, se usa su valor
//!    tal cual (entre comillas `"`/`'` o hasta `;`, espacio, CR o LF).
//! 2. Si no, el último segmento del path de la URL.
//! 3. Si ese segmento está vacío, `index.html`.
//!
//! El nombre NO se sanea: un `filename="../x"` enviado por el servidor se
//! respeta. Es una limitación conocida.

/// Nombre usado cuando el path termina en `/`
pub const DEFAULT_FILENAME: &str = "index.html";

const FILENAME_TOKEN: &str = "filename=";

/// Elige el nombre del archivo de salida
///
/// # Ejemplo
///
/// ```
/// use minihttp::client::resolve_filename;
///
/// assert_eq!(resolve_filename("/a/b/img.png", None), "img.png");
/// assert_eq!(resolve_filename("/", None), "index.html");
/// assert_eq!(
///     resolve_filename("/download?id=3", Some("attachment; filename=\"report.pdf\"")),
///     "report.pdf"
/// );
/// ```
pub fn resolve_filename(path: &str, content_disposition: Option<&str>) -> String {
    if let Some(name) = content_disposition.and_then(filename_from_disposition) {
        return name;
    }

    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => DEFAULT_FILENAME.to_string(),
    }
}

/// Extrae el valor de `filename=` de un `Content-Disposition`
///
/// Retorna `None` si no hay token o si el valor está vacío.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let start = find_ascii_case_insensitive(value, FILENAME_TOKEN)? + FILENAME_TOKEN.len();
    let raw = &value[start..];

    let name = match raw.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let inner = &raw[1..];
            let end = inner.find(quote).unwrap_or(inner.len());
            &inner[..end]
        }
        _ => {
            let end = raw
                .find([';', ' ', '\r', '\n'])
                .unwrap_or(raw.len());
            &raw[..end]
        }
    };

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("attachment; filename=\"report.pdf\"", "report.pdf")]
    #[case("attachment; filename='report.pdf'", "report.pdf")]
    #[case("attachment; filename=report.pdf", "report.pdf")]
    #[case("attachment; filename=report.pdf; size=10", "report.pdf")]
    #[case("attachment; filename=report.pdf other", "report.pdf")]
    #[case("attachment; FILENAME=\"Upper.txt\"", "Upper.txt")]
    #[case("inline; filename=\"with spaces.txt\"", "with spaces.txt")]
    #[case("attachment; filename=\"unterminated.txt", "unterminated.txt")]
    #[case("attachment; filename=\"../escape.txt\"", "../escape.txt")]
    fn test_disposition_filename(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(resolve_filename("/ignored/path.bin", Some(header)), expected);
    }

    #[rstest]
    #[case("attachment")]
    #[case("attachment; filename=")]
    #[case("attachment; filename=\"\"")]
    #[case("attachment; name=\"x.txt\"")]
    fn test_disposition_without_usable_name(#[case] header: &str) {
        assert_eq!(resolve_filename("/a/b/img.png", Some(header)), "img.png");
    }

    #[rstest]
    #[case("/a/b/img.png", "img.png")]
    #[case("/file.txt", "file.txt")]
    #[case("/", "index.html")]
    #[case("/docs/", "index.html")]
    #[case("/search?q=1", "search?q=1")]
    fn test_path_filename(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(resolve_filename(path, None), expected);
    }
}
