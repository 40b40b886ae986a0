//! # Headers de respuesta y framing del body
//! src/http/headers.rs
//!
//! `ResponseHeaders` guarda los headers con el nombre en minúsculas.
//! A partir de ellos se elige, una sola vez, el `BodyFraming` que define
//! dónde termina el body:
//!
//! 1. `Transfer-Encoding` contiene `chunked` → `Chunked` (gana siempre)
//! 2. `Content-Length` es un entero no negativo → `FixedLength(n)`
//! 3. Ninguno de los anteriores → `UntilClose`

use std::collections::HashMap;
use std::fmt;

/// Headers de una respuesta HTTP, indexados por nombre en minúsculas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    map: HashMap<String, String>,
}

impl ResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un header
    ///
    /// El nombre se normaliza a minúsculas. Si el header se repite, los
    /// valores se combinan separados por `", "`.
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        match self.map.get_mut(&name) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.map.insert(name, value.to_string());
            }
        }
    }

    /// Parsea una línea `Name: value` (sin CRLF) y la agrega
    ///
    /// Retorna `false` si la línea no tiene `:`; esas líneas se ignoran.
    pub fn insert_line(&mut self, line: &str) -> bool {
        match line.split_once(':') {
            Some((name, value)) => {
                self.insert(name, value.trim_start());
                true
            }
            None => false,
        }
    }

    /// Busca un header sin importar mayúsculas/minúsculas
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Largo del body anunciado
    ///
    /// Un `Content-Length` repetido con el mismo valor (`"3, 3"`) cuenta
    /// como uno solo; valores distintos se descartan.
    pub fn content_length(&self) -> Option<u64> {
        let mut values = self
            .get("content-length")?
            .split(',')
            .map(|v| v.trim().parse::<u64>().ok());

        let first = values.next()??;
        for value in values {
            if value? != first {
                return None;
            }
        }
        Some(first)
    }

    pub fn is_chunked(&self) -> bool {
        self.get("transfer-encoding")
            .map(|v| v.to_ascii_lowercase().contains("chunked"))
            .unwrap_or(false)
    }

    pub fn content_disposition(&self) -> Option<&str> {
        self.get("content-disposition")
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get("content-type")
    }

    /// Elige el modo de framing del body
    pub fn framing(&self) -> BodyFraming {
        if self.is_chunked() {
            BodyFraming::Chunked
        } else if let Some(n) = self.content_length() {
            BodyFraming::FixedLength(n)
        } else {
            BodyFraming::UntilClose
        }
    }
}

/// Cómo se delimita el body de una respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFraming {
    /// `Content-Length: n`
    FixedLength(u64),

    /// `Transfer-Encoding: chunked`
    Chunked,

    /// Sin longitud: el body termina cuando el peer cierra la conexión
    UntilClose,
}

impl BodyFraming {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyFraming::FixedLength(_) => "content-length",
            BodyFraming::Chunked => "chunked",
            BodyFraming::UntilClose => "until-close",
        }
    }
}

impl fmt::Display for BodyFraming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyFraming::FixedLength(n) => write!(f, "content-length ({} bytes)", n),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn headers(lines: &[&str]) -> ResponseHeaders {
        let mut headers = ResponseHeaders::new();
        for line in lines {
            headers.insert_line(line);
        }
        headers
    }

    #[test]
    fn test_names_are_case_folded() {
        let h = headers(&["Content-Type: text/html", "X-Custom:   value"]);
        assert_eq!(h.get("content-type"), Some("text/html"));
        assert_eq!(h.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(h.get("x-custom"), Some("value"));
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let h = headers(&["Location: http://example.com:8080/"]);
        assert_eq!(h.get("location"), Some("http://example.com:8080/"));
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut h = ResponseHeaders::new();
        assert!(!h.insert_line("this line has no separator"));
        assert!(h.is_empty());
    }

    #[test]
    fn test_repeated_headers_are_combined() {
        let h = headers(&["Transfer-Encoding: gzip", "Transfer-Encoding: chunked"]);
        assert_eq!(h.get("transfer-encoding"), Some("gzip, chunked"));
        assert!(h.is_chunked());
    }

    #[rstest]
    #[case(&["Content-Length: 42"], BodyFraming::FixedLength(42))]
    #[case(&["Content-Length: 0"], BodyFraming::FixedLength(0))]
    #[case(&["Transfer-Encoding: chunked"], BodyFraming::Chunked)]
    #[case(&["Transfer-Encoding: CHUNKED"], BodyFraming::Chunked)]
    #[case(&["Content-Length: 10", "Transfer-Encoding: chunked"], BodyFraming::Chunked)]
    #[case(&["Content-Length: 3", "Content-Length: 3"], BodyFraming::FixedLength(3))]
    #[case(&["Content-Length: 7, 7"], BodyFraming::FixedLength(7))]
    #[case(&["Content-Length: 3", "Content-Length: 4"], BodyFraming::UntilClose)]
    #[case(&["Content-Length: 3, "], BodyFraming::UntilClose)]
    #[case(&["Content-Length: -1"], BodyFraming::UntilClose)]
    #[case(&["Content-Length: abc"], BodyFraming::UntilClose)]
    #[case(&["Content-Type: text/plain"], BodyFraming::UntilClose)]
    #[case(&[], BodyFraming::UntilClose)]
    fn test_framing_selection(#[case] lines: &[&str], #[case] expected: BodyFraming) {
        assert_eq!(headers(lines).framing(), expected);
    }
}
