//! # Parsing de URLs
//! src/http/url.rs
//!
//! Divide un target `http://host[:port][/path]` en sus tres partes.
//! No hay percent-decoding ni manejo de query string: el path se
//! conserva tal cual aparece en la URL.

use crate::error::UrlError;
use std::fmt;

/// Prefijo obligatorio de toda URL aceptada
const SCHEME: &str = "http://";

/// Puerto por defecto cuando la URL no lo indica
pub const DEFAULT_PORT: &str = "80";

/// URL parseada
///
/// Invariantes: `path` siempre empieza con `/` y `port` vale `"80"`
/// cuando la URL no lo especifica.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    host: String,
    port: String,
    path: String,
}

impl ParsedUrl {
    /// Parsea una URL `http://`
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("http://example.com:8080/a/b.txt").unwrap();
    /// assert_eq!(url.host(), "example.com");
    /// assert_eq!(url.port(), "8080");
    /// assert_eq!(url.path(), "/a/b.txt");
    /// ```
    pub fn parse(input: &str) -> Result<Self, UrlError> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| UrlError::MissingScheme(input.to_string()))?;

        // El host termina en el primer ':' o '/', o al final
        let host_end = rest.find([':', '/']).unwrap_or(rest.len());
        let host = &rest[..host_end];
        if host.is_empty() {
            return Err(UrlError::EmptyHost(input.to_string()));
        }

        let rest = &rest[host_end..];
        let (port, path) = match rest.strip_prefix(':') {
            Some(after_colon) => {
                let port_end = after_colon.find('/').unwrap_or(after_colon.len());
                let port = &after_colon[..port_end];
                if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(UrlError::InvalidPort(input.to_string()));
                }
                (port, &after_colon[port_end..])
            }
            None => (DEFAULT_PORT, rest),
        };

        let path = if path.is_empty() { "/" } else { path };

        Ok(Self {
            host: host.to_string(),
            port: port.to_string(),
            path: path.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Dirección para conectar: `host:port`
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valor del header `Host`: el puerto solo se incluye si no es el 80
    pub fn host_header(&self) -> String {
        if self.port == DEFAULT_PORT {
            self.host.clone()
        } else {
            self.authority()
        }
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}{}", SCHEME, self.host, self.port, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://example.com", "example.com", "80", "/")]
    #[case("http://example.com/", "example.com", "80", "/")]
    #[case("http://example.com:8080", "example.com", "8080", "/")]
    #[case("http://localhost:8080/dir/", "localhost", "8080", "/dir/")]
    #[case("http://10.0.0.1/a/b/img.png", "10.0.0.1", "80", "/a/b/img.png")]
    #[case("http://host/search?q=a%20b", "host", "80", "/search?q=a%20b")]
    fn test_parse_valid(
        #[case] input: &str,
        #[case] host: &str,
        #[case] port: &str,
        #[case] path: &str,
    ) {
        let url = ParsedUrl::parse(input).unwrap();
        assert_eq!(url.host(), host);
        assert_eq!(url.port(), port);
        assert_eq!(url.path(), path);
    }

    #[rstest]
    #[case("example.com/index.html")]
    #[case("https://example.com/")]
    #[case("HTTP://example.com/")]
    #[case("")]
    fn test_missing_scheme(#[case] input: &str) {
        assert!(matches!(ParsedUrl::parse(input), Err(UrlError::MissingScheme(_))));
    }

    #[rstest]
    #[case("http://")]
    #[case("http:///path")]
    #[case("http://:8080/path")]
    fn test_empty_host(#[case] input: &str) {
        assert!(matches!(ParsedUrl::parse(input), Err(UrlError::EmptyHost(_))));
    }

    #[rstest]
    #[case("http://host:/x")]
    #[case("http://host:80a/x")]
    fn test_invalid_port(#[case] input: &str) {
        assert!(matches!(ParsedUrl::parse(input), Err(UrlError::InvalidPort(_))));
    }

    #[test]
    fn test_host_header() {
        let url = ParsedUrl::parse("http://example.com/x").unwrap();
        assert_eq!(url.host_header(), "example.com");

        let url = ParsedUrl::parse("http://example.com:8080/x").unwrap();
        assert_eq!(url.host_header(), "example.com:8080");
        assert_eq!(url.authority(), "example.com:8080");
    }
}
