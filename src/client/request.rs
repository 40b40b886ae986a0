//! # Request GET del cliente
//! src/client/request.rs

use crate::http::ParsedUrl;

/// Valor del header `User-Agent`
pub const USER_AGENT: &str = concat!("minihttp/", env!("CARGO_PKG_VERSION"));

/// Arma la request GET completa, terminada en CRLF-CRLF y sin body
///
/// # Ejemplo
///
/// ```
/// use minihttp::client::build_get_request;
/// use minihttp::http::ParsedUrl;
///
/// let url = ParsedUrl::parse("http://example.com/index.html").unwrap();
/// let request = build_get_request(&url);
/// assert!(request.starts_with(b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n"));
/// assert!(request.ends_with(b"Connection: close\r\n\r\n"));
/// ```
pub fn build_get_request(url: &ParsedUrl) -> Vec<u8> {
    format!(
        "GET {} HTTP/1.1\r\n\
         Host: {}\r\n\
         User-Agent: {}\r\n\
         Accept: */*\r\n\
         Connection: close\r\n\
         \r\n",
        url.path(),
        url.host_header(),
        USER_AGENT,
    )
    .into_bytes()
}
