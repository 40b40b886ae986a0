//! # Módulo HTTP
//!
//! Capa de protocolo compartida por el cliente y el servidor:
//!
//! - Parsing de URLs `http://`
//! - Headers de respuesta y selección del framing del body
//! - Parsing de la request line (lado servidor)
//! - Construcción de responses (lado servidor)
//! - Códigos de estado y tipos MIME
//!
//! ## Framing del body en HTTP/1.1
//!
//! El receptor sabe dónde termina el body por una de tres vías:
//!
//! ```text
//! Content-Length: 9              → exactamente 9 bytes
//! Transfer-Encoding: chunked     → 4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n
//! (ninguno)                      → hasta que el peer cierra la conexión
//! ```

pub mod headers;
pub mod mime;
pub mod request;
pub mod response;
pub mod status;
pub mod url;

pub use headers::{BodyFraming, ResponseHeaders};
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
pub use url::ParsedUrl;
