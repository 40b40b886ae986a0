//! # Construcción de Respuestas HTTP
//!
//! API para construir las respuestas del servidor y escribirlas en el
//! socket.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! El body puede estar en memoria o ser un archivo abierto; en el segundo
//! caso se transmite en bloques de `BLOCK_SIZE` bytes después de los headers.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use minihttp::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("Hello");
//!
//! let mut wire = Vec::new();
//! response.write_to(&mut wire).unwrap();
//! assert!(wire.ends_with(b"\r\n\r\nHello"));
//! ```

use super::StatusCode;
use std::fs::File;
use std::io::{self, Read, Write};

/// Tamaño de bloque al transmitir archivos
pub const BLOCK_SIZE: usize = 8192;

/// Body de una respuesta
#[derive(Debug)]
pub enum Body {
    Bytes(Vec<u8>),
    /// Archivo abierto y su tamaño, medido antes de empezar a transmitir
    File { file: File, len: u64 },
}

/// Respuesta HTTP/1.1
#[derive(Debug)]
pub struct Response {
    status: StatusCode,

    /// Headers en el orden en que se agregaron
    headers: Vec<(String, String)>,

    body: Body,
}

impl Response {
    /// Crea una respuesta sin headers y con body vacío
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Bytes(Vec::new()),
        }
    }

    /// Agrega un header; si ya existe, lo sobrescribe
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Versión mutable de [`with_header`](Self::with_header)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Body desde un string; fija `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Body binario; fija `Content-Length`
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.add_header("Content-Length", &body.len().to_string());
        self.body = Body::Bytes(body);
        self
    }

    /// Body desde un archivo abierto de `len` bytes; fija `Content-Length`
    pub fn with_file(mut self, file: File, len: u64) -> Self {
        self.add_header("Content-Length", &len.to_string());
        self.body = Body::File { file, len };
        self
    }

    /// Respuesta HTML `200 OK`
    pub fn html(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html")
            .with_body(body)
    }

    /// Respuesta de error con un body HTML mínimo
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::NotFound);
    /// assert_eq!(response.status(), StatusCode::NotFound);
    /// assert_eq!(response.header("Content-Type"), Some("text/html"));
    /// ```
    pub fn error(status: StatusCode) -> Self {
        let body = format!(
            "<html><body><h1>{}</h1></body></html>",
            status
        );
        Self::new(status)
            .with_header("Content-Type", "text/html")
            .with_body(&body)
    }

    /// Status line y headers, terminados en la línea vacía
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {}\r\n", self.status);
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head.into_bytes()
    }

    /// Escribe la respuesta completa en `writer`
    ///
    /// Retorna la cantidad de bytes de body escritos. Si el archivo se
    /// acorta mientras se transmite, se envía lo que haya.
    pub fn write_to<W: Write>(self, writer: &mut W) -> io::Result<u64> {
        writer.write_all(&self.head_bytes())?;

        let written = match self.body {
            Body::Bytes(bytes) => {
                writer.write_all(&bytes)?;
                bytes.len() as u64
            }
            Body::File { file, len } => {
                let mut block = [0u8; BLOCK_SIZE];
                let mut reader = file.take(len);
                let mut sent = 0u64;
                loop {
                    let n = match reader.read(&mut block) {
                        Ok(0) => break,
                        Ok(n) => n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e),
                    };
                    writer.write_all(&block[..n])?;
                    sent += n as u64;
                }
                sent
            }
        };

        writer.flush()?;
        Ok(written)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body en memoria; `None` si es un archivo
    pub fn body_bytes(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Bytes(bytes) => Some(bytes),
            Body::File { .. } => None,
        }
    }
}
