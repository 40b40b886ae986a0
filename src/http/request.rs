//! # Parsing de Requests
//! src/http/request.rs
//!
//! El servidor solo mira la request line y de ella solo usa los dos
//! primeros tokens separados por espacios:
//!
//! ```text
//! GET /docs/index.html HTTP/1.1\r\n
//! ^^^ ^^^^^^^^^^^^^^^^
//! método    path
//! ```
//!
//! La versión y los headers se ignoran.

use std::fmt;

/// Método HTTP de la request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    /// Cualquier otro token (PUT, DELETE, basura...)
    Other(String),
}

impl Method {
    fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parseada: método y path tal como llegaron
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("Invalid request line: {0}")]
    InvalidRequestLine(String),
}

impl Request {
    /// Parsea la request line
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::{Request, Method};
    ///
    /// let request = Request::parse("GET /img/logo.png HTTP/1.1\r\n").unwrap();
    /// assert_eq!(request.method(), &Method::GET);
    /// assert_eq!(request.path(), "/img/logo.png");
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();

        let method = tokens.next().ok_or(ParseError::EmptyRequest)?;
        let path = tokens
            .next()
            .ok_or_else(|| ParseError::InvalidRequestLine(line.trim_end().to_string()))?;

        Ok(Request {
            method: Method::from_token(method),
            path: path.to_string(),
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
