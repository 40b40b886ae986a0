//! # Errores
//! src/error.rs
//!
//! Taxonomía de errores del cliente. Del lado del servidor los fallos
//! no son errores de proceso: se traducen a un `ServedResource` y luego
//! a una respuesta HTTP (ver `router`).
//!
//! - `UrlError`: la URL no tiene el prefijo `http://` o el host está vacío
//! - `DecodeError`: status line, headers o chunks malformados
//! - `ClientError`: agrega todo lo anterior más fallos de conexión y salida
//!
//! Un body truncado NO es un error: se reporta como
//! [`BodyStatus::Truncated`](crate::client::BodyStatus).

use std::io;
use std::path::PathBuf;

/// URL inválida
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL must start with http://: {0}")]
    MissingScheme(String),

    #[error("URL has an empty host: {0}")]
    EmptyHost(String),

    #[error("URL has an invalid port: {0}")]
    InvalidPort(String),
}

/// Error al decodificar una respuesta HTTP
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// Framing HTTP malformado
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Error de lectura del transporte o de escritura en el sink
    #[error("i/o error while decoding: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    pub(crate) fn protocol(msg: impl Into<String>) -> Self {
        DecodeError::Protocol(msg.into())
    }
}

/// Errores fatales de una invocación del cliente
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] UrlError),

    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to send request: {0}")]
    Send(#[source] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
