//! # Reporte de transferencia
//! src/client/report.rs
//!
//! Resumen de una descarga exitosa (status 200): qué framing se usó,
//! cuántos bytes se escribieron, si el body llegó completo y el SHA-256
//! de lo escrito. Se imprime como una línea o como JSON (`--json`).

use super::decoder::{BodyOutcome, BodyStatus};
use crate::http::BodyFraming;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

/// Resultado de una descarga
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub url: String,
    pub status: u16,
    pub framing: &'static str,
    pub output: PathBuf,
    pub bytes_written: u64,
    pub complete: bool,
    /// Tamaño anunciado por `Content-Length`, si lo hubo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<u64>,
    pub sha256: String,
}

impl TransferReport {
    pub fn new(
        url: String,
        status: u16,
        framing: BodyFraming,
        output: PathBuf,
        outcome: BodyOutcome,
        sha256: String,
    ) -> Self {
        let expected = match (framing, outcome.status) {
            (_, BodyStatus::Truncated { expected }) => Some(expected),
            (BodyFraming::FixedLength(n), _) => Some(n),
            _ => None,
        };

        Self {
            url,
            status,
            framing: framing.as_str(),
            output,
            bytes_written: outcome.received,
            complete: outcome.is_complete(),
            expected,
            sha256,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bytes escritos en {} ({}, sha256 {})",
            self.bytes_written,
            self.output.display(),
            self.framing,
            self.sha256
        )?;
        if !self.complete {
            if let Some(expected) = self.expected {
                write!(f, " [TRUNCADO: se esperaban {} bytes]", expected)?;
            }
        }
        Ok(())
    }
}

/// Sink que calcula el SHA-256 de todo lo que escribe
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Retorna el writer interno y el digest en hexadecimal
    pub fn finish(self) -> (W, String) {
        let digest = self.hasher.finalize();
        let hex = digest.iter().map(|b| format!("{:02x}", b)).collect();
        (self.inner, hex)
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
