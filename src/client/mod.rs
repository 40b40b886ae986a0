//! # Cliente HTTP
//! src/client/mod.rs
//!
//! Una invocación = una conexión = un GET:
//!
//! ```text
//! URL → conectar → enviar GET → status line + headers → body → archivo
//! ```
//!
//! - `request`: arma la request GET
//! - `decoder`: decodifica la respuesta según su framing
//! - `filename`: decide el nombre del archivo de salida
//! - `report`: resumen final de la descarga
//!
//! `exchange` recibe cualquier stream bidireccional ya conectado, así que
//! se puede probar sin red real; `fetch` solo agrega la conexión TCP.

pub mod decoder;
pub mod filename;
pub mod report;
pub mod request;

pub use decoder::{BodyOutcome, BodyStatus, ResponseDecoder, ResponseHead, StatusLine};
pub use filename::resolve_filename;
pub use report::{HashingWriter, TransferReport};
pub use request::build_get_request;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::ParsedUrl;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::net::TcpStream;
use std::path::Path;
use tracing::{info, warn};

/// Resultado de una invocación que llegó a leer la respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Status 200: el body se guardó (completo o truncado)
    Saved(TransferReport),

    /// Cualquier otro status; el body no se leyó
    NonSuccess(StatusLine),
}

/// Ejecuta la descarga descrita por `config`
pub fn fetch(config: &ClientConfig) -> Result<FetchOutcome, ClientError> {
    let url = ParsedUrl::parse(&config.url)?;
    let target = url.authority();

    info!("conectando a {}", target);
    let stream = TcpStream::connect(&target)
        .map_err(|source| ClientError::Connect { target, source })?;

    exchange(stream, &url, &config.output_dir)
}

/// Envía el GET por `stream` y guarda el body en `output_dir`
///
/// El path del archivo de salida se imprime antes de escribir el primer
/// byte. Un body truncado no es un error: queda el archivo parcial y el
/// reporte lo indica.
pub fn exchange<S: Read + Write>(
    mut stream: S,
    url: &ParsedUrl,
    output_dir: &Path,
) -> Result<FetchOutcome, ClientError> {
    stream
        .write_all(&build_get_request(url))
        .and_then(|_| stream.flush())
        .map_err(ClientError::Send)?;

    let mut decoder = ResponseDecoder::new(BufReader::new(stream));
    let head = decoder.read_head()?.clone();
    info!(
        "HTTP/{} {} {}",
        head.status.version, head.status.code, head.status.reason
    );

    if !head.is_success() {
        return Ok(FetchOutcome::NonSuccess(head.status));
    }

    let framing = head.framing();
    let filename = resolve_filename(url.path(), head.headers.content_disposition());
    let output = output_dir.join(&filename);
    let output_err = |source| ClientError::Output {
        path: output.clone(),
        source,
    };

    println!("Guardando en: {}", output.display());

    fs::create_dir_all(output_dir).map_err(output_err)?;
    let file = File::create(&output).map_err(output_err)?;
    let mut sink = HashingWriter::new(BufWriter::new(file));

    loop {
        let span = match decoder.next_span()? {
            Some(span) => span,
            None => break,
        };
        sink.write_all(span).map_err(output_err)?;
    }
    sink.flush().map_err(output_err)?;
    let (_, sha256) = sink.finish();

    let outcome = decoder.outcome();
    if let BodyStatus::Truncated { expected } = outcome.status {
        warn!(
            "body truncado: se recibieron {} de {} bytes; se conserva el archivo parcial",
            outcome.received, expected
        );
    }

    Ok(FetchOutcome::Saved(TransferReport::new(
        url.to_string(),
        head.status.code,
        framing,
        output,
        outcome,
        sha256,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Stream en memoria: lee una respuesta enlatada y guarda lo escrito
    struct Scripted {
        response: Cursor<Vec<u8>>,
        sent: Vec<u8>,
    }

    impl Scripted {
        fn new(response: &[u8]) -> Self {
            Self {
                response: Cursor::new(response.to_vec()),
                sent: Vec::new(),
            }
        }
    }

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.response.read(buf)
        }
    }

    impl Write for Scripted {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.sent.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn url(s: &str) -> ParsedUrl {
        ParsedUrl::parse(s).unwrap()
    }

    #[test]
    fn test_exchange_saves_chunked_body() {
        let dir = tempfile::tempdir().unwrap();
        let stream = Scripted::new(
            b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n",
        );

        let outcome = exchange(stream, &url("http://example.com/wiki.txt"), dir.path()).unwrap();
        let report = match outcome {
            FetchOutcome::Saved(report) => report,
            other => panic!("unexpected outcome: {:?}", other),
        };

        assert_eq!(report.output, dir.path().join("wiki.txt"));
        assert_eq!(report.bytes_written, 9);
        assert!(report.complete);
        assert_eq!(std::fs::read(dir.path().join("wiki.txt")).unwrap(), b"Wikipedia");
    }

    #[test]
    fn test_exchange_uses_content_disposition() {
        let dir = tempfile::tempdir().unwrap();
        let stream = Scripted::new(
            b"HTTP/1.1 200 OK\r\nContent-Disposition: attachment; filename=\"report.pdf\"\r\n\
              Content-Length: 3\r\n\r\npdf",
        );

        exchange(stream, &url("http://example.com/download"), dir.path()).unwrap();
        assert_eq!(std::fs::read(dir.path().join("report.pdf")).unwrap(), b"pdf");
    }

    #[test]
    fn test_exchange_keeps_truncated_body() {
        let dir = tempfile::tempdir().unwrap();
        let stream = Scripted::new(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial");

        let outcome = exchange(stream, &url("http://example.com/"), dir.path()).unwrap();
        match outcome {
            FetchOutcome::Saved(report) => {
                assert!(!report.complete);
                assert_eq!(report.bytes_written, 7);
                assert_eq!(report.expected, Some(100));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(std::fs::read(dir.path().join("index.html")).unwrap(), b"partial");
    }

    #[test]
    fn test_exchange_non_success_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let stream = Scripted::new(b"HTTP/1.1 404 Not Found\r\nContent-Length: 3\r\n\r\nnope");

        let outcome = exchange(stream, &url("http://example.com/missing.txt"), dir.path()).unwrap();
        match outcome {
            FetchOutcome::NonSuccess(status) => assert_eq!(status.code, 404),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!dir.path().join("missing.txt").exists());
    }

    #[test]
    fn test_exchange_protocol_error() {
        let dir = tempfile::tempdir().unwrap();
        let stream = Scripted::new(b"SSH-2.0-OpenSSH\r\n");

        let result = exchange(stream, &url("http://example.com/"), dir.path());
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_exchange_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("arquivos");
        let stream = Scripted::new(b"HTTP/1.0 200 OK\r\n\r\nclose-delimited");

        exchange(stream, &url("http://example.com/a.txt"), &nested).unwrap();
        assert_eq!(std::fs::read(nested.join("a.txt")).unwrap(), b"close-delimited");
    }

    #[test]
    fn test_fetch_invalid_url() {
        let config = ClientConfig {
            url: "ftp://example.com/".to_string(),
            output_dir: ".".into(),
            json: false,
        };
        assert!(matches!(fetch(&config), Err(ClientError::Url(_))));
    }
}
