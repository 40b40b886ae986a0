//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Acepta conexiones y atiende cada una completa:
//! leer request line → resolver → responder → cerrar.
//!
//! Con `workers == 1` todo ocurre en el thread que acepta, una conexión a
//! la vez. Con más workers, las conexiones aceptadas pasan por una cola
//! acotada a un pool fijo; cada conexión sigue teniendo un único handler.

use super::pool::WorkerPool;
use crate::config::ServerConfig;
use crate::http::StatusCode;
use crate::router::{Router, ServedResource};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Largo máximo de la request line
pub const MAX_REQUEST_LINE: usize = 8192;

/// Servidor de archivos estáticos
pub struct Server {
    config: ServerConfig,
    router: Arc<Router>,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        let router = Router::new(config.base_dir.clone());
        Self {
            config,
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Bind a la dirección configurada y atiende conexiones para siempre
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;

        info!("Servidor escuchando en http://{}/", listener.local_addr()?);
        info!("Sirviendo archivos de: {}", self.config.base_dir.display());

        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya creado
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        if self.config.workers <= 1 {
            info!("Modo secuencial: una conexión a la vez");
            for stream in listener.incoming() {
                match stream {
                    Ok(stream) => Self::handle_stream(stream, &self.router),
                    Err(e) => error!("Error al aceptar conexión: {}", e),
                }
            }
            return Ok(());
        }

        info!(
            "Pool de {} workers, cola de {} conexiones",
            self.config.workers, self.config.queue
        );
        let router = Arc::clone(&self.router);
        let pool = WorkerPool::new(self.config.workers, self.config.queue, move |stream| {
            Self::handle_stream(stream, &router)
        })?;

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if pool.submit(stream).is_err() {
                        warn!("Cola cerrada; se descarta la conexión");
                    }
                }
                Err(e) => error!("Error al aceptar conexión: {}", e),
            }
        }

        pool.shutdown();
        Ok(())
    }

    fn handle_stream(stream: TcpStream, router: &Router) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        debug!("Nueva conexión desde {}", peer);

        if let Err(e) = handle_connection(stream, router) {
            warn!("Error atendiendo a {}: {}", peer, e);
        }
    }
}

/// Atiende una conexión completa sobre cualquier stream bidireccional
///
/// Retorna el status enviado, o `None` si el peer cerró sin mandar nada.
/// El stream se cierra al salir, en cualquier camino.
pub fn handle_connection<S: Read + Write>(
    stream: S,
    router: &Router,
) -> io::Result<Option<StatusCode>> {
    let start = Instant::now();
    let mut reader = BufReader::new(stream);

    let line = match read_request_line(&mut reader)? {
        RequestLine::Closed => {
            debug!("Conexión cerrada sin request");
            return Ok(None);
        }
        RequestLine::TooLong => {
            warn!("request line de más de {} bytes", MAX_REQUEST_LINE);
            let response = router.respond(ServedResource::BadRequest);
            response.write_to(reader.get_mut())?;
            return Ok(Some(StatusCode::BadRequest));
        }
        RequestLine::Line(line) => line,
    };

    // Lo que ya llegó de los headers se descarta sin más lecturas
    let buffered = reader.buffer().len();
    reader.consume(buffered);

    let resource = router.resolve_line(&line);
    if let ServedResource::File(path) = &resource {
        debug!("{} → {}", line.trim_end(), path.display());
    }
    let response = router.respond(resource);
    let status = response.status();
    let sent = response.write_to(reader.get_mut())?;

    info!(
        "{} → {} ({} bytes, {:.2}ms)",
        line.trim_end(),
        status,
        sent,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Some(status))
}

enum RequestLine {
    Line(String),
    TooLong,
    Closed,
}

fn read_request_line<R: BufRead>(reader: &mut R) -> io::Result<RequestLine> {
    let mut raw = Vec::new();
    let limit = MAX_REQUEST_LINE as u64;
    reader.take(limit).read_until(b'\n', &mut raw)?;

    if raw.is_empty() {
        return Ok(RequestLine::Closed);
    }
    if raw.last() != Some(&b'\n') && raw.len() as u64 >= limit {
        return Ok(RequestLine::TooLong);
    }

    Ok(RequestLine::Line(String::from_utf8_lossy(&raw).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;

    /// Conexión en memoria: request enlatada, respuesta capturada
    struct Conn {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Conn {
        fn new(request: &[u8]) -> Self {
            Self {
                input: Cursor::new(request.to_vec()),
                output: Vec::new(),
            }
        }
    }

    impl Read for Conn {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Conn {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn exchange(router: &Router, request: &[u8]) -> (Option<StatusCode>, String) {
        let mut conn = Conn::new(request);
        let status = handle_connection(&mut conn, router).unwrap();
        (status, String::from_utf8_lossy(&conn.output).into_owned())
    }

    #[test]
    fn test_serves_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), b"hello world").unwrap();
        let router = Router::new(dir.path());

        let (status, text) = exchange(
            &router,
            b"GET /hello.txt HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n",
        );

        assert_eq!(status, Some(StatusCode::Ok));
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 11\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\nhello world"));
    }

    #[test]
    fn test_server_routes_from_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::from_args([
            "minihttp-server".to_string(),
            dir.path().display().to_string(),
        ])
        .unwrap();

        let server = Server::new(config);
        assert_eq!(server.router().base_dir(), dir.path());
    }

    #[test]
    fn test_method_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(dir.path());

        let (status, text) = exchange(&router, b"POST / HTTP/1.1\r\n\r\nbody");
        assert_eq!(status, Some(StatusCode::MethodNotAllowed));
        assert!(text.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));
        assert!(text.contains("<h1>405 Method Not Allowed</h1>"));
    }

    #[test]
    fn test_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(dir.path());

        let (status, text) = exchange(&router, b"GET /missing HTTP/1.1\r\n\r\n");
        assert_eq!(status, Some(StatusCode::NotFound));
        assert!(text.contains("<h1>404 Not Found</h1>"));
    }

    #[test]
    fn test_peer_closed_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(dir.path());

        let (status, text) = exchange(&router, b"");
        assert_eq!(status, None);
        assert!(text.is_empty());
    }

    #[test]
    fn test_request_line_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(dir.path());

        let mut request = b"GET /".to_vec();
        request.extend(std::iter::repeat(b'a').take(MAX_REQUEST_LINE));
        request.extend_from_slice(b" HTTP/1.1\r\n\r\n");

        let (status, text) = exchange(&router, &request);
        assert_eq!(status, Some(StatusCode::BadRequest));
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_garbage_request() {
        let dir = tempfile::tempdir().unwrap();
        let router = Router::new(dir.path());

        let (status, _) = exchange(&router, b"\x00\x01\x02garbage\r\n\r\n");
        assert_eq!(status, Some(StatusCode::BadRequest));
    }
}
