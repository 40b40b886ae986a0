//! # Decodificador de Respuestas HTTP/1.1
//! src/client/decoder.rs
//!
//! Máquina de estados pull-based sobre un `BufRead`:
//!
//! ```text
//! StatusLine → Headers → Body(framing) → Done
//! ```
//!
//! - La status line y los headers se leen línea por línea, sin buffers de
//!   tamaño fijo; una línea solo está limitada por `MAX_LINE_LEN`.
//! - Solo un status `200` pasa al estado `Body`; cualquier otro va directo
//!   a `Done` y el body no se lee.
//! - El body se entrega como una secuencia de spans (`next_span`) que el
//!   caller reenvía a su sink, en orden y sin volver atrás.
//!
//! Un body `Content-Length` que se corta antes de tiempo no es un error:
//! el resultado final es `BodyStatus::Truncated` y los bytes ya entregados
//! siguen siendo válidos. En cambio, un chunk incompleto o un tamaño de
//! chunk ilegible sí son `DecodeError::Protocol`.

use crate::error::DecodeError;
use crate::http::{BodyFraming, ResponseHeaders};
use std::io::{self, BufRead, Read, Write};
use tracing::{debug, trace};

/// Largo máximo de una línea de status, header, tamaño de chunk o trailer
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Tamaño máximo de cada span entregado al caller
pub const SPAN_SIZE: usize = 8192;

/// Status line parseada: `HTTP/<version> <code> <reason>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub code: u16,
    pub reason: String,
}

impl StatusLine {
    /// Parsea una status line sin el CRLF final
    ///
    /// El reason phrase puede estar vacío.
    pub fn parse(line: &str) -> Result<Self, DecodeError> {
        let malformed = || DecodeError::protocol(format!("malformed status line: {:?}", line));

        let rest = line.strip_prefix("HTTP/").ok_or_else(malformed)?;
        let (version, rest) = rest.split_once(' ').ok_or_else(malformed)?;
        if version.is_empty() {
            return Err(malformed());
        }

        let (code, reason) = rest.split_once(' ').unwrap_or((rest, ""));
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let code = code.parse().map_err(|_| malformed())?;

        Ok(Self {
            version: version.to_string(),
            code,
            reason: reason.to_string(),
        })
    }
}

/// Status line y headers de una respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusLine,
    pub headers: ResponseHeaders,
}

impl ResponseHead {
    /// Solo `200` habilita la lectura del body
    pub fn is_success(&self) -> bool {
        self.status.code == 200
    }

    pub fn framing(&self) -> BodyFraming {
        self.headers.framing()
    }
}

/// Estado final de la decodificación del body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStatus {
    Complete,
    /// El peer cerró antes de completar un body `Content-Length`
    Truncated { expected: u64 },
}

/// Resultado de decodificar el body completo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyOutcome {
    pub status: BodyStatus,
    /// Bytes de body entregados al sink
    pub received: u64,
}

impl BodyOutcome {
    pub fn is_complete(&self) -> bool {
        self.status == BodyStatus::Complete
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Fixed { expected: u64, remaining: u64 },
    ChunkSize,
    ChunkData { remaining: u64 },
    ChunkEnd,
    UntilClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StatusLine,
    Body(BodyState),
    Done,
}

/// Decodificador de una respuesta HTTP/1.1
pub struct ResponseDecoder<R> {
    reader: R,
    state: State,
    head: Option<ResponseHead>,
    span: Vec<u8>,
    received: u64,
    status: BodyStatus,
}

impl<R: BufRead> ResponseDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: State::StatusLine,
            head: None,
            span: vec![0u8; SPAN_SIZE],
            received: 0,
            status: BodyStatus::Complete,
        }
    }

    /// Lee la status line y el bloque de headers
    ///
    /// Si ya se leyeron, retorna los mismos.
    pub fn read_head(&mut self) -> Result<&ResponseHead, DecodeError> {
        if self.state == State::StatusLine {
            let head = self.parse_head()?;

            self.state = if head.is_success() {
                let framing = head.framing();
                debug!("framing del body: {}", framing);
                State::Body(match framing {
                    BodyFraming::FixedLength(n) => BodyState::Fixed {
                        expected: n,
                        remaining: n,
                    },
                    BodyFraming::Chunked => BodyState::ChunkSize,
                    BodyFraming::UntilClose => BodyState::UntilClose,
                })
            } else {
                State::Done
            };

            self.head = Some(head);
        }

        self.head
            .as_ref()
            .ok_or_else(|| DecodeError::protocol("response head unavailable"))
    }

    fn parse_head(&mut self) -> Result<ResponseHead, DecodeError> {
        let line = self
            .read_line()?
            .ok_or_else(|| DecodeError::protocol("stream closed before the status line"))?;
        let status = StatusLine::parse(&line)?;
        trace!("status line: {:?}", line);

        let mut headers = ResponseHeaders::new();
        loop {
            let line = self
                .read_line()?
                .ok_or_else(|| DecodeError::protocol("stream closed inside the header block"))?;
            if line.is_empty() {
                break;
            }
            if !headers.insert_line(&line) {
                debug!("header mal formado ignorado: {:?}", line);
            }
        }

        Ok(ResponseHead { status, headers })
    }

    /// Siguiente span del body, o `None` cuando el body terminó
    ///
    /// Lee la cabecera si todavía no se leyó. Para respuestas que no son
    /// `200` retorna `None` de inmediato.
    pub fn next_span(&mut self) -> Result<Option<&[u8]>, DecodeError> {
        loop {
            let body = match self.state {
                State::StatusLine => {
                    self.read_head()?;
                    continue;
                }
                State::Done => return Ok(None),
                State::Body(body) => body,
            };

            match body {
                BodyState::Fixed { expected, remaining } => {
                    if remaining == 0 {
                        self.state = State::Done;
                        continue;
                    }
                    let want = remaining.min(SPAN_SIZE as u64) as usize;
                    let n = self.read_some(want)?;
                    if n == 0 {
                        debug!(
                            "stream cerrado tras {} de {} bytes",
                            expected - remaining,
                            expected
                        );
                        self.status = BodyStatus::Truncated { expected };
                        self.state = State::Done;
                        continue;
                    }
                    self.state = State::Body(BodyState::Fixed {
                        expected,
                        remaining: remaining - n as u64,
                    });
                    return Ok(Some(self.emit(n)));
                }

                BodyState::UntilClose => {
                    let n = self.read_some(SPAN_SIZE)?;
                    if n == 0 {
                        self.state = State::Done;
                        continue;
                    }
                    return Ok(Some(self.emit(n)));
                }

                BodyState::ChunkSize => {
                    let line = self.read_line()?.ok_or_else(|| {
                        DecodeError::protocol("stream closed before the chunk size line")
                    })?;
                    let size = parse_chunk_size(&line)?;
                    trace!("chunk de {} bytes", size);
                    if size == 0 {
                        self.skip_trailers()?;
                        self.state = State::Done;
                    } else {
                        self.state = State::Body(BodyState::ChunkData { remaining: size });
                    }
                }

                BodyState::ChunkData { remaining } => {
                    let want = remaining.min(SPAN_SIZE as u64) as usize;
                    let n = self.read_some(want)?;
                    if n == 0 {
                        return Err(DecodeError::protocol(format!(
                            "stream closed with {} bytes of chunk data missing",
                            remaining
                        )));
                    }
                    let remaining = remaining - n as u64;
                    self.state = State::Body(if remaining == 0 {
                        BodyState::ChunkEnd
                    } else {
                        BodyState::ChunkData { remaining }
                    });
                    return Ok(Some(self.emit(n)));
                }

                BodyState::ChunkEnd => {
                    let mut crlf = [0u8; 2];
                    match self.reader.read_exact(&mut crlf) {
                        Ok(()) => {}
                        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                            return Err(DecodeError::protocol(
                                "stream closed before the chunk terminator",
                            ));
                        }
                        Err(e) => return Err(e.into()),
                    }
                    if &crlf != b"\r\n" {
                        return Err(DecodeError::protocol(format!(
                            "chunk data not followed by CRLF: {:?}",
                            String::from_utf8_lossy(&crlf)
                        )));
                    }
                    self.state = State::Body(BodyState::ChunkSize);
                }
            }
        }
    }

    /// Reenvía todo el body a `sink`
    pub fn decode_into<W: Write>(&mut self, sink: &mut W) -> Result<BodyOutcome, DecodeError> {
        while let Some(span) = self.next_span()? {
            sink.write_all(span)?;
        }
        Ok(self.outcome())
    }

    /// Resultado hasta el momento; definitivo una vez que `next_span`
    /// retornó `None`
    pub fn outcome(&self) -> BodyOutcome {
        BodyOutcome {
            status: self.status,
            received: self.received,
        }
    }

    pub fn head(&self) -> Option<&ResponseHead> {
        self.head.as_ref()
    }

    fn emit(&mut self, n: usize) -> &[u8] {
        self.received += n as u64;
        &self.span[..n]
    }

    /// Lee hasta `want` bytes al buffer de spans; 0 significa EOF
    fn read_some(&mut self, want: usize) -> Result<usize, DecodeError> {
        loop {
            match self.reader.read(&mut self.span[..want]) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Lee una línea terminada en `\n` y le quita el `\r\n`
    ///
    /// `None` si el stream se cierra antes de completar la línea.
    fn read_line(&mut self) -> Result<Option<String>, DecodeError> {
        let mut raw = Vec::new();
        let limit = (MAX_LINE_LEN + 2) as u64;
        (&mut self.reader).take(limit).read_until(b'\n', &mut raw)?;

        if raw.last() != Some(&b'\n') {
            if raw.len() as u64 >= limit {
                return Err(DecodeError::protocol(format!(
                    "line exceeds {} bytes",
                    MAX_LINE_LEN
                )));
            }
            return Ok(None);
        }

        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
    }

    /// Descarta los trailers después del chunk de tamaño cero
    ///
    /// Un cierre del stream en este punto se acepta: el body ya llegó
    /// completo.
    fn skip_trailers(&mut self) -> Result<(), DecodeError> {
        while let Some(line) = self.read_line()? {
            if line.is_empty() {
                return Ok(());
            }
            trace!("trailer descartado: {:?}", line);
        }
        debug!("stream cerrado dentro de los trailers chunked");
        Ok(())
    }
}

/// Parsea la línea de tamaño de un chunk
///
/// Toma los dígitos hexadecimales del inicio y descarta el resto
/// (extensiones `;name=value`, espacios).
fn parse_chunk_size(line: &str) -> Result<u64, DecodeError> {
    let digits_len = line
        .bytes()
        .take_while(|b| b.is_ascii_hexdigit())
        .count();

    if digits_len == 0 {
        return Err(DecodeError::protocol(format!(
            "malformed chunk size line: {:?}",
            line
        )));
    }

    u64::from_str_radix(&line[..digits_len], 16).map_err(|_| {
        DecodeError::protocol(format!("chunk size out of range: {:?}", line))
    })
}
