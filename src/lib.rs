//! # minihttp
//! src/lib.rs
//!
//! Par mínimo de intercambio HTTP/1.1 implementado desde cero sobre
//! `std::net`:
//!
//! - un **cliente** que hace un único GET y decodifica el body con
//!   cualquiera de los tres framings de HTTP/1.1 (`Content-Length`,
//!   `chunked` o cierre de conexión), guardándolo en un archivo;
//! - un **servidor** que mapea requests GET a un subárbol del sistema de
//!   archivos y sirve archivos, `index.html` o listados generados.
//!
//! ## Arquitectura
//!
//! - `http`: capa de protocolo compartida (URLs, headers, framing, status, MIME)
//! - `client`: request builder, decodificador de respuestas y nombre de salida
//! - `router`: resolución request → recurso, listados y archivos estáticos
//! - `server`: loop de accept y pool de workers opcional
//! - `config`: argumentos CLI de ambos binarios
//! - `error`: errores del cliente
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::ServerConfig;
//! use minihttp::server::Server;
//!
//! let config = ServerConfig::from_args(["minihttp-server", "./public"]).unwrap();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;

pub use error::{ClientError, DecodeError, UrlError};
