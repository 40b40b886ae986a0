//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto (8080 por defecto)
//! 2. Acepta conexiones entrantes
//! 3. Lee la request line y resuelve el recurso pedido
//! 4. Envía la respuesta y cierra la conexión

pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use pool::{BoundedQueue, WorkerPool};
pub use tcp::{handle_connection, Server};
