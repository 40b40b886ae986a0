//! # Respuesta con archivo estático
//! src/router/file.rs

use crate::http::mime::content_type_for;
use crate::http::{Response, StatusCode};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::warn;

/// `200 OK` con el contenido completo de `path`
///
/// El `Content-Length` se toma del tamaño del archivo antes de transmitir;
/// el contenido se envía en bloques al escribir la respuesta. Si el
/// archivo no se puede abrir se responde 404 (o 403 si es por permisos).
pub fn file_response(path: &Path) -> Response {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("no se pudo abrir {}: {}", path.display(), e);
            return Response::error(match e.kind() {
                io::ErrorKind::PermissionDenied => StatusCode::Forbidden,
                _ => StatusCode::NotFound,
            });
        }
    };

    let len = match file.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            warn!("no se pudo leer metadata de {}: {}", path.display(), e);
            return Response::error(StatusCode::InternalServerError);
        }
    };

    Response::new(StatusCode::Ok)
        .with_header("Content-Type", content_type_for(path))
        .with_file(file, len)
}
