//! # Resolución de requests
//! src/router/mod.rs
//!
//! Mapea cada request a un recurso bajo el directorio base:
//!
//! ```text
//! Request → resolve() → ServedResource → respond() → Response
//! ```
//!
//! - Método distinto de GET → `MethodNotAllowed`
//! - `base_dir + path` no existe → `NotFound`
//! - Es un directorio con `index.html` → `File(<dir>/index.html)`
//! - Es un directorio sin `index.html` → `DirectoryListing`
//! - Es un archivo → `File`
//!
//! El path se concatena tal cual al directorio base (sin decodificar).
//! Los paths con segmentos `..` se rechazan con `Forbidden`.

pub mod file;
pub mod listing;

pub use file::file_response;
pub use listing::{DirectoryEntry, Listing};

use crate::http::{Method, Request, Response, StatusCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Documento que se sirve en lugar del listado si existe
pub const INDEX_FILE: &str = "index.html";

/// Valor del header `Server`
pub const SERVER_NAME: &str = concat!("minihttp/", env!("CARGO_PKG_VERSION"));

/// Resultado de resolver una request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServedResource {
    /// Archivo a servir: el pedido directamente o el `index.html` de un directorio
    File(PathBuf),
    DirectoryListing(Listing),
    NotFound,
    Forbidden,
    MethodNotAllowed,
    BadRequest,
}

impl ServedResource {
    /// Status HTTP con el que se responde
    pub fn status(&self) -> StatusCode {
        match self {
            ServedResource::File(_) | ServedResource::DirectoryListing(_) => StatusCode::Ok,
            ServedResource::NotFound => StatusCode::NotFound,
            ServedResource::Forbidden => StatusCode::Forbidden,
            ServedResource::MethodNotAllowed => StatusCode::MethodNotAllowed,
            ServedResource::BadRequest => StatusCode::BadRequest,
        }
    }
}

/// Router de archivos estáticos
#[derive(Debug, Clone)]
pub struct Router {
    base_dir: PathBuf,
}

impl Router {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resuelve una request ya parseada
    pub fn resolve(&self, request: &Request) -> ServedResource {
        if request.method() != &Method::GET {
            return ServedResource::MethodNotAllowed;
        }

        let path = request.path();
        if !path.starts_with('/') {
            return ServedResource::BadRequest;
        }
        if path.split('/').any(|segment| segment == "..") {
            warn!("path con '..' rechazado: {}", path);
            return ServedResource::Forbidden;
        }

        let full_path = self.fs_path(path);
        let meta = match fs::metadata(&full_path) {
            Ok(meta) => meta,
            Err(e) => return stat_failure(&full_path, &e),
        };

        if !meta.is_dir() {
            return ServedResource::File(full_path);
        }

        let index = full_path.join(INDEX_FILE);
        if fs::metadata(&index).map(|m| m.is_file()).unwrap_or(false) {
            return ServedResource::File(index);
        }

        listing_resource(&full_path, Listing::read(&full_path, path))
    }

    /// Parsea la request line y la resuelve
    pub fn resolve_line(&self, line: &str) -> ServedResource {
        match Request::parse(line) {
            Ok(request) => self.resolve(&request),
            Err(e) => {
                debug!("request inválida: {}", e);
                ServedResource::BadRequest
            }
        }
    }

    /// Convierte un recurso resuelto en la respuesta a enviar
    pub fn respond(&self, resource: ServedResource) -> Response {
        let mut response = match resource {
            ServedResource::File(path) => file_response(&path),
            ServedResource::DirectoryListing(listing) => Response::html(&listing.to_html()),
            ServedResource::MethodNotAllowed => {
                Response::error(StatusCode::MethodNotAllowed).with_header("Allow", "GET")
            }
            other => Response::error(other.status()),
        };
        self.add_common_headers(&mut response);
        response
    }

    /// `base_dir` + path de la request, concatenados sin normalizar
    fn fs_path(&self, request_path: &str) -> PathBuf {
        let mut full = self.base_dir.as_os_str().to_owned();
        full.push(request_path);
        PathBuf::from(full)
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", SERVER_NAME);
        response.add_header("Connection", "close");
    }
}

/// Un directorio que no se puede enumerar se responde con `Forbidden`
fn listing_resource(dir: &Path, listing: io::Result<Listing>) -> ServedResource {
    match listing {
        Ok(listing) => ServedResource::DirectoryListing(listing),
        Err(e) => {
            warn!("no se pudo listar {}: {}", dir.display(), e);
            ServedResource::Forbidden
        }
    }
}

fn stat_failure(path: &Path, error: &io::Error) -> ServedResource {
    match error.kind() {
        io::ErrorKind::PermissionDenied => ServedResource::Forbidden,
        _ => {
            debug!("{} no existe: {}", path.display(), error);
            ServedResource::NotFound
        }
    }
}
