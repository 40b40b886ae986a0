//! # Códigos de Estado HTTP
//!
//! Códigos que el servidor puede emitir. El cliente no usa este enum:
//! trabaja con el número de tres dígitos leído de la status line, porque
//! cualquier código distinto de 200 se reporta tal cual.

/// Códigos de estado que emite el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - Archivo o listado servido
    Ok = 200,

    /// 400 Bad Request - Request line ilegible
    BadRequest = 400,

    /// 403 Forbidden - Sin permiso, o path con segmentos `..`
    Forbidden = 403,

    /// 404 Not Found - El path no existe bajo el directorio base
    NotFound = 404,

    /// 405 Method Not Allowed - Solo se acepta GET
    MethodNotAllowed = 405,

    /// 500 Internal Server Error
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::StatusCode;
    /// assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el reason phrase estándar
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
