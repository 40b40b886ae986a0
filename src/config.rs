//! # Configuración
//! src/config.rs
//!
//! Configuración de ambos binarios, desde argumentos CLI y variables de
//! entorno.
//!
//! ## Ejemplos de uso
//!
//! ### Servidor
//! ```bash
//! ./minihttp-server ./public --port 8080 --workers 4 --queue 32
//! HTTP_PORT=9000 HTTP_HOST=127.0.0.1 ./minihttp-server ./public
//! ```
//!
//! ### Cliente
//! ```bash
//! ./minihttp-client http://localhost:8080/docs/manual.pdf --output-dir arquivos
//! ```

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Configuración del cliente
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp-client")]
#[command(about = "Descarga una URL http:// con un único GET y guarda el body")]
#[command(version)]
pub struct ClientConfig {
    /// URL a descargar; debe empezar con http://
    pub url: String,

    /// Directorio donde se guarda el archivo descargado
    #[arg(long = "output-dir", default_value = ".", env = "MINIHTTP_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Imprime el reporte de la transferencia en JSON
    #[arg(long)]
    pub json: bool,
}

impl ClientConfig {
    /// Parsea una lista de argumentos (el primero es el nombre del binario)
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "minihttp-server")]
#[command(about = "Sirve un directorio por HTTP/1.1: archivos, index.html o listados")]
#[command(version)]
pub struct ServerConfig {
    /// Directorio base que se sirve
    pub base_dir: PathBuf,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Conexiones atendidas en paralelo (1 = estrictamente secuencial)
    #[arg(long, default_value = "1", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Conexiones aceptadas en espera de un worker (solo con workers > 1)
    #[arg(long, default_value = "10", env = "HTTP_QUEUE")]
    pub queue: usize,
}

impl ServerConfig {
    /// Parsea una lista de argumentos (el primero es el nombre del binario)
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be >= 1".to_string());
        }
        if self.queue == 0 {
            return Err("queue must be >= 1".to_string());
        }
        if !self.base_dir.is_dir() {
            return Err(format!(
                "base directory does not exist or is not a directory: {}",
                self.base_dir.display()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_args(["minihttp-server", "/srv/www"]).unwrap();
        assert_eq!(config.base_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.workers, 1);
        assert_eq!(config.queue, 10);
        assert!(config.address().ends_with(&format!(":{}", config.port)));
    }

    #[test]
    fn test_server_overrides() {
        let config = ServerConfig::from_args([
            "minihttp-server",
            "public",
            "--port",
            "9090",
            "--host",
            "127.0.0.1",
            "--workers",
            "4",
        ])
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:9090");
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_server_requires_base_dir() {
        assert!(ServerConfig::from_args(["minihttp-server"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_str().unwrap();

        let config = ServerConfig::from_args(["minihttp-server", base]).unwrap();
        assert!(config.validate().is_ok());

        let mut bad = config.clone();
        bad.workers = 0;
        assert!(bad.validate().is_err());

        let mut bad = config.clone();
        bad.queue = 0;
        assert!(bad.validate().is_err());

        let mut bad = config;
        bad.base_dir = dir.path().join("missing");
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_client_args() {
        let config = ClientConfig::from_args([
            "minihttp-client",
            "http://localhost:8080/a.txt",
            "--output-dir",
            "arquivos",
            "--json",
        ])
        .unwrap();
        assert_eq!(config.url, "http://localhost:8080/a.txt");
        assert_eq!(config.output_dir, PathBuf::from("arquivos"));
        assert!(config.json);
    }

    #[test]
    fn test_client_requires_url() {
        assert!(ClientConfig::from_args(["minihttp-client"]).is_err());
    }
}
