//! # minihttp-server
//! src/bin/server.rs
//!
//! Punto de entrada del servidor de archivos estáticos.
//!
//! ```bash
//! RUST_LOG=debug ./minihttp-server ./public --port 8080
//! ```

use clap::error::ErrorKind;
use minihttp::config::ServerConfig;
use minihttp::server::Server;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match ServerConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuración inválida: {}", e);
        process::exit(1);
    }

    println!("=================================");
    println!("  minihttp server");
    println!("=================================\n");
    println!("Configuración:");
    println!("   Directorio: {}", config.base_dir.display());
    println!("   Dirección:  {}", config.address());
    println!("   Workers:    {}", config.workers);
    println!();

    let server = Server::new(config);
    if let Err(e) = server.run() {
        eprintln!("Error fatal: {}", e);
        process::exit(1);
    }
}
