//! # minihttp-client
//! src/bin/client.rs
//!
//! Descarga una URL con un único GET y guarda el body en un archivo.
//!
//! Códigos de salida:
//! - `0`: status 200 y body guardado (aunque haya quedado truncado)
//! - `1`: argumentos inválidos, error de red o de protocolo, o status != 200

use clap::error::ErrorKind;
use minihttp::client::{self, FetchOutcome};
use minihttp::config::ClientConfig;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(1),
            }
        }
    };

    match client::fetch(&config) {
        Ok(FetchOutcome::Saved(report)) => {
            if config.json {
                match report.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("No se pudo serializar el reporte: {}", e),
                }
            } else {
                println!("{}", report);
            }
        }
        Ok(FetchOutcome::NonSuccess(status)) => {
            eprintln!(
                "El servidor respondió HTTP/{} {} {}",
                status.version, status.code, status.reason
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
