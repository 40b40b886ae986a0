//! # Listado de directorios
//! src/router/listing.rs
//!
//! Genera un documento HTML con los hijos inmediatos de un directorio.
//! El orden es el que entrega el sistema de archivos: no se ordena.
//!
//! ```text
//! GET /docs/        →  <h1>Index of /docs</h1>
//!                      <li><a href="/docs/manual.pdf">manual.pdf</a></li>
//!                      <li><a href="/docs/img/">img/</a></li>
//! ```

use std::fs;
use std::io;
use std::path::Path;

/// Hijo de un directorio listado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Listado ya enumerado de un directorio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Path pedido, sin la `/` final (salvo la raíz)
    url_path: String,
    entries: Vec<DirectoryEntry>,
}

impl Listing {
    /// Enumera `dir`; `request_path` es el path tal como llegó en la request
    ///
    /// Falla si el directorio no se puede abrir o leer.
    pub fn read(dir: &Path, request_path: &str) -> io::Result<Self> {
        let mut entries = Vec::new();

        // read_dir nunca entrega "." ni ".."
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // metadata sigue symlinks: un link a un directorio se lista como directorio
            let is_dir = fs::metadata(entry.path())
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            entries.push(DirectoryEntry { name, is_dir });
        }

        Ok(Self {
            url_path: clean_path(request_path).to_string(),
            entries,
        })
    }

    pub fn url_path(&self) -> &str {
        &self.url_path
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// Link de una entrada; los directorios terminan en `/`
    pub fn href(&self, entry: &DirectoryEntry) -> String {
        let mut href = if self.url_path == "/" {
            format!("/{}", entry.name)
        } else {
            format!("{}/{}", self.url_path, entry.name)
        };
        if entry.is_dir {
            href.push('/');
        }
        href
    }

    /// Documento HTML completo
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.url_path);
        let mut html = format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Index of {title}</title></head>\n\
             <body><h1>Index of {title}</h1>\n<ul>\n"
        );

        for entry in &self.entries {
            let suffix = if entry.is_dir { "/" } else { "" };
            html.push_str(&format!(
                "<li><a href=\"{}\">{}{}</a></li>\n",
                escape_html(&self.href(entry)),
                escape_html(&entry.name),
                suffix
            ));
        }

        html.push_str("</ul>\n</body></html>\n");
        html
    }
}

/// Quita una `/` final, salvo que el path sea la raíz
fn clean_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
