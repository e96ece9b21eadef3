//! Test fixtures: in-memory ZIP archives and multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Build a ZIP in memory. `None` content adds a directory entry.
pub fn zip_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    for (path, content) in entries {
        match content {
            Some(content) => {
                writer.start_file(*path, options).unwrap();
                writer.write_all(content).unwrap();
            }
            None => {
                writer.add_directory(*path, options).unwrap();
            }
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Two files and a directory.
pub fn demo_site_zip() -> Vec<u8> {
    zip_bytes(&[
        ("index.html", Some(b"<h1>demo</h1>")),
        ("assets/", None),
        ("assets/app.js", Some(b"console.log('demo');")),
    ])
}

pub fn deploy_form(project_name: &str, archive: Vec<u8>) -> MultipartForm {
    MultipartForm::new()
        .add_text("projectName", project_name.to_string())
        .add_part(
            "zipFile",
            Part::bytes(archive)
                .file_name("site.zip")
                .mime_type("application/zip"),
        )
}
