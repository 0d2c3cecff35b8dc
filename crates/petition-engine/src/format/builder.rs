//! Building minimal `.docx` packages from plain text

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::docx::DOCUMENT_PART;
use crate::errors::PackageError;
use super::markup::escape_text;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const DOCUMENT_CLOSE: &str = "<w:sectPr/></w:body></w:document>";

/// Wrap body markup (a sequence of `w:p`) into a complete document part
pub fn wrap_document_body(body: &str) -> String {
    format!("{}{}{}", DOCUMENT_OPEN, body, DOCUMENT_CLOSE)
}

/// One `w:p` per line; tabs become `w:tab` elements
pub fn paragraphs_xml(text: &str) -> String {
    let mut body = String::new();

    for line in text.lines() {
        if line.is_empty() {
            body.push_str("<w:p/>");
            continue;
        }

        body.push_str("<w:p><w:r>");
        for (i, segment) in line.split('\t').enumerate() {
            if i > 0 {
                body.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                body.push_str(r#"<w:t xml:space="preserve">"#);
                body.push_str(&escape_text(segment));
                body.push_str("</w:t>");
            }
        }
        body.push_str("</w:r></w:p>");
    }

    body
}

/// Package a complete `word/document.xml` into a `.docx` container
pub fn build_docx(document_xml: &str) -> Result<Vec<u8>, PackageError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        (DOCUMENT_PART, document_xml),
    ] {
        writer.start_file(name, options)?;
        writer.write_all(content.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

/// A minimal `.docx` whose paragraphs are the lines of `text`
pub fn build_minimal_docx(text: &str) -> Result<Vec<u8>, PackageError> {
    build_docx(&wrap_document_body(&paragraphs_xml(text)))
}
