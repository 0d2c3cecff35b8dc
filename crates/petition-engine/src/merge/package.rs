//! Placeholder substitution inside document packages
//!
//! Tokens are matched against the text of each paragraph, so a token that
//! the word processor split over several runs (`[[no` + `me]]`) is still
//! found. The value goes into the run where the token starts; the rest of
//! the token is cut out of the following runs. Markup outside the matched
//! characters is copied untouched, and so are zip entries that carry no
//! text.

use std::io::{Cursor, Write};
use std::ops::Range;

use regex::Regex;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::text::merge_text;
use super::RenderedDocument;
use crate::errors::PackageError;
use crate::extract::{extract, walk_part};
use crate::format::markup::escape_text;
use crate::format::scan::paragraph_spans;
use crate::format::{open_package, read_part, PackageFormat, PackageKind};
use crate::placeholders::PlaceholderMap;

/// Merge a package template with a placeholder map
///
/// Never fails: a package that cannot be rewritten yields a degraded
/// minimal document built from whatever text could be recovered.
pub fn merge_package(bytes: &[u8], map: &PlaceholderMap) -> RenderedDocument {
    match rewrite_package(bytes, map) {
        Ok((bytes, kind)) => RenderedDocument {
            bytes,
            kind,
            degraded: false,
        },
        Err(e) => {
            warn!("Package merge degraded to plain text: {}", e);
            degraded_document(bytes, map)
        }
    }
}

/// Rewrite every text part of the package, raw-copying everything else
fn rewrite_package(
    bytes: &[u8],
    map: &PlaceholderMap,
) -> Result<(Vec<u8>, PackageKind), PackageError> {
    let mut package = open_package(bytes)?;
    let format = package.format;

    // The body must be well-formed and hold text runs; otherwise there is
    // nothing safe to merge into
    let primary = package.read_primary()?;
    walk_part(&primary, format)?;
    if paragraph_spans(&primary, format).iter().all(Vec::is_empty) {
        return Err(PackageError::NoText(format.primary_part().to_string()));
    }

    let Some(pattern) = map.token_pattern() else {
        return Ok((bytes.to_vec(), format.kind()));
    };

    let archive = &mut package.archive;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut replaced = 0;

    for i in 0..archive.len() {
        let name = archive.by_index_raw(i)?.name().to_string();

        if format.is_text_part(&name) {
            let xml = read_part(archive, &name)?;
            walk_part(&xml, format)?;
            let (rewritten, count) = substitute_markup(&xml, format, &pattern, map);
            if count > 0 {
                debug!(part = %name, count, "Substituted placeholders");
                replaced += count;
                writer.start_file(name, options)?;
                writer.write_all(rewritten.as_bytes())?;
                continue;
            }
        }

        writer.raw_copy_file(archive.by_index_raw(i)?)?;
    }

    let bytes = writer.finish()?.into_inner();
    debug!(kind = %format.kind(), replaced, "Package merged");
    Ok((bytes, format.kind()))
}

/// One edit to the markup: replace `range` with `text`
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Substitute tokens paragraph by paragraph; returns the rewritten markup
/// and the number of tokens replaced
pub(crate) fn substitute_markup(
    xml: &str,
    format: &dyn PackageFormat,
    pattern: &Regex,
    map: &PlaceholderMap,
) -> (String, usize) {
    let mut edits: Vec<Edit> = Vec::new();
    let mut count = 0;

    for spans in paragraph_spans(xml, format) {
        if spans.is_empty() {
            continue;
        }

        // Paragraph text and where each span starts in it
        let mut text = String::new();
        let mut starts = Vec::with_capacity(spans.len());
        for span in &spans {
            starts.push(text.len());
            text.push_str(&xml[span.clone()]);
        }

        for caps in pattern.captures_iter(&text) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(value) = map.get(key.as_str()) else {
                continue;
            };
            count += 1;

            let mut value = Some(escape_text(value));
            for (span, &start) in spans.iter().zip(&starts) {
                let end = start + span.len();
                let from = whole.start().max(start);
                let to = whole.end().min(end);
                if from >= to {
                    continue;
                }
                edits.push(Edit {
                    range: span.start + (from - start)..span.start + (to - start),
                    text: value.take().unwrap_or_default(),
                });
            }
        }
    }

    if edits.is_empty() {
        return (xml.to_string(), 0);
    }

    edits.sort_by_key(|edit| edit.range.start);
    let mut out = String::with_capacity(xml.len());
    let mut last = 0;
    for edit in edits {
        out.push_str(&xml[last..edit.range.start]);
        out.push_str(&edit.text);
        last = edit.range.end;
    }
    out.push_str(&xml[last..]);

    (out, count)
}

/// Build a minimal document when the package could not be rewritten
///
/// Prefers the template's own text, merged; falls back to the placeholder
/// values one per line.
fn degraded_document(bytes: &[u8], map: &PlaceholderMap) -> RenderedDocument {
    let text = extract(bytes).into_text();
    let body = if text.is_empty() {
        map.values_in_field_order().join("\n")
    } else {
        merge_text(&text, map)
    };

    let mut document = RenderedDocument::from_text(&body);
    document.degraded = true;
    document
}
