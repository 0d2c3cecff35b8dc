//! Opening package containers held in memory

use std::io::{Cursor, Read};

use zip::ZipArchive;

use super::{detect_format, PackageFormat};
use crate::errors::PackageError;

/// A zip container together with the format adapter that understands it
pub struct OpenedPackage<'a> {
    pub archive: ZipArchive<Cursor<&'a [u8]>>,
    pub format: &'static dyn PackageFormat,
}

/// Open a package and detect its format
pub fn open_package(bytes: &[u8]) -> Result<OpenedPackage<'_>, PackageError> {
    let archive = ZipArchive::new(Cursor::new(bytes))?;

    let names: Vec<&str> = archive.file_names().collect();
    let format = detect_format(&names).ok_or(PackageError::UnknownFormat)?;

    Ok(OpenedPackage { archive, format })
}

/// Read a text part of the archive by name
pub fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<String, PackageError> {
    let mut file = archive.by_name(name).map_err(|e| match e {
        zip::result::ZipError::FileNotFound => PackageError::MissingPart(name.to_string()),
        other => PackageError::Zip(other),
    })?;

    let mut buf = Vec::with_capacity((file.size() as usize).min(1 << 24));
    file.read_to_end(&mut buf)?;

    String::from_utf8(buf).map_err(|_| PackageError::InvalidEncoding(name.to_string()))
}

impl OpenedPackage<'_> {
    /// Read the part holding the document body
    pub fn read_primary(&mut self) -> Result<String, PackageError> {
        let name = self.format.primary_part();
        read_part(&mut self.archive, name)
    }
}
