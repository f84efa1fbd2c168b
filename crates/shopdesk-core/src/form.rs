//! Multipart form payloads
//!
//! `FormData` is an ordered list of named text and file fields. It is kept
//! transport-agnostic so it can be inspected in tests and converted into a
//! wire form only at dispatch time.

use std::path::Path;

/// A file attached to a multipart form.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Build from raw bytes; the MIME type is guessed from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self { file_name, mime, bytes }
    }

    /// Read an image from disk.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Text(String),
    File(ImageFile),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, FormField)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append_text(name, value);
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: ImageFile) -> Self {
        self.append_file(name, file);
        self
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FormField::Text(value.into())));
    }

    pub fn append_file(&mut self, name: impl Into<String>, file: ImageFile) {
        self.fields.push((name.into(), FormField::File(file)));
    }

    pub fn fields(&self) -> &[(String, FormField)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, FormField)> {
        self.fields
    }

    /// Text fields only, in insertion order.
    pub fn text_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().filter_map(|(name, field)| match field {
            FormField::Text(value) => Some((name.as_str(), value.as_str())),
            FormField::File(_) => None,
        })
    }

    /// First text value stored under `name`.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.text_fields()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// First file stored under `name`.
    pub fn get_file(&self, name: &str) -> Option<&ImageFile> {
        self.fields.iter().find_map(|(n, field)| match field {
            FormField::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
