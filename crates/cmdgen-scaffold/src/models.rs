//! Core data models for scaffolding

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::templates::Delimiters;

/// Whether a template unit is one file or a whole directory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// One source template renders to one output file
    File,
    /// A tree of templates renders to a mirrored output tree
    Directory,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::File => write!(f, "file"),
            UnitKind::Directory => write!(f, "directory"),
        }
    }
}

/// One logical template artifact, rendered and written as one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateUnit {
    /// File or directory unit
    pub kind: UnitKind,
    /// Source path relative to the template root
    pub source: PathBuf,
    /// Base directory relative to the project root the output lands in
    pub destination_base: PathBuf,
}

impl TemplateUnit {
    /// Create a single-file unit
    pub fn file(source: impl Into<PathBuf>, destination_base: impl Into<PathBuf>) -> Self {
        Self {
            kind: UnitKind::File,
            source: source.into(),
            destination_base: destination_base.into(),
        }
    }

    /// Create a directory-tree unit
    pub fn directory(source: impl Into<PathBuf>, destination_base: impl Into<PathBuf>) -> Self {
        Self {
            kind: UnitKind::Directory,
            source: source.into(),
            destination_base: destination_base.into(),
        }
    }

    /// Extension of the source template (`create.liquid` -> `liquid`)
    pub fn extension(&self) -> Option<&str> {
        self.source.extension().and_then(|ext| ext.to_str())
    }
}

/// Placeholder values derived once from a scaffold request
///
/// Immutable after construction and shared read-only by every render of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterBinding {
    values: BTreeMap<String, String>,
}

impl ParameterBinding {
    /// Look up a bound value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check whether a key is bound
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over bindings in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of bound keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterBinding {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Options for template rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Delimiters for placeholders inside file contents
    pub content_delimiters: Delimiters,
    /// Delimiters for placeholders inside file and directory names
    pub path_delimiters: Delimiters,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            content_delimiters: Delimiters::content(),
            path_delimiters: Delimiters::path(),
        }
    }
}

/// Flat placeholder mapping handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateContext {
    /// Variable values for substitution
    pub values: BTreeMap<String, String>,
    /// Rendering options
    pub options: RenderOptions,
}

impl TemplateContext {
    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// A raw template file as read from a template source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the unit's source (or the source path itself for a file unit)
    pub path: PathBuf,
    /// Unrendered bytes
    pub content: Vec<u8>,
}

impl TemplateFile {
    /// Create a template file from text
    pub fn text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into().into_bytes(),
        }
    }
}

/// Rendered file contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    /// UTF-8 text with placeholders substituted
    Text(String),
    /// Non-text bytes, copied verbatim
    Binary(Vec<u8>),
}

impl TemplateContent {
    /// Raw bytes to write
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TemplateContent::Text(text) => text.as_bytes(),
            TemplateContent::Binary(bytes) => bytes,
        }
    }
}

/// A rendered artifact and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Template file this was rendered from, relative to the template root
    pub source: PathBuf,
    /// Destination path (relative to the project root)
    pub destination: PathBuf,
    /// Rendered content
    pub content: TemplateContent,
}
