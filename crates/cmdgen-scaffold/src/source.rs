//! Template sources
//!
//! The scaffolder only sees templates through [`TemplateSource`]: a list of
//! units and their raw contents. Where the templates live is the caller's
//! business.

use std::{fs, path::PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::{
    models::{TemplateFile, TemplateUnit, UnitKind},
    templates::TemplateError,
};

/// Raw, unrendered contents of one template unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTemplate {
    /// A single template file
    File(TemplateFile),
    /// Every file of a directory template, paths relative to the directory
    Directory(Vec<TemplateFile>),
}

/// Supplies template units and their contents
pub trait TemplateSource {
    /// Units to render, in processing order
    fn list_units(&self) -> Vec<TemplateUnit>;

    /// Read a unit's raw contents
    fn read_raw(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError>;
}

impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    fn list_units(&self) -> Vec<TemplateUnit> {
        (**self).list_units()
    }

    fn read_raw(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError> {
        (**self).read_raw(unit)
    }
}

/// Reads templates from a directory on disk
#[derive(Debug, Clone)]
pub struct FsTemplateSource {
    root: PathBuf,
    units: Vec<TemplateUnit>,
}

impl FsTemplateSource {
    /// Create a source over `root` serving the given units
    pub fn new(root: impl Into<PathBuf>, units: Vec<TemplateUnit>) -> Self {
        Self {
            root: root.into(),
            units,
        }
    }

    fn read_file(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError> {
        let path = self.root.join(&unit.source);
        if !path.is_file() {
            return Err(TemplateError::NotFound(path.display().to_string()));
        }

        debug!(path = %path.display(), "Reading template file");
        Ok(RawTemplate::File(TemplateFile {
            path: unit.source.clone(),
            content: fs::read(&path)?,
        }))
    }

    fn read_directory(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError> {
        let dir = self.root.join(&unit.source);
        if !dir.is_dir() {
            return Err(TemplateError::NotFound(dir.display().to_string()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                TemplateError::Io(e.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "template directory walk failed")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&dir)
                .map_err(|_| TemplateError::InvalidPath {
                    path: entry.path().display().to_string(),
                    message: "entry escaped the template directory".to_string(),
                })?
                .to_path_buf();

            debug!(path = %entry.path().display(), "Reading template file");
            files.push(TemplateFile {
                path: relative,
                content: fs::read(entry.path())?,
            });
        }

        Ok(RawTemplate::Directory(files))
    }
}

impl TemplateSource for FsTemplateSource {
    fn list_units(&self) -> Vec<TemplateUnit> {
        self.units.clone()
    }

    fn read_raw(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError> {
        match unit.kind {
            UnitKind::File => self.read_file(unit),
            UnitKind::Directory => self.read_directory(unit),
        }
    }
}

/// Serves templates held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateSource {
    entries: Vec<(TemplateUnit, Option<RawTemplate>)>,
}

impl MemoryTemplateSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-file unit
    pub fn with_file(
        mut self,
        source: impl Into<PathBuf>,
        destination_base: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        let unit = TemplateUnit::file(source, destination_base);
        let file = TemplateFile::text(unit.source.clone(), content);
        self.entries.push((unit, Some(RawTemplate::File(file))));
        self
    }

    /// Add a directory unit from `(relative path, content)` pairs
    pub fn with_directory<P, C>(
        mut self,
        source: impl Into<PathBuf>,
        destination_base: impl Into<PathBuf>,
        files: impl IntoIterator<Item = (P, C)>,
    ) -> Self
    where
        P: Into<PathBuf>,
        C: Into<String>,
    {
        let unit = TemplateUnit::directory(source, destination_base);
        let files = files
            .into_iter()
            .map(|(path, content)| TemplateFile::text(path, content))
            .collect();
        self.entries.push((unit, Some(RawTemplate::Directory(files))));
        self
    }

    /// List a unit whose contents are missing, so reading it fails
    pub fn with_missing(mut self, unit: TemplateUnit) -> Self {
        self.entries.push((unit, None));
        self
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn list_units(&self) -> Vec<TemplateUnit> {
        self.entries.iter().map(|(unit, _)| unit.clone()).collect()
    }

    fn read_raw(&self, unit: &TemplateUnit) -> Result<RawTemplate, TemplateError> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == unit)
            .and_then(|(_, raw)| raw.clone())
            .ok_or_else(|| TemplateError::NotFound(unit.source.display().to_string()))
    }
}
