//! Destination path resolution
//!
//! Pure path arithmetic; nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::models::{TemplateUnit, UnitKind};

/// Computes where rendered artifacts land inside a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationResolver {
    project_root: PathBuf,
}

impl DestinationResolver {
    /// Create a resolver for a project root
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// The project root destinations are joined onto
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a destination relative to the project root
    ///
    /// - File units: `<base>/<command_name>.<ext>` (no dot without an extension)
    /// - Directory units: `<base>/<command_name>`
    pub fn resolve(base: &Path, command_name: &str, kind: UnitKind, ext: Option<&str>) -> PathBuf {
        match (kind, ext) {
            (UnitKind::File, Some(ext)) if !ext.is_empty() => {
                base.join(format!("{}.{}", command_name, ext))
            }
            _ => base.join(command_name),
        }
    }

    /// Resolve a unit's destination relative to the project root
    pub fn resolve_unit(&self, unit: &TemplateUnit, command_name: &str) -> PathBuf {
        Self::resolve(
            &unit.destination_base,
            command_name,
            unit.kind,
            unit.extension(),
        )
    }

    /// Destination of one rendered entry of a directory unit
    pub fn resolve_tree_entry(
        &self,
        unit: &TemplateUnit,
        command_name: &str,
        rendered_relative: &Path,
    ) -> PathBuf {
        self.resolve_unit(unit, command_name).join(rendered_relative)
    }
}
