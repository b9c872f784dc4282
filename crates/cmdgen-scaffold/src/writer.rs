//! Writes rendered artifacts to disk
//!
//! Handles destination collisions according to an explicit policy, creates
//! missing parent directories, and supports dry-run mode. Each file is
//! written to a sibling temporary file and renamed into place, so a failed
//! write never leaves a truncated artifact behind. Files already written are
//! never rolled back.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{error::ScaffoldError, models::RenderResult};

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail the unit before writing any of its files
    #[default]
    Fail,
    /// Leave existing files untouched and write the rest
    Skip,
    /// Replace existing files
    Overwrite,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(CollisionPolicy::Fail),
            "skip" => Ok(CollisionPolicy::Skip),
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            other => Err(format!(
                "unknown collision policy '{}' (expected fail, skip or overwrite)",
                other
            )),
        }
    }
}

/// Configuration for writing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterConfig {
    /// Preview only; nothing touches the filesystem
    pub dry_run: bool,
    /// Collision handling
    pub collision: CollisionPolicy,
}

/// Action taken for one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteAction {
    /// The file did not exist and was created
    Created,
    /// An existing file was replaced
    Overwritten,
    /// An existing file was left alone
    Skipped,
}

/// Result of writing a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWriteResult {
    /// Destination, relative to the project root
    pub path: PathBuf,
    /// Action taken (or that would be taken in dry-run mode)
    pub action: WriteAction,
    /// Whether this was a dry-run
    pub dry_run: bool,
}

impl FileWriteResult {
    /// Whether the file's contents are now (or would be) the rendered ones
    pub fn written(&self) -> bool {
        self.action != WriteAction::Skipped
    }
}

/// Writes rendered artifacts beneath a project root
#[derive(Debug, Clone)]
pub struct ScaffoldWriter {
    project_root: PathBuf,
    config: WriterConfig,
}

impl ScaffoldWriter {
    /// Create a writer with default configuration
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self::with_config(project_root, WriterConfig::default())
    }

    /// Create a writer with custom configuration
    pub fn with_config(project_root: impl Into<PathBuf>, config: WriterConfig) -> Self {
        Self {
            project_root: project_root.into(),
            config,
        }
    }

    /// Write every artifact of one unit
    ///
    /// # Arguments
    /// * `results` - Rendered artifacts, destinations relative to the project root
    /// * `written` - Receives a result for each file handled, including those
    ///   handled before a failure
    ///
    /// # Returns
    /// The first error; files handled before it stay on disk.
    pub fn write_unit(
        &self,
        results: &[RenderResult],
        written: &mut Vec<FileWriteResult>,
    ) -> Result<(), ScaffoldError> {
        if self.config.collision == CollisionPolicy::Fail {
            if let Some(existing) = results
                .iter()
                .find(|result| self.absolute(&result.destination).exists())
            {
                return Err(ScaffoldError::DestinationExists(existing.destination.clone()));
            }
        }

        for result in results {
            written.push(self.write_file(result)?);
        }

        Ok(())
    }

    /// Make sure a directory exists (for directory units without files)
    pub fn ensure_directory(&self, relative: &Path) -> Result<(), ScaffoldError> {
        if self.config.dry_run {
            return Ok(());
        }

        let path = self.absolute(relative);
        fs::create_dir_all(&path).map_err(|source| ScaffoldError::WriteFailed { path, source })
    }

    fn write_file(&self, result: &RenderResult) -> Result<FileWriteResult, ScaffoldError> {
        let path = self.absolute(&result.destination);
        let exists = path.exists();

        let action = match (exists, self.config.collision) {
            (false, _) => WriteAction::Created,
            (true, CollisionPolicy::Skip) => WriteAction::Skipped,
            (true, CollisionPolicy::Overwrite) => WriteAction::Overwritten,
            (true, CollisionPolicy::Fail) => {
                return Err(ScaffoldError::DestinationExists(result.destination.clone()))
            }
        };

        if action == WriteAction::Skipped {
            warn!(path = %result.destination.display(), "Destination exists, skipping");
        } else if !self.config.dry_run {
            write_atomic(&path, result.content.as_bytes())?;
            debug!(path = %result.destination.display(), ?action, "Wrote file");
        }

        Ok(FileWriteResult {
            path: result.destination.clone(),
            action,
            dry_run: self.config.dry_run,
        })
    }

    fn absolute(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }
}

/// Write through a sibling temporary file and rename into place
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ScaffoldError> {
    let fail = |source| ScaffoldError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(fail)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = parent.join(format!(".{}.cmdgen-tmp", file_name));

    if let Err(e) = fs::write(&temp_path, bytes).and_then(|_| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(fail(e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateContent;
    use tempfile::TempDir;

    fn rendered(destination: &str, text: &str) -> RenderResult {
        RenderResult {
            source: PathBuf::from("template"),
            destination: PathBuf::from(destination),
            content: TemplateContent::Text(text.to_string()),
        }
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(temp.path());
        let mut written = Vec::new();

        writer
            .write_unit(&[rendered("app/lib/commands/ship.liquid", "ship")], &mut written)
            .unwrap();

        let content = fs::read_to_string(temp.path().join("app/lib/commands/ship.liquid")).unwrap();
        assert_eq!(content, "ship");
        assert_eq!(written[0].action, WriteAction::Created);
        assert!(written[0].written());
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let writer = ScaffoldWriter::new(temp.path());
        let mut written = Vec::new();
        writer.write_unit(&[rendered("out/a.txt", "a")], &mut written).unwrap();

        let names: Vec<_> = fs::read_dir(temp.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt"]);
    }

    #[test]
    fn test_fail_policy_writes_nothing_on_collision() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("out")).unwrap();
        fs::write(temp.path().join("out/b.txt"), "old").unwrap();

        let writer = ScaffoldWriter::new(temp.path());
        let mut written = Vec::new();
        let err = writer
            .write_unit(&[rendered("out/a.txt", "a"), rendered("out/b.txt", "b")], &mut written)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::DestinationExists(p) if p == PathBuf::from("out/b.txt")));
        assert!(written.is_empty());
        assert!(!temp.path().join("out/a.txt").exists());
        assert_eq!(fs::read_to_string(temp.path().join("out/b.txt")).unwrap(), "old");
    }

    #[test]
    fn test_skip_policy_keeps_existing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("out")).unwrap();
        fs::write(temp.path().join("out/b.txt"), "old").unwrap();

        let config = WriterConfig {
            dry_run: false,
            collision: CollisionPolicy::Skip,
        };
        let writer = ScaffoldWriter::with_config(temp.path(), config);
        let mut written = Vec::new();
        writer
            .write_unit(&[rendered("out/a.txt", "a"), rendered("out/b.txt", "b")], &mut written)
            .unwrap();

        assert_eq!(written[0].action, WriteAction::Created);
        assert_eq!(written[1].action, WriteAction::Skipped);
        assert_eq!(fs::read_to_string(temp.path().join("out/b.txt")).unwrap(), "old");
    }

    #[test]
    fn test_overwrite_policy_replaces() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("out")).unwrap();
        fs::write(temp.path().join("out/b.txt"), "old").unwrap();

        let config = WriterConfig {
            dry_run: false,
            collision: CollisionPolicy::Overwrite,
        };
        let writer = ScaffoldWriter::with_config(temp.path(), config);
        let mut written = Vec::new();
        writer.write_unit(&[rendered("out/b.txt", "new")], &mut written).unwrap();

        assert_eq!(written[0].action, WriteAction::Overwritten);
        assert_eq!(fs::read_to_string(temp.path().join("out/b.txt")).unwrap(), "new");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let config = WriterConfig {
            dry_run: true,
            collision: CollisionPolicy::Fail,
        };
        let writer = ScaffoldWriter::with_config(temp.path(), config);
        let mut written = Vec::new();
        writer.write_unit(&[rendered("out/a.txt", "a")], &mut written).unwrap();
        writer.ensure_directory(Path::new("out/dir")).unwrap();

        assert!(written[0].dry_run);
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_write_failure_keeps_earlier_files() {
        let temp = TempDir::new().unwrap();
        // A directory where a file should go makes the rename fail
        fs::create_dir_all(temp.path().join("out/b.txt")).unwrap();

        let config = WriterConfig {
            dry_run: false,
            collision: CollisionPolicy::Overwrite,
        };
        let writer = ScaffoldWriter::with_config(temp.path(), config);
        let mut written = Vec::new();
        let err = writer
            .write_unit(&[rendered("out/a.txt", "a"), rendered("out/b.txt", "b")], &mut written)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::WriteFailed { .. }));
        assert_eq!(written.len(), 1);
        assert_eq!(fs::read_to_string(temp.path().join("out/a.txt")).unwrap(), "a");
        assert!(!temp.path().join("out/.b.txt.cmdgen-tmp").exists());
    }

    #[test]
    fn test_collision_policy_from_str() {
        assert_eq!("skip".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Skip);
        assert_eq!("Overwrite".parse::<CollisionPolicy>().unwrap(), CollisionPolicy::Overwrite);
        assert!("merge".parse::<CollisionPolicy>().is_err());
    }
}
