//! Built-in `command` generator templates
//!
//! The templates under `templates/command/` are compiled into the binary so
//! the tool works without a template directory on disk.

use std::path::{Path, PathBuf};

use cmdgen_scaffold::{FsTemplateSource, MemoryTemplateSource, TemplateSource, TemplateUnit};

/// Single-file template, relative to the template root
pub const CREATE_TEMPLATE: &str = "lib/commands/create.liquid";

/// Directory template, relative to the template root
pub const CREATE_DIRECTORY: &str = "lib/commands/create";

const CREATE: &str = include_str!("../templates/command/lib/commands/create.liquid");

const CREATE_FILES: &[(&str, &str)] = &[
    (
        "build.liquid",
        include_str!("../templates/command/lib/commands/create/build.liquid"),
    ),
    (
        "check.liquid",
        include_str!("../templates/command/lib/commands/create/check.liquid"),
    ),
    (
        "execute.liquid",
        include_str!("../templates/command/lib/commands/create/execute.liquid"),
    ),
];

/// The two units of the `command` generator, file first
pub fn command_units(base_path: &Path) -> Vec<TemplateUnit> {
    vec![
        TemplateUnit::file(CREATE_TEMPLATE, base_path),
        TemplateUnit::directory(CREATE_DIRECTORY, base_path),
    ]
}

/// In-memory source serving the compiled-in templates
pub fn builtin_command_source(base_path: &Path) -> MemoryTemplateSource {
    MemoryTemplateSource::new()
        .with_file(CREATE_TEMPLATE, base_path, CREATE)
        .with_directory(CREATE_DIRECTORY, base_path, CREATE_FILES.iter().copied())
}

/// Source for a run: a template directory on disk, or the built-in templates
pub fn command_source(templates_dir: Option<PathBuf>, base_path: &Path) -> Box<dyn TemplateSource> {
    match templates_dir {
        Some(dir) => Box::new(FsTemplateSource::new(dir, command_units(base_path))),
        None => Box::new(builtin_command_source(base_path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdgen_scaffold::{RawTemplate, UnitKind};

    #[test]
    fn test_builtin_units_in_order() {
        let source = builtin_command_source(Path::new("app/lib/commands"));
        let units = source.list_units();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].kind, UnitKind::File);
        assert_eq!(units[0].source, PathBuf::from(CREATE_TEMPLATE));
        assert_eq!(units[1].kind, UnitKind::Directory);
        assert_eq!(units[1].destination_base, PathBuf::from("app/lib/commands"));
    }

    #[test]
    fn test_builtin_templates_reference_command_name() {
        let source = builtin_command_source(Path::new("app/lib/commands"));
        let units = source.list_units();

        match source.read_raw(&units[0]).unwrap() {
            RawTemplate::File(file) => {
                let text = String::from_utf8(file.content).unwrap();
                assert!(text.contains("commands/<%= commandName %>/build"));
            }
            other => panic!("expected file, got {other:?}"),
        }

        match source.read_raw(&units[1]).unwrap() {
            RawTemplate::Directory(files) => assert_eq!(files.len(), 3),
            other => panic!("expected directory, got {other:?}"),
        }
    }

    #[test]
    fn test_command_source_prefers_directory() {
        let temp = std::env::temp_dir().join("cmdgen-no-such-templates");
        let source = command_source(Some(temp), Path::new("app/lib/commands"));
        let units = source.list_units();
        assert!(source.read_raw(&units[0]).is_err());
    }
}
