//! Scaffold request validation

use std::path::{Component, Path};

use serde::Serialize;

use crate::error::ScaffoldError;

/// A validated command name for one scaffold run
///
/// The name is kept verbatim. It becomes part of the output path, so it has
/// to be a relative path made of plain segments; `/` separates nested
/// commands (`users/create`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldRequest {
    command_name: String,
}

impl ScaffoldRequest {
    /// Validate a command name
    pub fn new(command_name: impl Into<String>) -> Result<Self, ScaffoldError> {
        let command_name = command_name.into();
        validate_command_name(&command_name)?;
        Ok(Self { command_name })
    }

    /// The command name, exactly as supplied
    pub fn command_name(&self) -> &str {
        &self.command_name
    }
}

fn validate_command_name(name: &str) -> Result<(), ScaffoldError> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::InvalidInput(
            "command name must not be empty".to_string(),
        ));
    }

    if name.contains('\0') || name.contains('\\') {
        return Err(ScaffoldError::InvalidInput(format!(
            "command name '{}' contains an illegal character",
            name.escape_debug()
        )));
    }

    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(ScaffoldError::InvalidInput(format!(
            "command name '{}' must be a relative path without empty, '.' or '..' segments",
            name
        )));
    }

    let all_normal = Path::new(name)
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !all_normal {
        return Err(ScaffoldError::InvalidInput(format!(
            "command name '{}' is not a relative path",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_accepts_simple_name() {
        let request = ScaffoldRequest::new("ship").unwrap();
        assert_eq!(request.command_name(), "ship");
    }

    #[test]
    fn test_keeps_name_verbatim() {
        let request = ScaffoldRequest::new("ShipOrder").unwrap();
        assert_eq!(request.command_name(), "ShipOrder");
    }

    #[test]
    fn test_accepts_nested_name() {
        let request = ScaffoldRequest::new("users/create").unwrap();
        assert_eq!(request.command_name(), "users/create");
    }

    #[test]
    fn test_rejects_empty_and_blank() {
        for name in ["", "   ", "\t"] {
            let err = ScaffoldRequest::new(name).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{name:?}");
        }
    }

    #[test]
    fn test_rejects_unsafe_paths() {
        for name in ["/ship", "ship/", "a//b", "../ship", "a/./b", "a/..", "a\\b", "a\0b"] {
            assert!(ScaffoldRequest::new(name).is_err(), "{name:?} should be rejected");
        }
    }
}
