//! Placeholder resolution and case transformation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::templates::error::TemplateError;

/// Represents a case transformation for placeholder values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseTransform {
    /// PascalCase (e.g., ShipOrder)
    PascalCase,
    /// camelCase (e.g., shipOrder)
    CamelCase,
    /// snake_case (e.g., ship_order)
    SnakeCase,
    /// kebab-case (e.g., ship-order)
    KebabCase,
    /// UPPERCASE (e.g., SHIPORDER)
    UpperCase,
    /// lowercase (e.g., shiporder)
    LowerCase,
}

impl CaseTransform {
    /// Apply case transformation to a string
    pub fn apply(&self, input: &str) -> String {
        use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};

        match self {
            CaseTransform::PascalCase => input.to_pascal_case(),
            CaseTransform::CamelCase => input.to_lower_camel_case(),
            CaseTransform::SnakeCase => input.to_snake_case(),
            CaseTransform::KebabCase => input.to_kebab_case(),
            CaseTransform::UpperCase => input.to_uppercase(),
            CaseTransform::LowerCase => input.to_lowercase(),
        }
    }

    /// Look up the transform named by a filter (`<%= name | snake %>`)
    pub fn from_filter(filter: &str) -> Option<Self> {
        match filter {
            "pascal" => Some(CaseTransform::PascalCase),
            "camel" => Some(CaseTransform::CamelCase),
            "snake" => Some(CaseTransform::SnakeCase),
            "kebab" => Some(CaseTransform::KebabCase),
            "upper" => Some(CaseTransform::UpperCase),
            "lower" => Some(CaseTransform::LowerCase),
            _ => None,
        }
    }
}

/// A placeholder occurrence in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The binding key
    pub name: String,
    /// Transforms applied left to right; empty means verbatim
    pub transforms: Vec<CaseTransform>,
}

impl Placeholder {
    /// Create a verbatim placeholder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transforms: Vec::new(),
        }
    }

    /// Append a case transform
    pub fn with_transform(mut self, transform: CaseTransform) -> Self {
        self.transforms.push(transform);
        self
    }
}

/// Resolves placeholders against a set of bound values
pub struct PlaceholderResolver<'a> {
    /// Mapping of placeholder names to their values
    values: &'a BTreeMap<String, String>,
}

impl<'a> PlaceholderResolver<'a> {
    /// Create a resolver over the given values
    pub fn new(values: &'a BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Resolve a placeholder, applying its transforms
    pub fn resolve(&self, placeholder: &Placeholder) -> Result<String, TemplateError> {
        let value = self
            .values
            .get(&placeholder.name)
            .ok_or_else(|| TemplateError::MissingPlaceholder(placeholder.name.clone()))?;

        Ok(placeholder
            .transforms
            .iter()
            .fold(value.clone(), |acc, transform| transform.apply(&acc)))
    }
}
