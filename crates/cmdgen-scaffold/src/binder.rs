//! Assembles the rendering context from a parameter binding

use std::collections::BTreeMap;

use tracing::warn;

use crate::{
    error::ScaffoldError,
    models::{ParameterBinding, RenderOptions, TemplateContext},
    templates::parser::is_valid_key,
};

/// Builds the flat placeholder mapping the renderer consumes
///
/// Extra parameters can be layered under the derived names. Derived names
/// always take precedence so the command name in paths and contents stays
/// consistent.
#[derive(Debug, Clone)]
pub struct ParameterBinder<'a> {
    binding: &'a ParameterBinding,
    extra: BTreeMap<String, String>,
    options: RenderOptions,
}

impl<'a> ParameterBinder<'a> {
    /// Create a binder over a derived binding
    pub fn new(binding: &'a ParameterBinding) -> Self {
        Self {
            binding,
            extra: BTreeMap::new(),
            options: RenderOptions::default(),
        }
    }

    /// Add an extra parameter
    ///
    /// The key must be an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    pub fn with_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ScaffoldError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(ScaffoldError::InvalidInput(format!(
                "parameter name '{}' is not a valid identifier",
                key
            )));
        }
        self.extra.insert(key, value.into());
        Ok(self)
    }

    /// Add several extra parameters
    pub fn with_params<K, V>(
        self,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ScaffoldError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .try_fold(self, |binder, (key, value)| binder.with_param(key, value))
    }

    /// Set rendering options (delimiters)
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Produce the rendering context
    pub fn bind(&self) -> TemplateContext {
        let mut values = self.extra.clone();
        for (key, value) in self.binding.iter() {
            if let Some(shadowed) = values.insert(key.to_string(), value.to_string()) {
                warn!(
                    key,
                    ignored = %shadowed,
                    "Extra parameter shadows a derived name and was ignored"
                );
            }
        }

        TemplateContext {
            values,
            options: self.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::Delimiters;

    fn binding() -> ParameterBinding {
        [("commandName", "ship"), ("commandNamePlural", "ships")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_bind_identity() {
        let binding = binding();
        let ctx = ParameterBinder::new(&binding).bind();
        assert_eq!(ctx.get("commandName"), Some("ship"));
        assert_eq!(ctx.values.len(), 2);
        assert_eq!(ctx.options, RenderOptions::default());
    }

    #[test]
    fn test_bind_extra_params() {
        let binding = binding();
        let ctx = ParameterBinder::new(&binding)
            .with_param("modelName", "order")
            .unwrap()
            .bind();
        assert_eq!(ctx.get("modelName"), Some("order"));
        assert_eq!(ctx.get("commandName"), Some("ship"));
    }

    #[test]
    fn test_derived_names_win() {
        let binding = binding();
        let ctx = ParameterBinder::new(&binding)
            .with_params([("commandName", "other")])
            .unwrap()
            .bind();
        assert_eq!(ctx.get("commandName"), Some("ship"));
    }

    #[test]
    fn test_rejects_invalid_key() {
        let binding = binding();
        let result = ParameterBinder::new(&binding).with_param("bad-key", "x");
        assert!(matches!(result, Err(ScaffoldError::InvalidInput(_))));
    }

    #[test]
    fn test_with_options() {
        let binding = binding();
        let options = RenderOptions {
            content_delimiters: Delimiters::new("{{", "}}").unwrap(),
            path_delimiters: Delimiters::path(),
        };
        let ctx = ParameterBinder::new(&binding)
            .with_options(options.clone())
            .bind();
        assert_eq!(ctx.options, options);
    }
}
