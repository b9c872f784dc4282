//! Template engine for rendering contents and paths
//!
//! Provides rendering with support for:
//! - Verbatim placeholder substitution (`<%= commandName %>`)
//! - Case filters (`<%= commandName | pascal %>`)
//! - Templated file and directory names (`__commandName__.liquid`)
//! - Whole directory trees, rendered all-or-nothing

use std::path::{Component, Path, PathBuf};

use crate::{
    models::{RenderResult, TemplateContent, TemplateContext, TemplateFile},
    templates::{
        error::TemplateError,
        parser::{TemplateElement, TemplateParser},
        resolver::PlaceholderResolver,
    },
};

/// Template engine for rendering templates with variable substitution
///
/// Stateless: every call depends only on its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    /// Create a new template engine
    pub fn new() -> Self {
        Self
    }

    /// Render template text with the provided context
    ///
    /// # Arguments
    /// * `template_content` - The template text to render
    /// * `context` - Bound values and delimiters
    ///
    /// # Returns
    /// Fully substituted text, or an error if any placeholder is malformed
    /// or unbound. No partially substituted text is ever returned.
    pub fn render(
        &self,
        template_content: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let parsed = TemplateParser::parse(template_content, &context.options.content_delimiters)?;
        self.render_elements(&parsed.elements, context)
    }

    /// Render elements into a string
    fn render_elements(
        &self,
        elements: &[TemplateElement],
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        let resolver = PlaceholderResolver::new(&context.values);
        let mut result = String::new();

        for element in elements {
            match element {
                TemplateElement::Text(text) => result.push_str(text),
                TemplateElement::Placeholder(placeholder) => {
                    result.push_str(&resolver.resolve(placeholder)?);
                }
            }
        }

        Ok(result)
    }

    /// Render raw template bytes
    ///
    /// UTF-8 content is rendered as text; anything else is passed through
    /// unchanged.
    pub fn render_content(
        &self,
        raw: &[u8],
        context: &TemplateContext,
    ) -> Result<TemplateContent, TemplateError> {
        match std::str::from_utf8(raw) {
            Ok(text) => Ok(TemplateContent::Text(self.render(text, context)?)),
            Err(_) => Ok(TemplateContent::Binary(raw.to_vec())),
        }
    }

    /// Render every component of a relative template path
    ///
    /// A component may render to several segments when a bound value
    /// contains `/` (nested command names). The result is always a relative
    /// path made of plain segments.
    pub fn render_path(
        &self,
        path: &Path,
        context: &TemplateContext,
    ) -> Result<PathBuf, TemplateError> {
        let mut rendered = PathBuf::new();

        for component in path.components() {
            let name = match component {
                Component::Normal(name) => name,
                Component::CurDir => continue,
                _ => {
                    return Err(TemplateError::InvalidPath {
                        path: path.display().to_string(),
                        message: "template paths must be relative".to_string(),
                    })
                }
            };

            let Some(name) = name.to_str() else {
                // Non-UTF-8 names cannot carry placeholders
                rendered.push(name);
                continue;
            };

            let parsed = TemplateParser::parse_lenient(name, &context.options.path_delimiters, |key| {
                context.values.contains_key(key)
            })?;
            let segment = self.render_elements(&parsed.elements, context)?;
            for part in split_rendered_segment(&segment, path)? {
                rendered.push(part);
            }
        }

        if rendered.as_os_str().is_empty() {
            return Err(TemplateError::InvalidPath {
                path: path.display().to_string(),
                message: "path rendered to nothing".to_string(),
            });
        }

        Ok(rendered)
    }

    /// Render one template file to a known destination
    pub fn render_file(
        &self,
        file: &TemplateFile,
        destination: PathBuf,
        context: &TemplateContext,
    ) -> Result<RenderResult, TemplateError> {
        Ok(RenderResult {
            source: file.path.clone(),
            destination,
            content: self.render_content(&file.content, context)?,
        })
    }

    /// Render every file of a directory template
    ///
    /// Each file's rendered relative path is handed to `destination`, which
    /// places it in the output tree. Names and contents are both
    /// substituted. Fails as a whole on the first error.
    pub fn render_tree(
        &self,
        files: &[TemplateFile],
        context: &TemplateContext,
        destination: impl Fn(&Path) -> PathBuf,
    ) -> Result<Vec<RenderResult>, TemplateError> {
        files
            .iter()
            .map(|file| {
                let relative = self.render_path(&file.path, context)?;
                self.render_file(file, destination(&relative), context)
            })
            .collect()
    }
}

fn split_rendered_segment<'s>(
    segment: &'s str,
    template_path: &Path,
) -> Result<Vec<&'s str>, TemplateError> {
    let invalid = |message: &str| TemplateError::InvalidPath {
        path: template_path.display().to_string(),
        message: message.to_string(),
    };

    if segment.contains('\\') || segment.contains('\0') {
        return Err(invalid("rendered name contains an illegal character"));
    }

    let parts: Vec<&str> = segment.split('/').collect();
    if parts
        .iter()
        .any(|part| part.is_empty() || *part == "." || *part == "..")
    {
        return Err(invalid("rendered name has an empty, '.' or '..' segment"));
    }

    Ok(parts)
}
