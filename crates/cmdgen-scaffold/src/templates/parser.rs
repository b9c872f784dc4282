//! Template syntax parser
//!
//! Splits template text into literal text and placeholders. A placeholder is
//! `<open> key [| filter]... <close>`, for example `<%= commandName | pascal %>`.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::templates::{
    error::TemplateError,
    resolver::{CaseTransform, Placeholder},
};

static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("placeholder key pattern is valid")
});

/// Whether a string is usable as a placeholder key
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Opening and closing markers around a placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    /// Opening marker
    pub open: String,
    /// Closing marker
    pub close: String,
}

impl Delimiters {
    /// Create delimiters; both markers must be non-empty
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, TemplateError> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() || close.is_empty() {
            return Err(TemplateError::InvalidSyntax {
                line: 0,
                message: "placeholder delimiters must not be empty".to_string(),
            });
        }
        Ok(Self { open, close })
    }

    /// Content delimiters: `<%= key %>`, which leave Liquid's `{{ }}` alone
    pub fn content() -> Self {
        Self {
            open: "<%=".to_string(),
            close: "%>".to_string(),
        }
    }

    /// Path delimiters: `__key__`, valid in file names on every platform
    pub fn path() -> Self {
        Self {
            open: "__".to_string(),
            close: "__".to_string(),
        }
    }
}

/// Represents a parsed template element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    /// Plain text content
    Text(String),
    /// A placeholder to substitute
    Placeholder(Placeholder),
}

/// Parsed template structure
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Template elements in source order
    pub elements: Vec<TemplateElement>,
    /// All placeholder names referenced
    pub placeholder_names: BTreeSet<String>,
}

/// Template parser
pub struct TemplateParser;

impl TemplateParser {
    /// Parse template content
    ///
    /// Malformed placeholders (unterminated, bad key, unknown filter) are
    /// errors carrying the line number.
    pub fn parse(content: &str, delimiters: &Delimiters) -> Result<ParsedTemplate, TemplateError> {
        Parser::new(content, delimiters, None).parse()
    }

    /// Parse a path component
    ///
    /// File names use short markers like `__` that also appear in ordinary
    /// names (`__init__.py`, `___id__.md`), so anything that is not a
    /// well-formed placeholder for a key accepted by `is_bound` is kept as
    /// literal text. Scanning resumes one character after a rejected marker.
    pub fn parse_lenient(
        content: &str,
        delimiters: &Delimiters,
        is_bound: impl Fn(&str) -> bool,
    ) -> Result<ParsedTemplate, TemplateError> {
        Parser::new(content, delimiters, Some(&is_bound)).parse()
    }
}

/// Internal parser state
struct Parser<'a> {
    content: &'a str,
    delimiters: &'a Delimiters,
    /// Set in lenient mode; keys it rejects stay literal
    is_bound: Option<&'a dyn Fn(&str) -> bool>,
    position: usize,
    line: usize,
    placeholder_names: BTreeSet<String>,
}

impl<'a> Parser<'a> {
    fn new(
        content: &'a str,
        delimiters: &'a Delimiters,
        is_bound: Option<&'a dyn Fn(&str) -> bool>,
    ) -> Self {
        Self {
            content,
            delimiters,
            is_bound,
            position: 0,
            line: 1,
            placeholder_names: BTreeSet::new(),
        }
    }

    fn parse(mut self) -> Result<ParsedTemplate, TemplateError> {
        let mut elements: Vec<TemplateElement> = Vec::new();

        while self.position < self.content.len() {
            let rest = &self.content[self.position..];
            let element = match rest.find(&self.delimiters.open) {
                Some(0) => self.parse_placeholder()?,
                Some(offset) => TemplateElement::Text(self.take_text(offset)),
                None => TemplateElement::Text(self.take_text(rest.len())),
            };

            // Merge adjacent text so lenient literals don't fragment output
            if let TemplateElement::Text(text) = &element {
                if let Some(TemplateElement::Text(prev)) = elements.last_mut() {
                    prev.push_str(text);
                    continue;
                }
            }
            elements.push(element);
        }

        Ok(ParsedTemplate {
            elements,
            placeholder_names: self.placeholder_names,
        })
    }

    fn take_text(&mut self, len: usize) -> String {
        let text = &self.content[self.position..self.position + len];
        self.advance(len);
        text.to_string()
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.content[self.position..self.position + len];
        self.line += consumed.matches('\n').count();
        self.position += len;
    }

    fn parse_placeholder(&mut self) -> Result<TemplateElement, TemplateError> {
        let open_len = self.delimiters.open.len();
        let start_line = self.line;
        let body_start = self.position + open_len;
        let rest = &self.content[body_start..];

        let Some(close_offset) = rest.find(&self.delimiters.close) else {
            if self.is_bound.is_some() {
                return Ok(self.literal_marker());
            }
            return Err(TemplateError::InvalidSyntax {
                line: start_line,
                message: format!("Unterminated placeholder, expected '{}'", self.delimiters.close),
            });
        };

        let body = &rest[..close_offset];
        match (parse_placeholder_body(body), self.is_bound) {
            (Ok(placeholder), is_bound)
                if is_bound.map_or(true, |f| f(placeholder.name.as_str())) =>
            {
                self.advance(open_len + close_offset + self.delimiters.close.len());
                self.placeholder_names.insert(placeholder.name.clone());
                Ok(TemplateElement::Placeholder(placeholder))
            }
            (Err(message), None) => Err(TemplateError::InvalidSyntax {
                line: start_line,
                message,
            }),
            _ => Ok(self.literal_marker()),
        }
    }

    /// Emit the first character of a rejected opening marker as text
    fn literal_marker(&mut self) -> TemplateElement {
        let step = self.delimiters.open.chars().next().map_or(1, char::len_utf8);
        TemplateElement::Text(self.take_text(step))
    }
}

fn parse_placeholder_body(body: &str) -> Result<Placeholder, String> {
    let mut parts = body.split('|').map(str::trim);
    let key = parts.next().unwrap_or_default();

    if key.is_empty() {
        return Err("Empty placeholder".to_string());
    }
    if !is_valid_key(key) {
        return Err(format!("Invalid placeholder key: '{}'", key));
    }

    let mut placeholder = Placeholder::new(key);
    for filter in parts {
        let transform = CaseTransform::from_filter(filter)
            .ok_or_else(|| format!("Unknown filter '{}' on placeholder '{}'", filter, key))?;
        placeholder = placeholder.with_transform(transform);
    }
    Ok(placeholder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ParsedTemplate, TemplateError> {
        TemplateParser::parse(content, &Delimiters::content())
    }

    #[test]
    fn test_parse_plain_text() {
        let parsed = parse("{% return object %}").unwrap();
        assert_eq!(
            parsed.elements,
            vec![TemplateElement::Text("{% return object %}".to_string())]
        );
        assert!(parsed.placeholder_names.is_empty());
    }

    #[test]
    fn test_parse_placeholder_with_surrounding_text() {
        let parsed = parse("commands/<%= commandName %>/build").unwrap();
        assert_eq!(
            parsed.elements,
            vec![
                TemplateElement::Text("commands/".to_string()),
                TemplateElement::Placeholder(Placeholder::new("commandName")),
                TemplateElement::Text("/build".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_filters() {
        let parsed = parse("<%= commandName | snake | upper %>").unwrap();
        assert_eq!(
            parsed.elements,
            vec![TemplateElement::Placeholder(
                Placeholder::new("commandName")
                    .with_transform(CaseTransform::SnakeCase)
                    .with_transform(CaseTransform::UpperCase)
            )]
        );
    }

    #[test]
    fn test_parse_leaves_liquid_alone() {
        let parsed = parse("{{ object.valid }} <%= commandName %>").unwrap();
        assert_eq!(parsed.placeholder_names.len(), 1);
        assert!(parsed.placeholder_names.contains("commandName"));
    }

    #[test]
    fn test_parse_unterminated_reports_line() {
        let err = parse("line one\nline two <%= commandName").unwrap_err();
        match err {
            TemplateError::InvalidSyntax { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_placeholder() {
        assert!(parse("<%= %>").is_err());
    }

    #[test]
    fn test_parse_unknown_filter() {
        let err = parse("<%= commandName | title %>").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_parse_lenient_keeps_malformed_as_text() {
        let parsed =
            TemplateParser::parse_lenient("my__file.liquid", &Delimiters::path(), |_| true).unwrap();
        assert_eq!(
            parsed.elements,
            vec![TemplateElement::Text("my__file.liquid".to_string())]
        );
    }

    #[test]
    fn test_parse_lenient_path_placeholder() {
        let parsed =
            TemplateParser::parse_lenient("__commandName__.liquid", &Delimiters::path(), |_| true)
                .unwrap();
        assert_eq!(
            parsed.elements,
            vec![
                TemplateElement::Placeholder(Placeholder::new("commandName")),
                TemplateElement::Text(".liquid".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_lenient_unbound_keys_stay_literal() {
        let is_bound = |key: &str| key == "commandName";

        let parsed =
            TemplateParser::parse_lenient("__helpers__", &Delimiters::path(), is_bound).unwrap();
        assert_eq!(
            parsed.elements,
            vec![TemplateElement::Text("__helpers__".to_string())]
        );
        assert!(parsed.placeholder_names.is_empty());

        let parsed =
            TemplateParser::parse_lenient("___commandName__.md", &Delimiters::path(), is_bound)
                .unwrap();
        assert_eq!(
            parsed.elements,
            vec![
                TemplateElement::Text("_".to_string()),
                TemplateElement::Placeholder(Placeholder::new("commandName")),
                TemplateElement::Text(".md".to_string()),
            ]
        );
    }

    #[test]
    fn test_delimiters_must_not_be_empty() {
        assert!(Delimiters::new("", "}}").is_err());
        assert!(Delimiters::new("{{", "}}").is_ok());
    }
}
