//! Action templates: the per-action recipe a resource's routes are built from.
//!
//! A template is a path with `{name}` placeholders. `{resource}` is bound at
//! generation time; every other placeholder is left for the router, optionally
//! restricted by a regex constraint.
//!
//! The built-in set generates the conventional CRUD layout (version segment
//! omitted):
//!
//! ```text
//! index    GET     /{resource}(.{type})?
//! show     GET     /{resource}/{id}(.{type})?
//! add      GET     /{resource}/add
//! create   POST    /{resource}(.{type})?
//! edit     GET     /{resource}/{id}/edit
//! update   PUT     /{resource}/{id}(.{type})?
//! delete   DELETE  /{resource}/{id}(.{type})?
//! ```

use crate::error::ConfigurationError;
use http::Method;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder bound to the normalized resource name.
pub const RESOURCE_PLACEHOLDER: &str = "resource";

/// Record identifier: a 24-digit hex object id or a decimal integer.
pub const ID_PATTERN: &str = "[0-9a-fA-F]{24}|[0-9]+";

/// Response format extension, e.g. `json`.
pub const FORMAT_PATTERN: &str = "[A-Za-z0-9]+";

/// `major[.minor]` version segment.
///
/// Components are at most nine digits so every match fits a `u32`.
pub const VERSION_PATTERN: &str = r"[0-9]{1,9}(?:\.[0-9]{1,9})?";

/// A validated description of one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    template: String,
    method: Method,
    action: Option<String>,
    constraints: IndexMap<String, String>,
    formatted: bool,
    versioned: bool,
}

impl ActionTemplate {
    /// Create a versioned, unformatted template.
    pub fn new(template: impl Into<String>, method: Method) -> Self {
        Self {
            template: template.into(),
            method,
            action: None,
            constraints: IndexMap::new(),
            formatted: false,
            versioned: true,
        }
    }

    /// Restrict a placeholder to values matching `pattern`.
    pub fn constraint(mut self, placeholder: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints.insert(placeholder.into(), pattern.into());
        self
    }

    /// Bind a different action name than the template's key.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Accept an optional `.{type}` format suffix.
    pub fn formatted(mut self) -> Self {
        self.formatted = true;
        self
    }

    /// Drop the optional `/v{version}` segment.
    pub fn unversioned(mut self) -> Self {
        self.versioned = false;
        self
    }

    /// The path template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The required HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The action bound for this template under `key`.
    pub fn action_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.action.as_deref().unwrap_or(key)
    }

    /// Placeholder constraints.
    pub fn constraints(&self) -> &IndexMap<String, String> {
        &self.constraints
    }

    /// Whether the template accepts a format suffix.
    pub fn is_formatted(&self) -> bool {
        self.formatted
    }

    /// Whether the template accepts a version segment.
    pub fn is_versioned(&self) -> bool {
        self.versioned
    }

    /// Check that every constraint compiles.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (placeholder, pattern) in &self.constraints {
            Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
                placeholder: placeholder.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// An unvalidated action description, as supplied by callers or loaded from
/// configuration files.
///
/// ```toml
/// [types.search]
/// template = "/{resource}/search"
/// method = "GET"
/// formatted = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionDefinition {
    /// Path template.
    pub template: Option<String>,
    /// HTTP method name.
    pub method: Option<String>,
    /// Explicit action name override.
    pub action: Option<String>,
    /// Placeholder constraints.
    pub constraints: IndexMap<String, String>,
    /// Accept an optional format suffix.
    pub formatted: bool,
    /// Accept an optional version segment.
    pub versioned: bool,
}

impl Default for ActionDefinition {
    fn default() -> Self {
        Self {
            template: None,
            method: None,
            action: None,
            constraints: IndexMap::new(),
            formatted: false,
            versioned: true,
        }
    }
}

impl ActionDefinition {
    /// Validate this definition into a template registered under `key`.
    pub fn into_template(self, key: &str) -> Result<ActionTemplate, ConfigurationError> {
        let template = self
            .template
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingTemplate {
                action: key.to_owned(),
            })?;
        let raw = self
            .method
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingMethod {
                action: key.to_owned(),
            })?;
        let method = Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).map_err(
            |_| ConfigurationError::InvalidMethod {
                action: key.to_owned(),
                method: raw.clone(),
            },
        )?;

        let built = ActionTemplate {
            template,
            method,
            action: self.action,
            constraints: self.constraints,
            formatted: self.formatted,
            versioned: self.versioned,
        };
        built.validate()?;
        Ok(built)
    }
}

impl From<ActionTemplate> for ActionDefinition {
    fn from(t: ActionTemplate) -> Self {
        Self {
            template: Some(t.template),
            method: Some(t.method.as_str().to_owned()),
            action: t.action,
            constraints: t.constraints,
            formatted: t.formatted,
            versioned: t.versioned,
        }
    }
}

/// The built-in actions, in their fixed order.
pub fn default_actions() -> IndexMap<String, ActionTemplate> {
    let item = "/{resource}/{id}";
    [
        ("index", ActionTemplate::new("/{resource}", Method::GET).formatted()),
        (
            "show",
            ActionTemplate::new(item, Method::GET)
                .constraint("id", ID_PATTERN)
                .formatted(),
        ),
        ("add", ActionTemplate::new("/{resource}/add", Method::GET)),
        ("create", ActionTemplate::new("/{resource}", Method::POST).formatted()),
        (
            "edit",
            ActionTemplate::new("/{resource}/{id}/edit", Method::GET).constraint("id", ID_PATTERN),
        ),
        (
            "update",
            ActionTemplate::new(item, Method::PUT)
                .constraint("id", ID_PATTERN)
                .formatted(),
        ),
        (
            "delete",
            ActionTemplate::new(item, Method::DELETE)
                .constraint("id", ID_PATTERN)
                .formatted(),
        ),
    ]
    .into_iter()
    .map(|(key, template)| (key.to_owned(), template))
    .collect()
}

/// One piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text. An unterminated `{` stays part of the text.
    Text(&'a str),
    /// A placeholder name, without its braces.
    Placeholder(&'a str),
}

/// Split a template into literal text and placeholders, in order.
pub fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else { break };
        if start > 0 {
            out.push(Segment::Text(&rest[..start]));
        }
        out.push(Segment::Placeholder(&tail[1..end]));
        rest = &tail[end + 1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Substitute the given placeholders in a single pass.
///
/// Placeholders without a binding are kept verbatim, so router-native
/// placeholders survive.
pub fn interpolate(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());

    for segment in segments(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(name) => match bindings.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => out.push_str(value),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }

    out
}
