//! Route specifications: the generator's output unit.
//!
//! A [`RouteSpec`] is a finalized path template plus the parameter bindings
//! the router attaches to every request it matches. Templates may contain
//! optional fragments written `(...)?`:
//!
//! ```text
//! /api(/v{version})?/posts/{id}(.{type})?
//! ```

use crate::{
    error::ConfigurationError,
    params::{Params, keys},
};
use http::Method;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;

/// One piece of a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplatePart<'a> {
    /// Always present.
    Literal(&'a str),
    /// Present or absent; written `(...)?`.
    Optional(&'a str),
}

/// Split a template into literal and optional parts.
///
/// An opening `(` without a closing `)?` is treated as literal text.
pub fn template_parts(template: &str) -> Vec<TemplatePart<'_>> {
    let mut parts = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('(') {
        let Some(len) = rest[start..].find(")?") else {
            break;
        };
        if start > 0 {
            parts.push(TemplatePart::Literal(&rest[..start]));
        }
        parts.push(TemplatePart::Optional(&rest[start + 1..start + len]));
        rest = &rest[start + len + 2..];
    }

    if !rest.is_empty() {
        parts.push(TemplatePart::Literal(rest));
    }
    parts
}

/// Wrap a fragment as optional.
pub fn optional(fragment: &str) -> String {
    format!("({fragment})?")
}

/// The values a [`RouteFactory`] materializes a route from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDraft {
    /// Finalized template, `{resource}` already substituted.
    pub template: String,
    /// Required HTTP method.
    pub method: Method,
    /// Bindings: at least `controller`, `action`, `http:method`.
    pub params: Params,
    /// Placeholder constraints.
    pub constraints: IndexMap<String, String>,
}

/// A finalized route ready for registration with a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    template: String,
    method: Method,
    params: Params,
    constraints: IndexMap<String, String>,
}

impl RouteSpec {
    /// Materialize a draft as-is.
    pub fn new(draft: RouteDraft) -> Self {
        Self {
            template: draft.template,
            method: draft.method,
            params: draft.params,
            constraints: draft.constraints,
        }
    }

    /// The path template, optional fragments included.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The HTTP method constraint.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The parameter bindings.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The bound controller.
    pub fn controller(&self) -> &str {
        self.params.controller().unwrap_or_default()
    }

    /// The bound action.
    pub fn action(&self) -> &str {
        self.params.action().unwrap_or_default()
    }

    /// Placeholder constraints.
    pub fn constraints(&self) -> &IndexMap<String, String> {
        &self.constraints
    }

    /// Whether `value` is acceptable for `placeholder`.
    ///
    /// Unconstrained placeholders accept any non-empty single path segment.
    pub fn accepts(&self, placeholder: &str, value: &str) -> bool {
        match self.constraints.get(placeholder) {
            Some(pattern) => Regex::new(&format!("^(?:{pattern})$"))
                .map(|re| re.is_match(value))
                .unwrap_or(false),
            None => !value.is_empty() && !value.contains('/'),
        }
    }

    /// Every concrete template obtained by including or omitting each
    /// optional fragment, the bare form first.
    pub fn variants(&self) -> Vec<String> {
        let parts = template_parts(&self.template);
        let optionals = parts
            .iter()
            .filter(|p| matches!(p, TemplatePart::Optional(_)))
            .count();

        (0..1usize << optionals)
            .map(|mask| {
                let mut bit = 0;
                let mut out = String::new();
                for part in &parts {
                    match part {
                        TemplatePart::Literal(text) => out.push_str(text),
                        TemplatePart::Optional(text) => {
                            if mask & (1 << bit) != 0 {
                                out.push_str(text);
                            }
                            bit += 1;
                        }
                    }
                }
                out
            })
            .collect()
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings: Params = self
            .params
            .iter()
            .filter(|(k, _)| *k != keys::METHOD)
            .collect();
        write!(f, "{:<7} {} {}", self.method.as_str(), self.template, bindings)
    }
}

/// Materializes routes from drafts.
///
/// Swapped through [`ConfigUpdate`](crate::ConfigUpdate) to customize what
/// the generator emits.
pub trait RouteFactory: Send + Sync + fmt::Debug + 'static {
    /// Build a route from a draft.
    fn build(&self, draft: RouteDraft) -> Result<RouteSpec, ConfigurationError>;
}

/// The stock factory: materializes drafts unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRouteFactory;

impl RouteFactory for DefaultRouteFactory {
    fn build(&self, draft: RouteDraft) -> Result<RouteSpec, ConfigurationError> {
        Ok(RouteSpec::new(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ID_PATTERN;

    fn show() -> RouteSpec {
        RouteSpec::new(RouteDraft {
            template: "(/v{version})?/posts/{id}(.{type})?".into(),
            method: Method::GET,
            params: Params::new()
                .with(keys::CONTROLLER, "posts")
                .with(keys::ACTION, "show")
                .with(keys::METHOD, "GET"),
            constraints: [("id".to_owned(), ID_PATTERN.to_owned())]
                .into_iter()
                .collect(),
        })
    }

    #[test]
    fn splits_optional_fragments() {
        assert_eq!(
            template_parts("/api(/v{version})?/posts(.{type})?"),
            [
                TemplatePart::Literal("/api"),
                TemplatePart::Optional("/v{version}"),
                TemplatePart::Literal("/posts"),
                TemplatePart::Optional(".{type}"),
            ]
        );
        assert_eq!(template_parts("/posts(x"), [TemplatePart::Literal("/posts(x")]);
    }

    #[test]
    fn expands_variants_bare_first() {
        assert_eq!(
            show().variants(),
            [
                "/posts/{id}",
                "/v{version}/posts/{id}",
                "/posts/{id}.{type}",
                "/v{version}/posts/{id}.{type}",
            ]
        );
    }

    #[test]
    fn id_constraint() {
        let route = show();
        assert!(route.accepts("id", "507f1f77bcf86cd799439011"));
        assert!(route.accepts("id", "12345"));
        assert!(!route.accepts("id", "abc"));
        assert!(!route.accepts("id", "507f1f77bcf86cd79943901"));
        assert!(route.accepts("slug", "hello-world"));
        assert!(!route.accepts("slug", "a/b"));
    }

    #[test]
    fn displays_like_a_route_listing() {
        assert_eq!(
            show().to_string(),
            "GET     (/v{version})?/posts/{id}(.{type})? {action: show, controller: posts}"
        );
    }
}
