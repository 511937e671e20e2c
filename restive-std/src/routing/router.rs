//! Regex-backed router for generated resource routes.
//!
//! Each [`RouteSpec`] is compiled to one anchored expression: placeholders
//! become named groups (constrained where the route says so), optional
//! fragments become optional groups. Routes are tried in registration order
//! and the first one whose method and path both match wins.

use crate::resource::generate;
use regex::Regex;
use restive_core::{
    ConfigurationError, Method, Params, ResourceConfig, ResourceOptions, RouteSpec, Segment,
    TemplatePart, segments, template_parts,
};
use std::fmt;

/// Pattern for placeholders without a constraint: one non-empty segment.
const SEGMENT_PATTERN: &str = "[^/]+?";

struct CompiledRoute {
    spec: RouteSpec,
    matcher: Regex,
    captures: Vec<String>,
}

impl CompiledRoute {
    fn compile(spec: RouteSpec) -> Result<Self, ConfigurationError> {
        let mut pattern = String::from("^");
        let mut captures = Vec::new();

        for part in template_parts(spec.template()) {
            match part {
                TemplatePart::Literal(text) => push_text(&spec, text, &mut pattern, &mut captures),
                TemplatePart::Optional(text) => {
                    pattern.push_str("(?:");
                    push_text(&spec, text, &mut pattern, &mut captures);
                    pattern.push_str(")?");
                }
            }
        }
        pattern.push('$');

        let matcher = Regex::new(&pattern).map_err(|source| ConfigurationError::InvalidTemplate {
            template: spec.template().to_owned(),
            source,
        })?;

        Ok(Self {
            spec,
            matcher,
            captures,
        })
    }

    fn matches(&self, method: &Method, path: &str) -> Option<Params> {
        if self.spec.method() != method {
            return None;
        }
        let caps = self.matcher.captures(path)?;

        let mut params = self.spec.params().clone();
        for name in &self.captures {
            if let Some(value) = caps.name(name) {
                params.insert(name.as_str(), value.as_str());
            }
        }
        Some(params)
    }
}

fn push_text(spec: &RouteSpec, text: &str, pattern: &mut String, captures: &mut Vec<String>) {
    for segment in segments(text) {
        match segment {
            Segment::Text(literal) => pattern.push_str(&regex::escape(literal)),
            Segment::Placeholder(name) => {
                let constraint = spec
                    .constraints()
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or(SEGMENT_PATTERN);
                pattern.push_str(&format!("(?P<{name}>(?:{constraint}))"));
                captures.push(name.to_owned());
            }
        }
    }
}

/// Matches requests against registered [`RouteSpec`]s.
///
/// # Example
///
/// ```rust,ignore
/// let mut router = ResourceRouter::new();
/// router.resource(&ResourceConfig::default(), "posts", &ResourceOptions::new())?;
///
/// let params = router.route(&Method::GET, "/v2/posts/42.json").unwrap();
/// assert_eq!(params.action(), Some("show"));
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("version"), Some("2"));
/// ```
#[derive(Default)]
pub struct ResourceRouter {
    routes: Vec<CompiledRoute>,
}

impl ResourceRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one route.
    pub fn connect(&mut self, spec: RouteSpec) -> Result<&mut Self, ConfigurationError> {
        self.routes.push(CompiledRoute::compile(spec)?);
        Ok(self)
    }

    /// Generate the routes for `resource` and register each of them.
    ///
    /// Returns the number of routes registered.
    pub fn resource(
        &mut self,
        config: &ResourceConfig,
        resource: &str,
        options: &ResourceOptions,
    ) -> Result<usize, ConfigurationError> {
        let routes = generate(config, resource, options)?;
        let count = routes.len();
        for spec in routes {
            self.connect(spec)?;
        }
        Ok(count)
    }

    /// Match a request, returning the route bindings plus captured placeholders.
    pub fn route(&self, method: &Method, path: &str) -> Option<Params> {
        let params = self
            .routes
            .iter()
            .find_map(|route| route.matches(method, path));

        #[cfg(feature = "tracing")]
        {
            match &params {
                Some(params) => tracing::trace!(%method, path, %params, "route matched"),
                None => tracing::trace!(%method, path, "no route matched"),
            }
        }

        params
    }

    /// Registered routes, in match order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteSpec> {
        self.routes.iter().map(|route| &route.spec)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for ResourceRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes()).finish()
    }
}

impl fmt::Display for ResourceRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in self.routes() {
            writeln!(f, "{spec}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use restive_core::{ApiVersion, RouteDraft, keys};

    fn posts() -> ResourceRouter {
        let mut router = ResourceRouter::new();
        router
            .resource(&ResourceConfig::default(), "posts", &ResourceOptions::new())
            .unwrap();
        router
    }

    #[test]
    fn matches_generated_routes() {
        let router = posts();
        assert_eq!(router.len(), 7);

        let params = router.route(&Method::GET, "/posts").unwrap();
        assert_eq!(params.action(), Some("index"));
        assert_eq!(params.controller(), Some("posts"));
        assert_eq!(params.get(keys::VERSION), None);

        let params = router.route(&Method::POST, "/posts.json").unwrap();
        assert_eq!(params.action(), Some("create"));
        assert_eq!(params.format(), Some("json"));

        let params = router.route(&Method::DELETE, "/posts/42").unwrap();
        assert_eq!(params.action(), Some("delete"));
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn captures_version_and_format() {
        let params = posts().route(&Method::GET, "/v2.1/posts/42.json").unwrap();
        assert_eq!(params.action(), Some("show"));
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get(keys::VERSION), Some("2.1"));
        assert_eq!(params.format(), Some("json"));
    }

    #[test]
    fn oversized_versions_do_not_route() {
        let router = posts();
        assert!(router.route(&Method::GET, "/v99999999999/posts/1").is_none());
        assert!(router.route(&Method::GET, "/v1.99999999999/posts/1").is_none());

        let params = router.route(&Method::GET, "/v999999999/posts/1").unwrap();
        assert_eq!(params.version().unwrap(), Some(ApiVersion::new(999_999_999, 0)));
    }

    #[test]
    fn constraints_keep_literal_segments_reachable() {
        let router = posts();
        assert_eq!(
            router.route(&Method::GET, "/posts/add").unwrap().action(),
            Some("add")
        );
        assert_eq!(
            router
                .route(&Method::GET, "/posts/4f3c2b1a0e9d8c7b6a5f4e3d/edit")
                .unwrap()
                .action(),
            Some("edit")
        );
        assert!(router.route(&Method::GET, "/posts/abc").is_none());
    }

    #[test]
    fn method_must_match() {
        let router = posts();
        assert!(router.route(&Method::PATCH, "/posts/1").is_none());
        assert!(router.route(&Method::GET, "/comments").is_none());
    }

    #[test]
    fn literals_are_escaped() {
        let mut router = ResourceRouter::new();
        router
            .connect(RouteSpec::new(RouteDraft {
                template: "/feed.rss".into(),
                method: Method::GET,
                params: Params::new().with(keys::ACTION, "feed"),
                constraints: IndexMap::new(),
            }))
            .unwrap();

        assert!(router.route(&Method::GET, "/feed.rss").is_some());
        assert!(router.route(&Method::GET, "/feedXrss").is_none());
    }

    #[test]
    fn invalid_templates_are_rejected() {
        let mut router = ResourceRouter::new();
        let err = router
            .connect(RouteSpec::new(RouteDraft {
                template: "/{id}/{id}".into(),
                method: Method::GET,
                params: Params::new(),
                constraints: IndexMap::new(),
            }))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidTemplate { .. }));
    }

    #[test]
    fn lists_routes() {
        let mut router = ResourceRouter::new();
        router
            .resource(
                &ResourceConfig::default(),
                "posts",
                &ResourceOptions::new().only(["index"]),
            )
            .unwrap();
        assert_eq!(
            router.to_string(),
            "GET     (/v{version})?/posts(.{type})? {action: index, controller: posts}\n"
        );
    }
}
