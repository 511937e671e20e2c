//! # Resource Route Generator
//!
//! Expands a resource name into the ordered list of CRUD routes described by
//! a [`ResourceConfig`].
//!
//! ```rust,ignore
//! let config = ResourceConfig::default();
//! let routes = generate(&config, "Post", &ResourceOptions::new().only(["index", "show"]))?;
//!
//! assert_eq!(routes[0].template(), "(/v{version})?/posts(.{type})?");
//! assert_eq!(routes[1].template(), "(/v{version})?/posts/{id}(.{type})?");
//! ```
//!
//! Generation never registers anything; hand the result to a router (or use
//! [`ResourceRouter::resource`](crate::routing::ResourceRouter::resource)).

use indexmap::IndexMap;
use inflector::Inflector;
use restive_core::{
    ActionTemplate, ConfigurationError, FORMAT_PATTERN, Params, RESOURCE_PLACEHOLDER,
    ResourceConfig, ResourceOptions, RouteDraft, RouteSpec, VERSION_PATTERN, interpolate, keys,
    optional,
};

/// Placeholder carrying the requested API version.
pub const VERSION_PLACEHOLDER: &str = "version";

/// Placeholder carrying the requested response format.
pub const TYPE_PLACEHOLDER: &str = "type";

/// Nouns pluralized by hand, in singular and plural form. Inflector's rules
/// mangle some of these (`person` becomes `personople`).
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

/// Normalize a resource name to its plural, path-safe form.
///
/// `"Post"`, `"post"` and `"posts"` all yield `"posts"`; `"BlogPost"` yields
/// `"blog_posts"`. Only the last word is pluralized.
pub fn normalize(resource: &str) -> Result<String, ConfigurationError> {
    let snake = resource.trim().to_snake_case();
    if snake.is_empty() {
        return Err(ConfigurationError::EmptyResourceName);
    }

    Ok(match snake.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", pluralize(last)),
        None => pluralize(&snake),
    })
}

fn pluralize(word: &str) -> String {
    IRREGULAR_NOUNS
        .iter()
        .find(|(singular, plural)| word == *singular || word == *plural)
        .map(|(_, plural)| (*plural).to_owned())
        .unwrap_or_else(|| word.to_plural())
}

/// The action set a call to [`generate`] will emit, in emission order.
///
/// Caller `types` are merged over the configured templates (overrides keep
/// their position, new keys are appended), then `except` is applied, then
/// `only`.
pub fn effective_actions(
    config: &ResourceConfig,
    options: &ResourceOptions,
) -> Result<IndexMap<String, ActionTemplate>, ConfigurationError> {
    let mut actions = config.types().clone();

    for (key, def) in &options.types {
        let template = def.clone().into_template(key)?;
        actions.insert(key.clone(), template);
    }

    if let Some(except) = &options.except {
        actions.retain(|key, _| !except.iter().any(|e| e == key));
    }
    if let Some(only) = &options.only {
        actions.retain(|key, _| only.iter().any(|o| o == key));
    }

    Ok(actions)
}

/// Generate the routes for `resource`.
pub fn generate(
    config: &ResourceConfig,
    resource: &str,
    options: &ResourceOptions,
) -> Result<Vec<RouteSpec>, ConfigurationError> {
    let name = normalize(resource)?;
    let actions = effective_actions(config, options)?;
    let factory = config.route_factory();

    let routes = actions
        .iter()
        .map(|(key, template)| factory.build(draft(&name, &options.scope, key, template)))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        resource = %name,
        scope = %options.scope,
        routes = routes.len(),
        "generated resource routes"
    );

    Ok(routes)
}

fn draft(resource: &str, scope: &str, key: &str, template: &ActionTemplate) -> RouteDraft {
    let mut path = scope.trim_end_matches('/').to_owned();
    let mut constraints = template.constraints().clone();

    if template.is_versioned() {
        path.push_str(&optional(&format!("/v{{{VERSION_PLACEHOLDER}}}")));
        constraints
            .entry(VERSION_PLACEHOLDER.to_owned())
            .or_insert_with(|| VERSION_PATTERN.to_owned());
    }

    path.push_str(&interpolate(
        template.template(),
        &[(RESOURCE_PLACEHOLDER, resource)],
    ));

    if template.is_formatted() {
        path.push_str(&optional(&format!(".{{{TYPE_PLACEHOLDER}}}")));
        constraints
            .entry(TYPE_PLACEHOLDER.to_owned())
            .or_insert_with(|| FORMAT_PATTERN.to_owned());
    }

    let params = Params::new()
        .with(keys::CONTROLLER, resource)
        .with(keys::ACTION, template.action_name(key))
        .with(keys::METHOD, template.method().as_str());

    RouteDraft {
        template: path,
        method: template.method().clone(),
        params,
        constraints,
    }
}
