//! Resource configuration and per-call options.
//!
//! [`ResourceConfig`] replaces process-wide registries with an explicit value:
//! build it once at startup, apply [`ConfigUpdate`]s while configuring, then
//! share it read-only with every generator call.

use crate::{
    error::ConfigurationError,
    route::{DefaultRouteFactory, RouteFactory},
    template::{ActionDefinition, ActionTemplate, default_actions},
};
use indexmap::IndexMap;
use serde::Deserialize;
use std::sync::Arc;

/// The strategies used to materialize generator output.
#[derive(Debug, Clone)]
pub struct RouteClasses {
    /// Builds each [`RouteSpec`](crate::RouteSpec).
    pub route: Arc<dyn RouteFactory>,
}

impl Default for RouteClasses {
    fn default() -> Self {
        Self {
            route: Arc::new(DefaultRouteFactory),
        }
    }
}

/// A point-in-time copy of a [`ResourceConfig`].
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// Materialization strategies.
    pub classes: RouteClasses,
    /// Action templates in iteration order.
    pub types: IndexMap<String, ActionTemplate>,
}

/// Overrides merged into a [`ResourceConfig`].
///
/// Unset fields leave the current value untouched.
#[derive(Debug, Default)]
pub struct ConfigUpdate {
    /// Replacement route factory.
    pub route: Option<Arc<dyn RouteFactory>>,
    /// Action definitions merged over the current templates.
    pub types: IndexMap<String, ActionDefinition>,
}

impl ConfigUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the route factory.
    pub fn route_factory(mut self, factory: impl RouteFactory) -> Self {
        self.route = Some(Arc::new(factory));
        self
    }

    /// Add or override an action.
    pub fn action(mut self, key: impl Into<String>, def: impl Into<ActionDefinition>) -> Self {
        self.types.insert(key.into(), def.into());
        self
    }
}

/// The action template registry consulted by the generator.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    classes: RouteClasses,
    types: IndexMap<String, ActionTemplate>,
}

impl ResourceConfig {
    /// A configuration holding the built-in actions and the default factory.
    pub fn new() -> Self {
        Self {
            classes: RouteClasses::default(),
            types: default_actions(),
        }
    }

    /// A configuration with no actions at all.
    pub fn empty() -> Self {
        Self {
            classes: RouteClasses::default(),
            types: IndexMap::new(),
        }
    }

    /// Merge `update` into this configuration.
    ///
    /// Existing keys are overridden in place, new keys are appended. Nothing
    /// is applied if any definition is invalid.
    pub fn configure(&mut self, update: ConfigUpdate) -> Result<(), ConfigurationError> {
        let types = update
            .types
            .into_iter()
            .map(|(key, def)| def.into_template(&key).map(|t| (key, t)))
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(route) = update.route {
            self.classes.route = route;
        }
        self.types.extend(types);
        Ok(())
    }

    /// A copy of the current classes and types.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            classes: self.classes.clone(),
            types: self.types.clone(),
        }
    }

    /// The action templates in iteration order.
    pub fn types(&self) -> &IndexMap<String, ActionTemplate> {
        &self.types
    }

    /// The route factory.
    pub fn route_factory(&self) -> &dyn RouteFactory {
        self.classes.route.as_ref()
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for one resource generation call.
///
/// ```toml
/// only = ["index", "show"]
/// scope = "/api"
///
/// [types.search]
/// template = "/{resource}/search"
/// method = "GET"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceOptions {
    /// Keep only these actions.
    pub only: Option<Vec<String>>,
    /// Drop these actions.
    pub except: Option<Vec<String>>,
    /// Actions merged over the configured templates for this call.
    pub types: IndexMap<String, ActionDefinition>,
    /// Path prefix for every generated template.
    pub scope: String,
}

impl ResourceOptions {
    /// Options that generate every configured action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the listed actions.
    pub fn only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Drop the listed actions.
    pub fn except<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Add or override an action for this call.
    pub fn action(mut self, key: impl Into<String>, def: impl Into<ActionDefinition>) -> Self {
        self.types.insert(key.into(), def.into());
        self
    }

    /// Prefix every template with `scope`.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}
