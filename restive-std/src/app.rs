//! # Application
//!
//! Ties a [`ResourceRouter`] to one dispatch [`Pipeline`] per controller.
//!
//! ```rust,ignore
//! let config = ResourceConfig::default();
//!
//! let mut app = Application::new();
//! app.resource(&config, "posts", &ResourceOptions::new())?;
//! app.mount("posts", Pipeline::versioned(PostsController::default()));
//!
//! let body = app.handle(&Method::GET, "/v1/posts/42.json").await?;
//! ```

use crate::{
    dispatch::{DynPipeline, Pipeline},
    routing::ResourceRouter,
};
use restive_core::{
    ConfigurationError, Controller, Method, ResourceConfig, ResourceOptions, RestiveError,
    RoutingError,
};
use std::collections::HashMap;

/// A router plus the pipelines its routes dispatch to.
///
/// Every mounted controller produces the same output type `O`.
pub struct Application<O> {
    router: ResourceRouter,
    pipelines: HashMap<String, Box<dyn DynPipeline<O>>>,
}

impl<O> Default for Application<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Application<O> {
    /// Create an application with no routes and no controllers.
    pub fn new() -> Self {
        Self::with_router(ResourceRouter::new())
    }

    /// Create an application around an existing router.
    pub fn with_router(router: ResourceRouter) -> Self {
        Self {
            router,
            pipelines: HashMap::new(),
        }
    }

    /// The router.
    pub fn router(&self) -> &ResourceRouter {
        &self.router
    }

    /// Generate and register the routes for `resource`.
    pub fn resource(
        &mut self,
        config: &ResourceConfig,
        resource: &str,
        options: &ResourceOptions,
    ) -> Result<usize, ConfigurationError> {
        self.router.resource(config, resource, options)
    }

    /// Mount `pipeline` as the controller named `name`.
    ///
    /// `name` is matched against the `controller` binding of routes, which is
    /// the normalized resource name. Mounting a name twice replaces the
    /// earlier pipeline.
    pub fn mount<C>(&mut self, name: impl Into<String>, pipeline: Pipeline<C>) -> &mut Self
    where
        C: Controller<Output = O>,
    {
        let name = name.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(controller = %name, "mounted controller");

        self.pipelines.insert(name, Box::new(pipeline));
        self
    }

    /// Whether a controller is mounted under `name`.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.pipelines.contains_key(name)
    }

    /// Route and dispatch one request.
    pub async fn handle(&self, method: &Method, path: &str) -> Result<O, RestiveError> {
        let params = self
            .router
            .route(method, path)
            .ok_or_else(|| RoutingError::NotFound {
                method: method.clone(),
                path: path.to_owned(),
            })?;

        let name = params.controller().unwrap_or_default();
        let pipeline = self
            .pipelines
            .get(name)
            .ok_or_else(|| RoutingError::UnknownController(name.to_owned()))?;

        let result = pipeline.dispatch_dyn(params).await;

        #[cfg(feature = "tracing")]
        {
            if let Err(err) = &result {
                tracing::warn!(%method, path, error = %err, status = %err.status(), "dispatch failed");
            }
        }

        Ok(result?)
    }
}
