//! # restive - RESTful resources with versioned actions
//!
//! `restive` turns a resource name into the conventional set of CRUD routes,
//! and dispatches matched requests to the controller method implementing the
//! requested (or latest) API version.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restive::prelude::*;
//!
//! #[derive(Default)]
//! struct PostsController;
//!
//! #[controller(output = String)]
//! impl PostsController {
//!     pub async fn index(&self) -> Result<String, BoxError> {
//!         Ok("all posts".into())
//!     }
//!
//!     pub async fn show(&self, params: &Params) -> Result<String, BoxError> {
//!         Ok(format!("post {}", params.get("id").unwrap_or_default()))
//!     }
//!
//!     pub async fn show_2_0(&self, params: &Params) -> Result<String, BoxError> {
//!         Ok(format!("{{\"id\": {}}}", params.get("id").unwrap_or_default()))
//!     }
//! }
//!
//! let mut app = Application::new();
//! app.resource(&ResourceConfig::default(), "post", &ResourceOptions::new())?;
//! app.mount("posts", Pipeline::versioned(PostsController));
//!
//! // No version: the latest implementation answers.
//! assert_eq!(app.handle(&Method::GET, "/posts/1").await?, "{\"id\": 1}");
//! // Explicit version: exactly that implementation answers.
//! assert_eq!(app.handle(&Method::GET, "/v0/posts/1").await?, "post 1");
//! ```
//!
//! ## Layers
//!
//! | Layer | Types |
//! |-------|-------|
//! | Configuration | [`ResourceConfig`], [`ResourceOptions`], [`ActionTemplate`] |
//! | Generation | [`resource::generate`], [`RouteSpec`] |
//! | Routing | [`routing::ResourceRouter`] |
//! | Dispatch | [`dispatch::Pipeline`], [`dispatch::VersionHook`], [`Controller`] |

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use restive_core::{
    // Controllers
    ActionHandle,
    ActionTable,
    // Configuration
    ActionDefinition,
    ActionTemplate,
    // Versioning
    ApiVersion,
    // Error types
    BoxError,
    ConfigSnapshot,
    ConfigUpdate,
    ConfigurationError,
    Controller,
    // Routes
    DefaultRouteFactory,
    // Dispatch
    DispatchContext,
    DispatchError,
    DynHook,
    FORMAT_PATTERN,
    Hook,
    HookFuture,
    HookResult,
    ID_PATTERN,
    Method,
    Params,
    ParsedMethod,
    RESOURCE_PLACEHOLDER,
    RequestVersionState,
    ResourceConfig,
    ResourceOptions,
    RestiveError,
    RouteClasses,
    RouteDraft,
    RouteFactory,
    RouteSpec,
    RoutingError,
    SEPARATOR,
    Segment,
    Stage,
    TemplatePart,
    VERSION_PATTERN,
    VersionParseError,
    VersionSelection,
    VersionedMethodName,
    default_actions,
    interpolate,
    keys,
    optional,
    segments,
    template_parts,
};

pub use restive_std::{app, dispatch, hooks, resource, routing, testing};

pub use restive_std::app::Application;

#[cfg(feature = "macros")]
pub use restive_macros::controller;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ActionTemplate, ApiVersion, BoxError, ConfigUpdate, Controller, DispatchError, Hook,
        HookResult, Method, Params, ResourceConfig, ResourceOptions, RestiveError, RouteSpec,
        app::Application,
        dispatch::{Pipeline, VersionHook},
        resource::generate,
        routing::ResourceRouter,
    };

    #[cfg(feature = "macros")]
    pub use crate::controller;
}
