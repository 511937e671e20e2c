//! # restive-core
//!
//! Core types and traits for restive: RESTful resource routes and versioned
//! action dispatch.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! controllers, hooks and route factories that don't need the full
//! `restive-std` implementation.
//!
//! # Two Halves
//!
//! ## Route generation (configuration time)
//!
//! - [`ActionTemplate`] - one CRUD action: path, method, constraints
//! - [`ResourceConfig`] - the registry of templates and the [`RouteFactory`]
//! - [`ResourceOptions`] - `only` / `except` / `types` / `scope` for one call
//! - [`RouteSpec`] - the generated unit handed to a router
//!
//! ## Versioned dispatch (request time)
//!
//! - [`ApiVersion`] and [`VersionedMethodName`] - the `show_2_1` naming convention
//! - [`ActionTable`] - a controller's methods indexed by action and version
//! - [`Controller`] - the terminal endpoint
//! - [`DispatchContext`] - per-request state threaded through the stages
//! - [`Hook`] - the resolve / call extension points
//!
//! # Error Types
//!
//! - [`RestiveError`] - Top-level error type
//! - [`ConfigurationError`] - Generation-time failures
//! - [`DispatchError`] - Request-time failures, including version mismatches
//! - [`RoutingError`] - Unmatched requests

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod config;
mod context;
mod error;
mod hook;
mod params;
mod route;
mod template;
mod version;

// Re-exports
pub use action::{ActionHandle, ActionTable, Controller};
pub use config::{ConfigSnapshot, ConfigUpdate, ResourceConfig, ResourceOptions, RouteClasses};
pub use context::{DispatchContext, RequestVersionState, VersionSelection};
pub use error::{BoxError, ConfigurationError, DispatchError, RestiveError, RoutingError};
pub use hook::{DynHook, Hook, HookFuture, HookResult, Stage};
pub use params::{Params, keys};
pub use route::{
    DefaultRouteFactory, RouteDraft, RouteFactory, RouteSpec, TemplatePart, optional,
    template_parts,
};
pub use template::{
    ActionDefinition, ActionTemplate, FORMAT_PATTERN, ID_PATTERN, RESOURCE_PLACEHOLDER,
    Segment, VERSION_PATTERN, default_actions, interpolate, segments,
};
pub use version::{
    ApiVersion, ParsedMethod, SEPARATOR, VersionParseError, VersionedMethodName,
};

pub use http::Method;
