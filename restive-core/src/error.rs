//! Error types for restive.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RestiveError`] - Top-level error type for all restive operations
//! - [`ConfigurationError`] - Malformed templates or resource names (configuration time)
//! - [`DispatchError`] - Version negotiation and invocation failures (request time)
//! - [`RoutingError`] - Request matching failures

use crate::version::ApiVersion;
use http::StatusCode;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all restive operations.
#[derive(Error, Debug)]
pub enum RestiveError {
    /// The resource configuration was rejected.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigurationError),

    /// An error occurred while dispatching a matched request.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// The request could not be matched.
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),
}

impl RestiveError {
    /// The client-facing status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RestiveError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RestiveError::Dispatch(e) => e.status(),
            RestiveError::Routing(e) => e.status(),
        }
    }
}

/// Errors raised while building routes from resource configuration.
///
/// These are configuration-time failures and are never produced while
/// handling a request.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The resource name was empty (or normalized to nothing).
    #[error("resource name must not be empty")]
    EmptyResourceName,

    /// An action definition has no path template.
    #[error("action `{action}` has no template")]
    MissingTemplate {
        /// The action key.
        action: String,
    },

    /// An action definition has no HTTP method binding.
    #[error("action `{action}` has no http method")]
    MissingMethod {
        /// The action key.
        action: String,
    },

    /// An action definition names a method that is not a valid HTTP method.
    #[error("action `{action}` has invalid http method `{method}`")]
    InvalidMethod {
        /// The action key.
        action: String,
        /// The rejected method token.
        method: String,
    },

    /// A placeholder constraint is not a valid regular expression.
    #[error("invalid pattern for placeholder `{placeholder}`")]
    InvalidPattern {
        /// The placeholder the pattern was attached to.
        placeholder: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A route template cannot be compiled into a matcher.
    #[error("route template `{template}` cannot be compiled")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// Two handler methods resolve to the same action version.
    #[error("`{duplicate}` and `{existing}` both implement `{action}` version {version}")]
    DuplicateVersion {
        /// The base action name.
        action: String,
        /// The shared version.
        version: ApiVersion,
        /// The method registered first.
        existing: String,
        /// The method that collided with it.
        duplicate: String,
    },
}

/// Errors that can occur while dispatching a matched request to a controller.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// An explicit version was requested but the controller has no such method.
    #[error("action `{action}` has no implementation for version {version}")]
    VersionNotFound {
        /// The base action name.
        action: String,
        /// The requested version.
        version: ApiVersion,
    },

    /// The request carried a version that is not `major[.minor]`.
    #[error("invalid version `{0}`")]
    InvalidVersion(String),

    /// The controller does not implement the (possibly rewritten) action.
    #[error("no method `{0}` on controller")]
    ActionNotFound(String),

    /// The request parameters carry no action to dispatch.
    #[error("request parameters have no action")]
    MissingAction,

    /// A dispatch hook failed.
    #[error("hook error")]
    Hook(#[source] BoxError),

    /// The controller method returned an error.
    #[error("controller error")]
    Controller(#[source] BoxError),
}

impl DispatchError {
    /// The client-facing status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::VersionNotFound { .. } => StatusCode::NOT_FOUND,
            DispatchError::InvalidVersion(_) => StatusCode::BAD_REQUEST,
            DispatchError::ActionNotFound(_) => StatusCode::NOT_IMPLEMENTED,
            DispatchError::MissingAction
            | DispatchError::Hook(_)
            | DispatchError::Controller(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors that can occur while matching a request against registered routes.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// No route matched the method and path.
    #[error("no route for {method} {path}")]
    NotFound {
        /// The request method.
        method: http::Method,
        /// The request path.
        path: String,
    },

    /// A route matched but no controller is mounted under its name.
    #[error("no controller mounted as `{0}`")]
    UnknownController(String),
}

impl RoutingError {
    /// The client-facing status code for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Hook(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_not_found_is_client_facing() {
        let err = DispatchError::VersionNotFound {
            action: "show".into(),
            version: ApiVersion::new(9, 9),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "action `show` has no implementation for version 9.9"
        );

        let top: RestiveError = err.into();
        assert_eq!(top.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn missing_method_is_not_implemented() {
        let err = DispatchError::ActionNotFound("show_2_0".into());
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
