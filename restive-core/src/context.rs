//! Per-request dispatch state.
//!
//! A [`DispatchContext`] is created for each matched request and threaded
//! through every dispatch stage. Hooks cooperate only through it: the resolve
//! stage records a [`RequestVersionState`], the call stage reads it.

use crate::{params::Params, version::ApiVersion};

/// How the version of a request was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelection {
    /// The request carried no version; this is the highest one available.
    Inferred(ApiVersion),
    /// The client asked for this version.
    Requested(ApiVersion),
}

impl VersionSelection {
    /// The selected version.
    pub fn version(&self) -> ApiVersion {
        match *self {
            VersionSelection::Inferred(v) | VersionSelection::Requested(v) => v,
        }
    }

    /// Whether the version was inferred rather than requested.
    pub fn is_inferred(&self) -> bool {
        matches!(self, VersionSelection::Inferred(_))
    }
}

/// The version decision for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestVersionState {
    action: String,
    selection: VersionSelection,
    method: String,
}

impl RequestVersionState {
    /// Record that `action` resolves to `method` under `selection`.
    pub fn new(
        action: impl Into<String>,
        selection: VersionSelection,
        method: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            selection,
            method: method.into(),
        }
    }

    /// The unversioned action name originally matched.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// How the version was chosen.
    pub fn selection(&self) -> VersionSelection {
        self.selection
    }

    /// The selected version.
    pub fn version(&self) -> ApiVersion {
        self.selection.version()
    }

    /// The registered method implementing the selected version.
    pub fn method(&self) -> &str {
        &self.method
    }
}

/// The in-flight state of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchContext {
    params: Params,
    version: Option<RequestVersionState>,
}

impl DispatchContext {
    /// Start dispatching a request matched with `params`.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            version: None,
        }
    }

    /// The request parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Mutable access to the request parameters.
    pub fn params_mut(&mut self) -> &mut Params {
        &mut self.params
    }

    /// The version decision, once the resolve stage has made one.
    pub fn version_state(&self) -> Option<&RequestVersionState> {
        self.version.as_ref()
    }

    /// Record the version decision.
    pub fn set_version_state(&mut self, state: RequestVersionState) {
        self.version = Some(state);
    }

    /// Consume the context, returning the final parameters.
    pub fn into_params(self) -> Params {
        self.params
    }
}
