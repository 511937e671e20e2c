//! Testing utilities for restive.
//!
//! # Features
//!
//! - [`RecordingHook`]: A hook that records the context it sees at each stage
//! - [`StubController`]: A controller with declared method names that records
//!   which ones are invoked

use restive_core::{
    ActionTable, ConfigurationError, Controller, DispatchContext, DispatchError, Hook, HookResult,
    Params, RequestVersionState, Stage,
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Recording Hook
// ============================================================================

/// What a [`RecordingHook`] saw at one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The stage.
    pub stage: Stage,
    /// The parameters at that point.
    pub params: Params,
    /// The version decision at that point.
    pub version: Option<RequestVersionState>,
}

/// A hook that records every context it receives.
///
/// Clones share the same record, so keep one to inspect after handing the
/// other to a pipeline.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHook::new();
/// let pipeline = Pipeline::builder(controller).hook(recorder.clone()).build();
///
/// pipeline.dispatch(params).await?;
///
/// assert_eq!(recorder.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RecordingHook {
    records: Arc<Mutex<Vec<Record>>>,
    result: HookResult,
}

impl Default for RecordingHook {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHook {
    /// Create a new recording hook that returns `Next`.
    pub fn new() -> Self {
        Self::with_result(HookResult::Next)
    }

    /// Create a recording hook that returns a specific result.
    pub fn with_result(result: HookResult) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Get a clone of the records.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    /// Records of one stage only.
    pub fn at(&self, stage: Stage) -> Vec<Record> {
        self.records()
            .into_iter()
            .filter(|r| r.stage == stage)
            .collect()
    }

    /// Get the number of records.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }

    fn record(&self, stage: Stage, ctx: &DispatchContext) {
        self.records.lock().unwrap().push(Record {
            stage,
            params: ctx.params().clone(),
            version: ctx.version_state().cloned(),
        });
    }
}

impl Hook for RecordingHook {
    async fn on_resolve(
        &self,
        ctx: &mut DispatchContext,
        _actions: &ActionTable,
    ) -> Result<HookResult, DispatchError> {
        self.record(Stage::Resolve, ctx);
        Ok(self.result)
    }

    async fn on_call(&self, ctx: &mut DispatchContext) -> Result<HookResult, DispatchError> {
        self.record(Stage::Call, ctx);
        Ok(self.result)
    }
}

// ============================================================================
// Stub Controller
// ============================================================================

/// A controller that declares a set of method names and answers every
/// invocation with the name of the method invoked.
///
/// # Example
///
/// ```rust,ignore
/// let controller = StubController::new(["show", "show_2_0"]);
/// let pipeline = Pipeline::versioned(controller.clone());
///
/// assert_eq!(pipeline.dispatch(params).await?, "show_2_0");
/// assert_eq!(controller.calls(), ["show_2_0"]);
/// ```
#[derive(Debug, Clone)]
pub struct StubController {
    actions: Arc<ActionTable>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StubController {
    /// Create a controller with these methods.
    ///
    /// # Panics
    ///
    /// Panics if two names resolve to the same action version. Use
    /// [`StubController::try_new`] to handle that case.
    pub fn new<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_new(methods).unwrap()
    }

    /// Create a controller with these methods.
    pub fn try_new<I, S>(methods: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            actions: Arc::new(ActionTable::from_methods(methods)?),
            calls: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Names of the methods invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Controller for StubController {
    type Output = String;

    fn actions(&self) -> &ActionTable {
        &self.actions
    }

    async fn invoke(&self, method: &str, _params: &Params) -> Result<String, DispatchError> {
        if !self.actions.contains(method) {
            return Err(DispatchError::ActionNotFound(method.to_owned()));
        }
        self.calls.lock().unwrap().push(method.to_owned());
        Ok(method.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_colliding_versions() {
        assert!(StubController::try_new(["show_1", "show_1_0"]).is_err());
    }

    #[tokio::test]
    async fn records_invocations() {
        let controller = StubController::new(["show"]);
        assert_eq!(controller.invoke("show", &Params::new()).await.unwrap(), "show");
        assert!(matches!(
            controller.invoke("edit", &Params::new()).await,
            Err(DispatchError::ActionNotFound(_))
        ));
        assert_eq!(controller.calls(), ["show"]);
    }
}
