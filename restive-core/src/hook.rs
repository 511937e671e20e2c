//! # Dispatch hooks
//!
//! The extension points of the dispatch pipeline. A matched request passes
//! through two stages before its controller method runs:
//!
//! 1. **Resolve** - the controller is known; hooks may inspect its
//!    [`ActionTable`] and record decisions on the context.
//! 2. **Call** - immediately before invocation; hooks may rewrite the
//!    parameters, including the action to invoke.
//!
//! Hooks at each stage run in registration order. Returning
//! [`HookResult::Stop`] skips the remaining hooks of that stage; returning an
//! error aborts the request.

use crate::{action::ActionTable, context::DispatchContext, error::DispatchError};
use std::{fmt, future::Future, pin::Pin};

/// Result of hook execution indicating whether to continue or stop propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue to the next hook of this stage.
    Next,
    /// Skip the remaining hooks of this stage.
    Stop,
}

/// The dispatch stage a hook runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// After the controller is resolved.
    Resolve,
    /// Immediately before invocation.
    Call,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Resolve => "resolve",
            Stage::Call => "call",
        })
    }
}

/// A dispatch pipeline extension.
///
/// Both stages default to passing through, so a hook implements only the
/// stages it cares about.
///
/// # Static vs Dynamic Dispatch
///
/// This trait uses native `async fn` for zero-cost static dispatch.
/// For dynamic dispatch (e.g., in pipelines holding mixed hooks), use [`DynHook`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a dispatch `Hook`",
    label = "missing `Hook` implementation",
    note = "Hooks implement `on_resolve` and/or `on_call`."
)]
pub trait Hook: Send + Sync + 'static {
    /// Called once the controller handling the request is known.
    fn on_resolve(
        &self,
        ctx: &mut DispatchContext,
        actions: &ActionTable,
    ) -> impl Future<Output = Result<HookResult, DispatchError>> + Send {
        let _ = (ctx, actions);
        async { Ok(HookResult::Next) }
    }

    /// Called immediately before the controller method is invoked.
    fn on_call(
        &self,
        ctx: &mut DispatchContext,
    ) -> impl Future<Output = Result<HookResult, DispatchError>> + Send {
        let _ = ctx;
        async { Ok(HookResult::Next) }
    }
}

/// A boxed hook future.
pub type HookFuture<'a> = Pin<Box<dyn Future<Output = Result<HookResult, DispatchError>> + Send + 'a>>;

/// Dynamic object-safe version of [`Hook`].
pub trait DynHook: Send + Sync + 'static {
    /// Resolve stage (dynamic dispatch version).
    fn on_resolve_dyn<'a>(
        &'a self,
        ctx: &'a mut DispatchContext,
        actions: &'a ActionTable,
    ) -> HookFuture<'a>;

    /// Call stage (dynamic dispatch version).
    fn on_call_dyn<'a>(&'a self, ctx: &'a mut DispatchContext) -> HookFuture<'a>;
}

// Blanket implementation: Any type implementing Hook implements DynHook automatically.
impl<T: Hook> DynHook for T {
    fn on_resolve_dyn<'a>(
        &'a self,
        ctx: &'a mut DispatchContext,
        actions: &'a ActionTable,
    ) -> HookFuture<'a> {
        Box::pin(self.on_resolve(ctx, actions))
    }

    fn on_call_dyn<'a>(&'a self, ctx: &'a mut DispatchContext) -> HookFuture<'a> {
        Box::pin(self.on_call(ctx))
    }
}

// Allow Box<dyn DynHook> to be used where Hook is expected.
impl Hook for Box<dyn DynHook> {
    async fn on_resolve(
        &self,
        ctx: &mut DispatchContext,
        actions: &ActionTable,
    ) -> Result<HookResult, DispatchError> {
        (**self).on_resolve_dyn(ctx, actions).await
    }

    async fn on_call(&self, ctx: &mut DispatchContext) -> Result<HookResult, DispatchError> {
        (**self).on_call_dyn(ctx).await
    }
}
