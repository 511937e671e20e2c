//! Logging hook for dispatch observation.

use restive_core::{ActionTable, DispatchContext, DispatchError, Hook, HookResult};

/// A hook that logs the parameters seen at each dispatch stage.
///
/// Register it last to see the parameters a controller is about to receive.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHook;

impl Hook for LoggingHook {
    async fn on_resolve(
        &self,
        ctx: &mut DispatchContext,
        actions: &ActionTable,
    ) -> Result<HookResult, DispatchError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                params = %ctx.params(),
                methods = actions.methods().count(),
                "resolved controller"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = (ctx, actions);
        }
        Ok(HookResult::Next)
    }

    async fn on_call(&self, ctx: &mut DispatchContext) -> Result<HookResult, DispatchError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                params = %ctx.params(),
                version = ?ctx.version_state().map(|s| s.selection()),
                "invoking action"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = ctx;
        }
        Ok(HookResult::Next)
    }
}
