//! The dispatch pipeline: hooks in front of one controller.

use super::version::VersionHook;
use futures::future::BoxFuture;
use restive_core::{
    Controller, DispatchContext, DispatchError, DynHook, Hook, HookResult, Params,
};

/// Runs a matched request through the resolve and call stages, then invokes
/// the controller.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::versioned(PostsController::default());
///
/// let params = router.route(&Method::GET, "/posts/1").unwrap();
/// let output = pipeline.dispatch(params).await?;
/// ```
pub struct Pipeline<C> {
    controller: C,
    hooks: Vec<Box<dyn DynHook>>,
}

impl<C: Controller> Pipeline<C> {
    /// A pipeline with no hooks: actions are invoked exactly as matched.
    pub fn new(controller: C) -> Self {
        PipelineBuilder::new(controller).build()
    }

    /// A pipeline with version negotiation.
    pub fn versioned(controller: C) -> Self {
        PipelineBuilder::new(controller).versioning().build()
    }

    /// Start building a pipeline.
    pub fn builder(controller: C) -> PipelineBuilder<C> {
        PipelineBuilder::new(controller)
    }

    /// The controller requests end up at.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Dispatch a matched request.
    pub async fn dispatch(&self, params: Params) -> Result<C::Output, DispatchError> {
        let mut ctx = DispatchContext::new(params);
        self.resolve(&mut ctx).await?;
        self.call(&mut ctx).await?;
        self.invoke(&ctx).await
    }

    /// Run the resolve stage.
    pub async fn resolve(&self, ctx: &mut DispatchContext) -> Result<(), DispatchError> {
        let actions = self.controller.actions();
        for hook in &self.hooks {
            if hook.on_resolve_dyn(ctx, actions).await? == HookResult::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Run the call stage.
    pub async fn call(&self, ctx: &mut DispatchContext) -> Result<(), DispatchError> {
        for hook in &self.hooks {
            if hook.on_call_dyn(ctx).await? == HookResult::Stop {
                break;
            }
        }
        Ok(())
    }

    /// Invoke the controller method named by the context's action.
    pub async fn invoke(&self, ctx: &DispatchContext) -> Result<C::Output, DispatchError> {
        let params = ctx.params();
        let action = params.action().ok_or(DispatchError::MissingAction)?;
        if !self.controller.actions().contains(action) {
            return Err(DispatchError::ActionNotFound(action.to_owned()));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(action, "invoking controller");

        self.controller.invoke(action, params).await
    }
}

/// Builder for constructing a [`Pipeline`].
pub struct PipelineBuilder<C> {
    controller: C,
    hooks: Vec<Box<dyn DynHook>>,
}

impl<C: Controller> PipelineBuilder<C> {
    /// Start a pipeline in front of `controller`.
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            hooks: Vec::new(),
        }
    }

    /// Append a hook. Hooks run in the order they are added.
    pub fn hook(mut self, hook: impl Hook) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Append the version negotiation hook.
    pub fn versioning(self) -> Self {
        self.hook(VersionHook)
    }

    /// Build the pipeline.
    pub fn build(self) -> Pipeline<C> {
        #[cfg(feature = "tracing")]
        {
            for method in self.controller.actions().malformed() {
                tracing::warn!(
                    method = %method,
                    "method name ends in a bare version separator; excluded from version negotiation"
                );
            }
        }

        Pipeline {
            controller: self.controller,
            hooks: self.hooks,
        }
    }
}

/// Object-safe view of a [`Pipeline`], for mounting pipelines over different
/// controllers side by side.
pub trait DynPipeline<O>: Send + Sync {
    /// Dispatch a matched request (dynamic dispatch version).
    fn dispatch_dyn(&self, params: Params) -> BoxFuture<'_, Result<O, DispatchError>>;
}

impl<C: Controller> DynPipeline<C::Output> for Pipeline<C> {
    fn dispatch_dyn(&self, params: Params) -> BoxFuture<'_, Result<C::Output, DispatchError>> {
        Box::pin(self.dispatch(params))
    }
}
