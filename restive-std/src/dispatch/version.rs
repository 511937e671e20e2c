//! Version negotiation.
//!
//! [`VersionHook`] maps a matched, unversioned action onto the controller
//! method implementing the right API version, in two steps:
//!
//! 1. **Resolve**: with no `version` parameter, pick the highest version the
//!    controller implements; with one, check that exactly that version exists.
//!    The decision is recorded on the [`DispatchContext`].
//! 2. **Call**: copy an inferred version into the parameters and rewrite the
//!    action to the selected method (`show` becomes `show_2_1`).
//!
//! | Request | Controller methods | Invoked |
//! |---------|--------------------|---------|
//! | `show` | `show`, `show_1_0`, `show_2_3` | `show_2_3` |
//! | `show`, version `1.0` | `show`, `show_1_0`, `show_2_3` | `show_1_0` |
//! | `show`, version `9.9` | `show`, `show_1_0`, `show_2_3` | `VersionNotFound` |
//! | `show` | `show` | `show` |
//! | `show_2_0` | `show`, `show_2_0` | `show_2_0` |

use restive_core::{
    ActionTable, ApiVersion, DispatchContext, DispatchError, Hook, HookResult, ParsedMethod,
    RequestVersionState, VersionSelection, VersionedMethodName, keys,
};

/// Selects and applies the API version of each request.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionHook;

impl Hook for VersionHook {
    async fn on_resolve(
        &self,
        ctx: &mut DispatchContext,
        actions: &ActionTable,
    ) -> Result<HookResult, DispatchError> {
        let Some(action) = ctx.params().action() else {
            return Ok(HookResult::Next);
        };
        let action = action.to_owned();

        if names_a_version(&action) {
            #[cfg(feature = "tracing")]
            tracing::debug!(action = %action, "action already names a version");

            return Ok(HookResult::Next);
        }

        let state = match ctx.params().version()? {
            None => {
                let (version, method) = match actions.latest(&action) {
                    Some(handle) => (handle.version, handle.method.to_owned()),
                    None => (ApiVersion::ZERO, action.clone()),
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(action = %action, %version, method = %method, "inferred version");

                RequestVersionState::new(action, VersionSelection::Inferred(version), method)
            }
            Some(version) => {
                let Some(handle) = actions.find(&action, version) else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(action = %action, %version, "requested version not implemented");

                    return Err(DispatchError::VersionNotFound { action, version });
                };

                #[cfg(feature = "tracing")]
                tracing::debug!(action = %action, %version, method = handle.method, "requested version");

                RequestVersionState::new(
                    action,
                    VersionSelection::Requested(version),
                    handle.method,
                )
            }
        };

        ctx.set_version_state(state);
        Ok(HookResult::Next)
    }

    async fn on_call(&self, ctx: &mut DispatchContext) -> Result<HookResult, DispatchError> {
        if !ctx.params().contains(keys::VERSION) {
            let inferred = ctx
                .version_state()
                .filter(|state| state.selection().is_inferred())
                .map(|state| state.version());
            if let Some(version) = inferred {
                ctx.params_mut().set_version(version);
            }
        }

        let Some(version) = ctx.params().version()? else {
            return Ok(HookResult::Next);
        };

        let method = match ctx.version_state() {
            Some(state) if state.version() == version => state.method().to_owned(),
            Some(state) => VersionedMethodName::new(state.action(), version).to_string(),
            None => {
                let action = ctx.params().action().ok_or(DispatchError::MissingAction)?;
                if names_a_version(action) {
                    return Ok(HookResult::Next);
                }
                versioned_name(action, version)
            }
        };
        ctx.params_mut().set_action(method);

        Ok(HookResult::Next)
    }
}

/// Routes may bind a versioned method directly (`show_2_0`). Those are invoked
/// as bound and get no version injected.
fn names_a_version(action: &str) -> bool {
    matches!(
        VersionedMethodName::parse(action),
        ParsedMethod::Versioned { .. }
    )
}

/// The method name for `action` at `version`, leaving names that already
/// carry that version untouched.
pub fn versioned_name(action: &str, version: ApiVersion) -> String {
    match VersionedMethodName::parse(action) {
        ParsedMethod::Versioned { version: current, .. } if current == version => action.to_owned(),
        _ => VersionedMethodName::new(action, version).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restive_core::Params;

    fn table() -> ActionTable {
        ActionTable::from_methods(["index", "show", "show_1_0", "show_2_3"]).unwrap()
    }

    fn ctx(action: &str) -> DispatchContext {
        DispatchContext::new(Params::new().with(keys::ACTION, action))
    }

    async fn run(ctx: &mut DispatchContext, actions: &ActionTable) -> Result<(), DispatchError> {
        VersionHook.on_resolve(ctx, actions).await?;
        VersionHook.on_call(ctx).await?;
        Ok(())
    }

    #[tokio::test]
    async fn infers_highest_version() {
        let mut ctx = ctx("show");
        VersionHook.on_resolve(&mut ctx, &table()).await.unwrap();

        // Resolve only records the decision.
        assert_eq!(ctx.params().action(), Some("show"));
        let state = ctx.version_state().unwrap();
        assert_eq!(
            state.selection(),
            VersionSelection::Inferred(ApiVersion::new(2, 3))
        );

        VersionHook.on_call(&mut ctx).await.unwrap();
        assert_eq!(ctx.params().action(), Some("show_2_3"));
        assert_eq!(ctx.params().get(keys::VERSION), Some("2.3"));
    }

    #[tokio::test]
    async fn explicit_version_selects_exact_method() {
        let mut ctx = DispatchContext::new(
            Params::new()
                .with(keys::ACTION, "show")
                .with(keys::VERSION, "1"),
        );
        run(&mut ctx, &table()).await.unwrap();

        assert_eq!(ctx.params().action(), Some("show_1_0"));
        assert_eq!(
            ctx.version_state().unwrap().selection(),
            VersionSelection::Requested(ApiVersion::new(1, 0))
        );
    }

    #[tokio::test]
    async fn missing_version_is_an_error() {
        let mut ctx = DispatchContext::new(
            Params::new()
                .with(keys::ACTION, "show")
                .with(keys::VERSION, "9.9"),
        );
        let err = run(&mut ctx, &table()).await.unwrap_err();

        assert!(matches!(
            err,
            DispatchError::VersionNotFound { ref action, version }
                if action == "show" && version == ApiVersion::new(9, 9)
        ));
        assert_eq!(ctx.params().action(), Some("show"));
        assert!(ctx.version_state().is_none());
    }

    #[tokio::test]
    async fn invalid_version_is_rejected() {
        let mut ctx = DispatchContext::new(
            Params::new()
                .with(keys::ACTION, "show")
                .with(keys::VERSION, "latest"),
        );
        let err = run(&mut ctx, &table()).await.unwrap_err();
        assert!(matches!(err, DispatchError::InvalidVersion(_)));
    }

    #[tokio::test]
    async fn unversioned_actions_stay_unversioned() {
        let mut ctx = ctx("index");
        run(&mut ctx, &table()).await.unwrap();
        assert_eq!(ctx.params().action(), Some("index"));
    }

    #[tokio::test]
    async fn unknown_actions_fall_back_to_version_zero() {
        let mut ctx = ctx("edit");
        run(&mut ctx, &table()).await.unwrap();
        assert_eq!(ctx.params().action(), Some("edit"));
        assert_eq!(ctx.version_state().unwrap().version(), ApiVersion::ZERO);
    }

    #[tokio::test]
    async fn malformed_candidates_do_not_hide_the_base_action() {
        let actions = ActionTable::from_methods(["show", "show_"]).unwrap();
        let mut ctx = ctx("show");
        run(&mut ctx, &actions).await.unwrap();
        assert_eq!(ctx.params().action(), Some("show"));
    }

    #[tokio::test]
    async fn call_stage_is_idempotent() {
        let mut ctx = ctx("show");
        run(&mut ctx, &table()).await.unwrap();
        VersionHook.on_call(&mut ctx).await.unwrap();
        assert_eq!(ctx.params().action(), Some("show_2_3"));
    }

    #[tokio::test]
    async fn call_stage_alone_follows_naming_convention() {
        let mut ctx = DispatchContext::new(
            Params::new()
                .with(keys::ACTION, "show")
                .with(keys::VERSION, "2"),
        );
        VersionHook.on_call(&mut ctx).await.unwrap();
        assert_eq!(ctx.params().action(), Some("show_2_0"));

        VersionHook.on_call(&mut ctx).await.unwrap();
        assert_eq!(ctx.params().action(), Some("show_2_0"));
    }

    #[tokio::test]
    async fn versioned_actions_are_invoked_as_bound() {
        let actions = ActionTable::from_methods(["show", "show_2_0", "show_3_0"]).unwrap();
        let mut ctx = ctx("show_2_0");
        run(&mut ctx, &actions).await.unwrap();

        assert_eq!(ctx.params().action(), Some("show_2_0"));
        assert_eq!(ctx.params().get(keys::VERSION), None);
        assert!(ctx.version_state().is_none());
    }

    #[test]
    fn names_versioned_methods() {
        assert_eq!(versioned_name("show", ApiVersion::new(2, 1)), "show_2_1");
        assert_eq!(versioned_name("show_2_1", ApiVersion::new(2, 1)), "show_2_1");
        assert_eq!(versioned_name("show", ApiVersion::ZERO), "show");
    }
}
