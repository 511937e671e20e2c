//! # Dispatch
//!
//! A matched request is dispatched through a [`Pipeline`]: its hooks run the
//! resolve stage, then the call stage, then the controller method named by
//! the (possibly rewritten) action is invoked.
//!
//! [`VersionHook`] is the hook that makes dispatch version-aware.

mod pipeline;
mod version;

pub use pipeline::{DynPipeline, Pipeline, PipelineBuilder};
pub use version::{VersionHook, versioned_name};
