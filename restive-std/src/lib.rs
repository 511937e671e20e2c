//! # restive-std
//!
//! Standard implementations for restive.
//!
//! This crate provides:
//! - **Route generation**: [`resource::generate`]
//! - **Versioned dispatch**: [`dispatch::Pipeline`], [`dispatch::VersionHook`]
//! - **Routing**: [`routing::ResourceRouter`]
//! - **Application**: [`app::Application`]
//! - **Standard hooks**: Logging
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use restive_core;

// Modules
pub mod app;
pub mod dispatch;
pub mod hooks;
pub mod resource;
pub mod routing;
pub mod testing;
