//! # Routing
//!
//! Generated [`RouteSpec`](restive_core::RouteSpec)s are plain data; any
//! router that supports a method constraint and per-route bindings can
//! consume them. This module provides one such router.
//!
//! | Router | Optional fragments | Constraints |
//! |--------|--------------------|-------------|
//! | [`ResourceRouter`] | Native | Anchored regex per placeholder |
//! | Anything else | Expand with `RouteSpec::variants()` | Check with `RouteSpec::accepts()` |

mod router;

pub use router::ResourceRouter;
