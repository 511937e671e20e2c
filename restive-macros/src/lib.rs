//! Procedural macros for restive.
//!
//! - `#[controller]` - derive a `Controller` implementation from an inherent
//!   `impl` block, reading versioned method names at compile time

use proc_macro::TokenStream;

mod controller;

/// Derive a `Controller` implementation from an inherent `impl` block.
///
/// Every `pub` method taking `&self` (and optionally `params: &Params`) and
/// returning `Result<Output, E>` with `E: Into<BoxError>` becomes an action.
/// Methods may be sync or async. Mark helpers with `#[controller(skip)]`.
///
/// Method names follow the versioned naming convention: `show` is version 0,
/// `show_2` and `show_2_0` are version 2.0, `show_2_1` is version 2.1. Two
/// methods implementing the same version are a compile error.
///
/// # Example
///
/// ```rust,ignore
/// use restive::{Params, controller};
///
/// #[derive(Default)]
/// struct PostsController;
///
/// #[controller(output = String)]
/// impl PostsController {
///     pub async fn index(&self) -> Result<String, std::convert::Infallible> {
///         Ok("all posts".into())
///     }
///
///     pub async fn show_2_0(&self, params: &Params) -> Result<String, std::convert::Infallible> {
///         Ok(format!("post {}", params.get("id").unwrap_or_default()))
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_impl(attr, item)
}
