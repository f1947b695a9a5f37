#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates: request/response models,
//! documented handlers, error enums and feature slices.
//!
//! Examples are `ignore`d because a proc-macro crate cannot use its own macros;
//! the integration tests under `tests/` exercise them from the outside.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro to define a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize`, `Deserialize` and `validator::Validate` if missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consumer's `server` feature is enabled.
/// * **Serde Policy**:
///     * `rename_all = "snake_case"` by default (can be overridden).
///     * `deny_unknown_fields` by default (can be disabled).
///
/// # Arguments
///
/// * `rename_all = "camelCase"` - Overrides the default Serde rename policy.
/// * `deny_unknown_fields = false` - Disables strict field checking.
/// * `validate = false` - Skips the `Validate` derive (response-only models).
///
/// # Example
///
/// ```rust,ignore
/// use persona_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct Location {
///     #[validate(length(min = 1, max = 50))]
///     pub city: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments such as `get`, `post`, `path = "..."`,
/// `params(...)`, `responses(...)`, and `tag = "..."`.
///
/// The path metadata is only emitted when the consumer's `server` feature is enabled.
/// Handlers are also allowed to be `async` without awaiting.
///
/// # Example
///
/// ```rust,ignore
/// use persona_derive::api_handler;
///
/// #[api_handler(
///     get,
///     path = "/",
///     responses((status = OK, body = Greeting)),
///     tag = "System"
/// )]
/// pub async fn home() -> Json<Greeting> {
///     Json(Greeting::default())
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, Error>` and to `Result<T, Source>` for every wrapped source type.
/// * **Standard Conversions**: Implements `From<Source>` for variants with a `source`
///   field (or a field marked `#[source]`/`#[from]`), enabling the `?` operator.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant is present.
/// * **`format_context`**: a private helper for `#[error(...)]` strings that renders
///   `" (context)"` or nothing.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. Context fields must be typed `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use persona_derive::persona_error;
/// use std::borrow::Cow;
///
/// #[persona_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Failed to build config")?.try_deserialize().map_err(Into::into)
/// }
/// ```
#[proc_macro_attribute]
pub fn persona_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// Turns the annotated struct into `<Name>Inner` and generates:
/// 1. An `Arc` wrapper named `<Name>` with `new(inner)`.
/// 2. `Deref` to the inner state.
/// 3. `FeatureSlice` for registration in the kernel state.
///
/// # Example
/// ```rust,ignore
/// #[persona_derive::persona_slice]
/// pub struct People {}
///
/// fn init() -> InitializedSlice {
///     InitializedSlice::new(People::new(PeopleInner {}))
/// }
/// ```
#[proc_macro_attribute]
pub fn persona_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
