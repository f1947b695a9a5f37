use fxhash::FxHashSet;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, LitBool, LitStr};

const DEFAULT_RENAME_ALL: &str = "snake_case";

/// Expands the `#[api_model]` attribute macro.
///
/// Adds the missing derives and the serde policy, and leaves every attribute
/// the author wrote in place.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    expand_model(args, &input).unwrap_or_else(syn::Error::into_compile_error)
}

fn expand_model(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = ApiModelArgs::parse(args)?;
    let derives = derived_trait_names(&input.attrs);
    let serde_meta = SerdeMetaInfo::collect(&input.attrs)?;

    let derive_attr = derive_attr(&derives, args.validate);
    let to_schema_attr = to_schema_attr(&derives);
    let rename_attr = rename_attr(args.rename_all, &serde_meta)?;
    let deny_attr = deny_unknown_attr(args.deny_unknown_fields, &serde_meta, input)?;

    Ok(quote! {
        #derive_attr
        #to_schema_attr
        #rename_attr
        #deny_attr
        #input
    })
}

/// Expands the `#[api_handler]` attribute macro.
///
/// Integrates with `utoipa::path` for `OpenAPI` documentation while keeping
/// the handler signature untouched.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return syn::Error::new_spanned(&input.sig.fn_token, "api_handler requires an async fn")
            .into_compile_error();
    }

    let body = &input.block;
    let sig = &input.sig;
    let vis = &input.vis;
    let attrs = &input.attrs;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig {
            #body
        }
    }
}

struct ApiModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
    validate: bool,
}

impl ApiModelArgs {
    fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut rename_all: Option<LitStr> = None;
        let mut deny_unknown_fields: Option<bool> = None;
        let mut validate: Option<bool> = None;

        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("rename_all") {
                let lit: LitStr = meta.value()?.parse()?;
                return set_once(&mut rename_all, lit, &meta);
            }
            if meta.path.is_ident("deny_unknown_fields") {
                let lit: LitBool = meta.value()?.parse()?;
                return set_once(&mut deny_unknown_fields, lit.value, &meta);
            }
            if meta.path.is_ident("validate") {
                let lit: LitBool = meta.value()?.parse()?;
                return set_once(&mut validate, lit.value, &meta);
            }
            Err(meta.error(
                "Unsupported argument; expected rename_all, deny_unknown_fields or validate",
            ))
        });
        parser.parse2(args)?;

        Ok(Self { rename_all, deny_unknown_fields, validate: validate.unwrap_or(true) })
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    meta: &syn::meta::ParseNestedMeta<'_>,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("Duplicate argument"));
    }
    *slot = Some(value);
    Ok(())
}

struct SerdeMetaInfo {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

impl SerdeMetaInfo {
    fn collect(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut info = Self { rename_all: None, deny_unknown_fields: false };

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    info.rename_all = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("deny_unknown_fields") {
                    info.deny_unknown_fields = true;
                } else if meta.input.peek(syn::Token![=]) {
                    // Unrelated `key = value` pairs (e.g. `default = "..."`).
                    let _: syn::Expr = meta.value()?.parse()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let _: TokenStream = content.parse()?;
                }
                Ok(())
            })?;
        }

        Ok(info)
    }
}

fn derive_attr(derives: &FxHashSet<String>, validate: bool) -> TokenStream {
    let mut tokens = Vec::new();
    if !derives.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !derives.contains("Serialize") {
        tokens.push(quote! { ::serde::Serialize });
    }
    if !derives.contains("Deserialize") {
        tokens.push(quote! { ::serde::Deserialize });
    }
    if validate && !derives.contains("Validate") {
        tokens.push(quote! { ::validator::Validate });
    }

    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn to_schema_attr(derives: &FxHashSet<String>) -> TokenStream {
    if derives.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    }
}

fn rename_attr(rename_all: Option<LitStr>, serde_meta: &SerdeMetaInfo) -> syn::Result<TokenStream> {
    let rename_all_value =
        rename_all.unwrap_or_else(|| LitStr::new(DEFAULT_RENAME_ALL, Span::call_site()));

    match &serde_meta.rename_all {
        Some(existing) if existing.value() != rename_all_value.value() => Err(syn::Error::new_spanned(
            existing,
            "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
        )),
        Some(_) => Ok(quote! {}),
        None => Ok(quote! { #[serde(rename_all = #rename_all_value)] }),
    }
}

fn deny_unknown_attr(
    deny_unknown_fields: Option<bool>,
    serde_meta: &SerdeMetaInfo,
    input: &ItemStruct,
) -> syn::Result<TokenStream> {
    let deny_unknown = deny_unknown_fields.unwrap_or(true);
    if serde_meta.deny_unknown_fields {
        if !deny_unknown {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        }
        return Ok(quote! {});
    }

    Ok(if deny_unknown { quote! { #[serde(deny_unknown_fields)] } } else { quote! {} })
}

/// Last path segment of every trait named in `#[derive(...)]`.
pub fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.insert(segment.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}
