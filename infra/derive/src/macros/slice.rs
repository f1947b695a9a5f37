use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Fields, ItemStruct};

pub fn expand_slice(input: ItemStruct) -> TokenStream {
    if matches!(input.fields, Fields::Unnamed(_)) {
        return syn::Error::new_spanned(&input.ident, "persona_slice requires a braced struct")
            .into_compile_error();
    }

    let wrapper_ident = &input.ident;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let inner_ident = format_ident!("{wrapper_ident}Inner");
    let fields = match &input.fields {
        Fields::Unit => quote! { {} },
        named => quote! { #named },
    };

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #inner_ident #fields

        #[derive(Debug, Clone)]
        #vis struct #wrapper_ident {
            inner: std::sync::Arc<#inner_ident>,
        }

        impl #wrapper_ident {
            #[must_use]
            pub fn new(inner: #inner_ident) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #wrapper_ident {
            type Target = #inner_ident;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::persona_kernel::domain::registry::FeatureSlice for #wrapper_ident {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}
