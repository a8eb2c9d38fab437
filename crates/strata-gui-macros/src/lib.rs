//! Proc-macros for strata-gui.
//!
//! - `#[derive(WithBuilders)]`: generates `with_<field>(...)` methods for every
//!   named field of a config struct (`Theme`, `WidgetStyle`, `StyleRecord`, ...).
//!
//! ## Field attributes
//! - `#[with_builders(skip)]`: no builder is generated for the field.
//! - `#[with_builders(into)]`: the builder takes `impl Into<FieldType>`.
//!
//! ### Example
//! ```ignore
//! use strata_gui_macros::WithBuilders;
//!
//! #[derive(Clone, Debug, WithBuilders)]
//! pub struct Theme {
//!     pub spacing: f32,
//!     #[with_builders(into)]
//!     pub name: String,
//!     #[with_builders(skip)]
//!     generation: u32,
//! }
//!
//! let theme = Theme { spacing: 4.0, name: String::new(), generation: 0 }
//!     .with_spacing(6.0)
//!     .with_name("dark");
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields};

/// How a single field's builder is generated.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldMode {
    Plain,
    Into,
    Skip,
}

/// Derive that generates `with_<field>` builder methods for structs with named fields.
///
/// Generated methods take `self` by value and return `Self`. Each generated
/// method carries a doc line naming the field it sets.
#[proc_macro_derive(WithBuilders, attributes(with_builders))]
pub fn derive_with_builders(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = &input.ident;
    let generics = &input.generics;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "#[derive(WithBuilders)] only supports structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields_named) = &data_struct.fields else {
        return syn::Error::new(
            data_struct.fields.span(),
            "#[derive(WithBuilders)] requires named fields",
        )
        .to_compile_error()
        .into();
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut methods = Vec::with_capacity(fields_named.named.len());
    for field in fields_named.named.iter() {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };

        let mode = match field_mode(field) {
            Ok(mode) => mode,
            Err(err) => return err.to_compile_error().into(),
        };

        let field_ty = &field.ty;
        let method_ident = format_ident!("with_{}", field_ident);
        let doc = format!("Sets `{}` (builder style).", field_ident);

        match mode {
            FieldMode::Skip => {}
            FieldMode::Plain => methods.push(quote! {
                #[doc = #doc]
                #[inline]
                #[must_use]
                pub fn #method_ident(mut self, value: #field_ty) -> Self {
                    self.#field_ident = value;
                    self
                }
            }),
            FieldMode::Into => methods.push(quote! {
                #[doc = #doc]
                #[inline]
                #[must_use]
                pub fn #method_ident(mut self, value: impl ::core::convert::Into<#field_ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            }),
        }
    }

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    }
    .into()
}

/// Reads `#[with_builders(...)]` on a field. Unknown options are rejected so typos
/// surface at compile time.
fn field_mode(field: &syn::Field) -> syn::Result<FieldMode> {
    let mut mode = FieldMode::Plain;

    for attr in &field.attrs {
        if !attr.path().is_ident("with_builders") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                mode = FieldMode::Skip;
                Ok(())
            } else if meta.path.is_ident("into") {
                if mode != FieldMode::Skip {
                    mode = FieldMode::Into;
                }
                Ok(())
            } else {
                Err(meta.error("expected `skip` or `into`"))
            }
        })?;
    }

    Ok(mode)
}
