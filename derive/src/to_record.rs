use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, ExprClosure, Field, Fields, Ident, LitInt, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

pub(crate) fn expand_to_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new(
            input.span(),
            "`ToRecord` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new(
            input.span(),
            "`ToRecord` may only be derived on structs with named fields.",
        ))?
    };

    let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("record")) else {
        Err(Error::new(
            input.span(),
            "`ToRecord` requires a `record(N)` attribute with the global message number.",
        ))?
    };

    let RecordAttribute { number: global } = attr.meta.require_list()?.parse_args()?;

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    if fields.len() > usize::from(u8::MAX) {
        Err(Error::new(
            input.span(),
            "A record may have at most 255 fields.",
        ))?
    }

    let mut numbers = HashSet::new();

    for field in &fields {
        if !numbers.insert(field.number.base10_parse::<u8>()?) {
            Err(Error::new(
                field.number.span(),
                "Field identifiers must be unique.",
            ))?
        }
    }

    // Fields are visited in declaration order, which fixes their order in the
    // emitted definition.
    let additions = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            number,
            handler,
        } = field;

        let value = if let Some(handler) = handler {
            quote! { (#handler)(value) }
        } else {
            quote! { IntoValue::to_value(value) }
        };

        quote! {
            if let Some(value) = &self.#name {
                o.add_field(#number, #value);
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// The global message number of this record.
            pub const GLOBAL: u16 = #global;
        }

        impl #impl_generics ToRecord for #name #ty_generics #where_clause {
            fn global(&self) -> u16 {
                #global
            }

            fn add_fields(&self, o: &mut dyn FieldSink) {
                #(#additions)*
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    number: LitInt,
    handler: Option<ExprClosure>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
            return Ok(None);
        };

        let FieldAttribute { number, handler } = attr.meta.require_list()?.parse_args()?;

        let Type::Path(path) = &field.ty else {
            Err(Error::new_spanned(
                &field.ty,
                "Field must have a type annotation.",
            ))?
        };

        let Some(segment) = path.path.segments.last() else {
            Err(Error::new_spanned(
                &path.path.segments,
                "Field must have a type annotation.",
            ))?
        };

        if segment.ident != "Option" {
            Err(Error::new_spanned(
                &segment.ident,
                "Field must have type `Option<T>`.",
            ))?
        }

        if let Some(handler) = &handler {
            if handler.inputs.len() != 1 {
                Err(Error::new_spanned(
                    handler,
                    "Handler closure must have exactly one parameter.",
                ))?
            }
        }

        Ok(Some(Self {
            name,
            number,
            handler,
        }))
    }
}

#[derive(Debug)]
struct FieldAttribute {
    number: LitInt,
    handler: Option<ExprClosure>,
}

impl Parse for FieldAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let number = input.parse::<LitInt>()?;

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { number, handler })
    }
}

#[derive(Debug)]
struct RecordAttribute {
    number: LitInt,
}

impl Parse for RecordAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let number = input.parse::<LitInt>()?;
        Ok(Self { number })
    }
}
