//! Procedural macros for fieldbind
//!
//! Provides `#[derive(Record)]`, which lists a struct's named fields as
//! `fieldbind::Member`s in declaration order and assigns them back by name.

use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Field, Fields, LitStr};

/// Derive `fieldbind::Record` for a struct with named fields.
///
/// # Usage
///
/// ```ignore
/// #[derive(Record)]
/// struct Person {
///     name: String,
///     #[field(label = "Age in years")]
///     age: f64,
///     #[field(rename = "On")]
///     on: bool,
///     #[field(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Every non-skipped field type must implement `fieldbind::FieldValue`.
#[proc_macro_derive(Record, attributes(field))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit | Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Record can only be derived for structs",
            ))
        }
    };

    let mut members = Vec::new();
    let mut seen = HashSet::new();
    for field in fields {
        let Some(member) = MemberSpec::from_field(field)? else {
            continue;
        };
        if !seen.insert(member.name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate field name `{}`", member.name),
            ));
        }
        members.push(member);
    }

    let list = members.iter().map(|member| {
        let field = &member.ident;
        let name = &member.name;
        let label = &member.label;
        quote! {
            ::fieldbind::Member::new(
                #name,
                #label,
                ::fieldbind::FieldValue::to_value(&self.#field),
            )
        }
    });

    let arms = members.iter().map(|member| {
        let field = &member.ident;
        let name = &member.name;
        quote! {
            #name => ::fieldbind::assign_field(&mut self.#field, name, value),
        }
    });

    let tags = members.iter().map(|member| {
        let ty = &member.ty;
        let name = &member.name;
        quote! {
            #name => ::std::option::Option::Some(<#ty as ::fieldbind::FieldValue>::type_tag()),
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fieldbind::Record for #ident #ty_generics #where_clause {
            fn members(&self) -> ::std::vec::Vec<::fieldbind::Member> {
                ::std::vec![#(#list),*]
            }

            fn assign(
                &mut self,
                name: &str,
                value: ::fieldbind::Value,
            ) -> ::fieldbind::Result<()> {
                match name {
                    #(#arms)*
                    _ => ::std::result::Result::Err(::fieldbind::BindError::UnknownField {
                        name: ::std::string::ToString::to_string(name),
                    }),
                }
            }

            fn member_tag(&self, name: &str) -> ::std::option::Option<::fieldbind::TypeTag> {
                match name {
                    #(#tags)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

/// One non-skipped field and the names it is exposed under.
struct MemberSpec {
    ident: syn::Ident,
    ty: syn::Type,
    name: String,
    label: String,
}

impl MemberSpec {
    /// `None` for `#[field(skip)]`.
    fn from_field(field: &Field) -> syn::Result<Option<Self>> {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            return Ok(None);
        }

        let raw = ident.to_string();
        let raw = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
        let name = attrs.rename.unwrap_or(raw);
        let label = attrs.label.unwrap_or_else(|| upper_first(&name));
        Ok(Some(Self {
            ident,
            ty: field.ty.clone(),
            name,
            label,
        }))
    }
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    label: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(value.value());
                } else if meta.path.is_ident("label") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.label = Some(value.value());
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else {
                    return Err(meta.error("unknown field attribute, expected `rename`, `label` or `skip`"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
