use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Token, parse_macro_input, parse_quote, spanned::Spanned};

/// Derive `jqx_adapter::DescribeShape`.
///
/// Named structs become object shapes keyed by their serialized field
/// names (`#[serde(rename)]`, `#[serde(rename_all)]` and `#[serde(skip)]`
/// are honored). Newtype and `#[serde(transparent)]` structs take the shape
/// of their field, unit structs are null, unit-only enums are strings.
#[proc_macro_derive(DescribeShape, attributes(serde))]
pub fn derive_describe_shape(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_describe_shape(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct SerdeOptions {
    rename: Option<String>,
    rename_all: Option<LitStr>,
    skip: bool,
    transparent: bool,
    flatten: bool,
}

fn expand_describe_shape(mut input: DeriveInput) -> syn::Result<TokenStream2> {
    let container = parse_serde_options(&input.attrs)?;

    for param in input.generics.type_params_mut() {
        param.bounds.push(parse_quote!(::jqx_adapter::DescribeShape));
    }

    let body = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => {
                if container.transparent {
                    transparent_shape(fields.named.iter())?
                } else {
                    object_shape(fields, container.rename_all.as_ref())?
                }
            }
            Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let ty = &fields.unnamed[0].ty;
                quote!(<#ty as ::jqx_adapter::DescribeShape>::shape())
            }
            Fields::Unnamed(fields) => {
                if container.transparent {
                    transparent_shape(fields.unnamed.iter())?
                } else {
                    return Err(syn::Error::new(
                        fields.span(),
                        "DescribeShape supports tuple structs with exactly one field",
                    ));
                }
            }
            Fields::Unit => quote!(::jqx_adapter::infer::Shape::Null),
        },
        Data::Enum(data) => {
            if let Some(variant) = data
                .variants
                .iter()
                .find(|variant| !matches!(variant.fields, Fields::Unit))
            {
                return Err(syn::Error::new(
                    variant.span(),
                    "DescribeShape supports enums with unit variants only",
                ));
            }
            quote!(::jqx_adapter::infer::Shape::String)
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "DescribeShape cannot be derived for unions",
            ));
        }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::jqx_adapter::DescribeShape for #name #ty_generics #where_clause {
            fn shape() -> ::jqx_adapter::infer::Shape {
                #body
            }
        }
    })
}

fn object_shape(fields: &syn::FieldsNamed, rename_all: Option<&LitStr>) -> syn::Result<TokenStream2> {
    let mut inserts = Vec::new();
    for field in &fields.named {
        let options = parse_serde_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        if options.flatten {
            return Err(syn::Error::new(
                field.span(),
                "#[serde(flatten)] is not supported by DescribeShape",
            ));
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let key = match (options.rename, rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => apply_rename_rule(rule, &ident.unraw().to_string())?,
            (None, None) => ident.unraw().to_string(),
        };
        let ty = &field.ty;
        inserts.push(quote! {
            fields.insert(
                ::std::string::String::from(#key),
                <#ty as ::jqx_adapter::DescribeShape>::shape(),
            );
        });
    }

    Ok(quote! {
        let mut fields = ::std::collections::BTreeMap::new();
        #(#inserts)*
        ::jqx_adapter::infer::Shape::Object(fields)
    })
}

fn transparent_shape<'a>(fields: impl Iterator<Item = &'a syn::Field>) -> syn::Result<TokenStream2> {
    let mut kept = Vec::new();
    for field in fields {
        if !parse_serde_options(&field.attrs)?.skip {
            kept.push(field);
        }
    }

    match kept.as_slice() {
        [field] => {
            let ty = &field.ty;
            Ok(quote!(<#ty as ::jqx_adapter::DescribeShape>::shape()))
        }
        _ => Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[serde(transparent)] requires exactly one non-skipped field",
        )),
    }
}

fn parse_serde_options(attrs: &[syn::Attribute]) -> syn::Result<SerdeOptions> {
    let mut options = SerdeOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        let syn::Meta::List(list) = &attr.meta else {
            continue;
        };

        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                options.rename = Some(lit.value());
                return Ok(());
            }

            if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                options.rename_all = Some(meta.value()?.parse()?);
                return Ok(());
            }

            if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                options.skip = true;
                return Ok(());
            }

            if meta.path.is_ident("transparent") {
                options.transparent = true;
                return Ok(());
            }

            if meta.path.is_ident("flatten") {
                options.flatten = true;
                return Ok(());
            }

            // Everything else belongs to serde alone.
            if meta.input.peek(Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            } else if meta.input.peek(syn::token::Paren) {
                let content;
                syn::parenthesized!(content in meta.input);
                let _: TokenStream2 = content.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(options)
}

fn apply_rename_rule(rule: &LitStr, field: &str) -> syn::Result<String> {
    let renamed = match rule.value().as_str() {
        "lowercase" | "snake_case" => field.to_string(),
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        "PascalCase" => pascal_case(field),
        "camelCase" => {
            let pascal = pascal_case(field);
            let mut chars = pascal.chars();
            match chars.next() {
                Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                None => pascal,
            }
        }
        other => {
            return Err(syn::Error::new(
                rule.span(),
                format!("Unsupported rename_all rule for DescribeShape: {other}"),
            ));
        }
    };
    Ok(renamed)
}

fn pascal_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}
