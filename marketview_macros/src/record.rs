use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

/// Field bindings collected from `#[record(...)]` attributes.
#[derive(Default)]
struct Bindings {
    id: Option<Ident>,
    name: Option<Ident>,
    search: Vec<Ident>,
    price: Option<Ident>,
    status: Option<Ident>,
    brand: Option<Ident>,
    kind: Option<Ident>,
    date: Option<Ident>,
    rating: Option<Ident>,
}

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let resource = extract_resource(input)?;
    let bindings = collect_bindings(input)?;

    let id_field = bindings.id.clone().ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "Record derive: no field marked with #[record(id)] and no field named `id`",
        )
    })?;

    let name_fn = bindings.name.as_ref().map(|field| {
        quote! {
            fn name(&self) -> &str {
                marketview::TextField::text(&self.#field).unwrap_or_default()
            }
        }
    });

    let search_fn = if bindings.search.is_empty() {
        None
    } else {
        let fields = &bindings.search;
        Some(quote! {
            fn search_fields(&self) -> Vec<&str> {
                let mut fields = Vec::new();
                #(
                    if let Some(value) = marketview::TextField::text(&self.#fields) {
                        fields.push(value);
                    }
                )*
                fields
            }
        })
    };

    let price_fn = bindings.price.as_ref().map(|field| {
        quote! {
            fn price(&self) -> f64 {
                marketview::NumericField::number(&self.#field)
            }
        }
    });

    let status_fn = text_accessor("status", bindings.status.as_ref());
    let brand_fn = text_accessor("brand", bindings.brand.as_ref());
    let kind_fn = text_accessor("kind", bindings.kind.as_ref());

    let date_fn = bindings.date.as_ref().map(|field| {
        quote! {
            fn recency(&self) -> i64 {
                marketview::RecencyField::recency(&self.#field)
            }
        }
    });

    let rating_fn = bindings.rating.as_ref().map(|field| {
        quote! {
            fn rating(&self) -> f64 {
                marketview::NumericField::number(&self.#field)
            }
        }
    });

    Ok(quote! {
        impl marketview::Record for #name {
            const RESOURCE: &'static str = #resource;

            fn id(&self) -> &str {
                &self.#id_field
            }

            #name_fn
            #search_fn
            #price_fn
            #status_fn
            #brand_fn
            #kind_fn
            #date_fn
            #rating_fn
        }
    })
}

fn text_accessor(method: &str, field: Option<&Ident>) -> Option<TokenStream2> {
    let method = Ident::new(method, proc_macro2::Span::call_site());
    field.map(|field| {
        quote! {
            fn #method(&self) -> Option<&str> {
                marketview::TextField::text(&self.#field)
            }
        }
    })
}

fn extract_resource(input: &DeriveInput) -> syn::Result<String> {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut resource = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("resource") {
                let value: LitStr = meta.value()?.parse()?;
                resource = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported #[record] struct attribute"))
            }
        })?;

        if let Some(r) = resource {
            return Ok(r);
        }
    }

    // Default: snake_case struct name + "s"
    let name = input.ident.to_string();
    Ok(format!("{}s", to_snake_case(&name)))
}

fn collect_bindings(input: &DeriveInput) -> syn::Result<Bindings> {
    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => fields,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record derive requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record derive only supports structs",
            ))
        }
    };

    let mut bindings = Bindings::default();

    for field in &fields.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("id") {
                    &mut bindings.id
                } else if meta.path.is_ident("name") {
                    &mut bindings.name
                } else if meta.path.is_ident("price") {
                    &mut bindings.price
                } else if meta.path.is_ident("status") {
                    &mut bindings.status
                } else if meta.path.is_ident("brand") {
                    &mut bindings.brand
                } else if meta.path.is_ident("kind") {
                    &mut bindings.kind
                } else if meta.path.is_ident("date") {
                    &mut bindings.date
                } else if meta.path.is_ident("rating") {
                    &mut bindings.rating
                } else if meta.path.is_ident("search") {
                    bindings.search.push(ident.clone());
                    return Ok(());
                } else {
                    return Err(meta.error("unsupported #[record] field attribute"));
                };

                if slot.is_some() {
                    return Err(meta.error("attribute bound to more than one field"));
                }
                *slot = Some(ident.clone());
                Ok(())
            })?;
        }
    }

    // Default: look for a field named "id"
    if bindings.id.is_none() {
        bindings.id = fields
            .named
            .iter()
            .filter_map(|field| field.ident.as_ref())
            .find(|ident| *ident == "id")
            .cloned();
    }

    Ok(bindings)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
