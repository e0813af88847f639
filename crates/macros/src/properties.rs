//! Properties derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Parsed `#[property(...)]` attributes of a single field.
#[derive(Default)]
struct FieldAttrs {
	skip: bool,
	read_only: bool,
	rename: Option<String>,
}

/// Entry point for the `#[derive(Properties)]` macro.
///
/// Generates:
/// - `impl propmap::Properties` backed by a static property table
/// - one `Field<Self, T>` associated constant per property
pub fn derive_properties(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let name = &input.ident;

	if !input.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&input.generics,
			"Properties cannot be derived for generic types",
		));
	}

	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			name,
			"Properties can only be derived for structs",
		));
	};

	let Fields::Named(fields) = &data.fields else {
		return Err(syn::Error::new_spanned(
			name,
			"Properties requires a struct with named fields",
		));
	};

	let mut entries = Vec::new();
	let mut handles = Vec::new();
	let mut seen: Vec<String> = Vec::new();
	let mut seen_handles: Vec<String> = Vec::new();

	for field in &fields.named {
		let attrs = parse_field_attrs(field)?;
		if attrs.skip {
			continue;
		}
		let Some(ident) = field.ident.as_ref() else {
			continue;
		};
		let ty = &field.ty;
		let ident_str = unraw(ident);
		let property_name = attrs.rename.unwrap_or_else(|| ident_str.clone());

		if seen.contains(&property_name) {
			return Err(syn::Error::new_spanned(
				field,
				format!("duplicate property name `{property_name}`"),
			));
		}
		seen.push(property_name.clone());

		let getter = quote! {
			|this: &#name| ::propmap::PropertyValue::new(::core::clone::Clone::clone(&this.#ident))
		};

		let entry = if attrs.read_only {
			quote! {
				::propmap::Property::read_only(
					#property_name,
					::core::any::TypeId::of::<#ty>,
					::core::any::type_name::<#ty>,
					#getter,
				)
			}
		} else {
			quote! {
				::propmap::Property::new(
					#property_name,
					::core::any::TypeId::of::<#ty>,
					::core::any::type_name::<#ty>,
					#getter,
					|this: &mut #name, value: ::propmap::PropertyValue| {
						this.#ident = value.downcast::<#ty>()?;
						::core::result::Result::Ok(())
					},
				)
			}
		};
		entries.push(entry);

		let handle_str = to_screaming_snake_case(&ident_str);
		if seen_handles.contains(&handle_str) {
			return Err(syn::Error::new_spanned(
				field,
				format!("field handle `{handle_str}` is already generated for another field"),
			));
		}
		seen_handles.push(handle_str.clone());
		let handle = format_ident!("{}", handle_str);
		let vis = &field.vis;
		let doc = format!("Typed handle for the `{property_name}` property.");
		handles.push(quote! {
			#[doc = #doc]
			#[allow(dead_code)]
			#vis const #handle: ::propmap::Field<#name, #ty> = ::propmap::Field::new(#property_name);
		});
	}

	let count = entries.len();

	Ok(quote! {
		impl ::propmap::Properties for #name {
			fn properties() -> &'static [::propmap::Property<Self>] {
				static PROPERTIES: [::propmap::Property<#name>; #count] = [#(#entries),*];
				&PROPERTIES
			}
		}

		impl #name {
			#(#handles)*
		}
	})
}

fn parse_field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
	let mut attrs = FieldAttrs::default();
	for attr in field.attrs.iter().filter(|a| a.path().is_ident("property")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("skip") {
				attrs.skip = true;
				Ok(())
			} else if meta.path.is_ident("read_only") {
				attrs.read_only = true;
				Ok(())
			} else if meta.path.is_ident("rename") {
				let value: syn::LitStr = meta.value()?.parse()?;
				if value.value().is_empty() {
					return Err(meta.error("property name cannot be empty"));
				}
				attrs.rename = Some(value.value());
				Ok(())
			} else {
				Err(meta.error("unknown property attribute"))
			}
		})?;
	}
	Ok(attrs)
}

/// Field name without the `r#` prefix of raw identifiers.
fn unraw(ident: &syn::Ident) -> String {
	let s = ident.to_string();
	match s.strip_prefix("r#") {
		Some(stripped) => stripped.to_string(),
		None => s,
	}
}

fn to_screaming_snake_case(s: &str) -> String {
	let mut result = String::new();
	let mut prev_lower = false;
	for c in s.chars() {
		if c.is_uppercase() && prev_lower {
			result.push('_');
		}
		prev_lower = c.is_lowercase() || c.is_ascii_digit();
		result.push(c.to_ascii_uppercase());
	}
	result
}
