//! Procedural macros for propmap.
//!
//! Provides derive macros:
//! * `#[derive(Properties)]` - generates the property table and typed field handles

use proc_macro::TokenStream;

/// Properties derive macro implementation.
mod properties;

/// Derives `propmap::Properties` for a struct with named fields.
///
/// Every field becomes a property named after the field, in declaration order.
/// Field types must be `Clone + 'static`. A typed handle is generated for each
/// property as an associated constant named after the field in
/// SCREAMING_SNAKE_CASE, with the field's visibility.
///
/// ```
/// use propmap::Properties;
///
/// #[derive(Default, Properties)]
/// pub struct UserView {
///     pub name: String,
///     #[property(rename = "years")]
///     pub age: u32,
///     #[property(skip)]
///     pub cache: Vec<u8>,
///     #[property(read_only)]
///     pub id: u64,
/// }
///
/// assert_eq!(UserView::NAME.name(), "name");
/// assert_eq!(UserView::AGE.name(), "years");
/// assert!(UserView::property("cache").is_none());
/// assert!(!UserView::property("id").unwrap().is_writable());
/// ```
///
/// # Field Attributes
///
/// - `skip` - the field is not a property
/// - `rename = "name"` - property name differs from the field identifier
/// - `read_only` - the property is never written by a mapper
///
/// # Rejected Input
///
/// Enums:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// enum Status {
///     #[default]
///     Open,
/// }
/// ```
///
/// Tuple structs:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Pair(u8, u8);
/// ```
///
/// Unit structs:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Marker;
/// ```
///
/// Generic structs:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Wrapper<T: Clone + Default + 'static> {
///     inner: T,
/// }
/// ```
///
/// Two fields with the same property name:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Clash {
///     x: u8,
///     #[property(rename = "x")]
///     y: u8,
/// }
/// ```
///
/// Two fields with the same handle name:
///
/// ```compile_fail
/// #[allow(non_snake_case)]
/// #[derive(Default, propmap::Properties)]
/// struct Clash {
///     fooBar: u8,
///     foo_bar: u8,
/// }
/// ```
///
/// Unknown attribute keys:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Typo {
///     #[property(skipped)]
///     x: u8,
/// }
/// ```
///
/// Empty property names:
///
/// ```compile_fail
/// #[derive(Default, propmap::Properties)]
/// struct Blank {
///     #[property(rename = "")]
///     x: u8,
/// }
/// ```
///
/// Handles of private fields stay private:
///
/// ```compile_fail
/// mod model {
///     #[derive(Default, propmap::Properties)]
///     pub struct Account {
///         pub owner: String,
///         secret: String,
///     }
/// }
///
/// let _ = model::Account::OWNER;
/// let _ = model::Account::SECRET;
/// ```
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
	properties::derive_properties(input)
}
