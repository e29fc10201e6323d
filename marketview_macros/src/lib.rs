mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(resource = "vehicles")]
/// struct Vehicle {
///     #[record(id)]
///     pub id: String,
///     #[record(name, search)]
///     pub title: String,
///     #[record(brand, search)]
///     pub brand: String,
///     #[record(price)]
///     pub price: String,
///     #[record(date)]
///     pub year: i32,
/// }
/// ```
///
/// - `#[record(resource = "...")]` sets the REST collection path.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[record(id)]` marks the identity field. Defaults to a field named `id`.
/// - `#[record(search)]` adds a field to the case-insensitive text search.
///   May appear on several fields.
/// - `#[record(name)]`, `#[record(price)]`, `#[record(status)]`,
///   `#[record(brand)]`, `#[record(kind)]`, `#[record(date)]` and
///   `#[record(rating)]` bind the corresponding filter/sort attribute.
///   Several flags can share one attribute: `#[record(brand, search)]`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
