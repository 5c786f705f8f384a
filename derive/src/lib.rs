mod field_set;
mod utils;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derive `h5mesh::FieldSet` for a struct with named fields.
///
/// Every field is written as one XDMF attribute named after the field. Field level
/// options live under `#[mesh(...)]`:
///
/// * `rename = "name"` changes the attribute (and dataset) name
/// * `center = "node" | "cell"` picks where the values live, `node` by default
/// * `skip` leaves the field out of the file
#[proc_macro_derive(FieldSet, attributes(mesh))]
pub fn derive_field_set(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    field_set::derive(input)
        .map(Into::into)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
