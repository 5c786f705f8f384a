use super::utils::{Center, FieldOptions};

use darling::{ast, FromDeriveInput};
use proc_macro::TokenStream;
use quote::quote;

use syn::spanned::Spanned;
use syn::Error;
use syn::Result;

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(mesh), supports(struct_named))]
struct FieldSetInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: ast::Data<(), FieldOptions>,
}

pub fn derive(input: syn::DeriveInput) -> Result<TokenStream> {
    let span = input.span();
    let parsed = match FieldSetInput::from_derive_input(&input) {
        Ok(parsed) => parsed,
        // darling already carries spans for every offending attribute
        Err(e) => return Ok(e.write_errors().into()),
    };

    let fields = parsed
        .data
        .take_struct()
        .ok_or_else(|| Error::new(span, "can only derive for structs"))?;

    let struct_type = parsed.ident;
    let fields: Vec<_> = fields.fields.into_iter().filter(|field| !field.skip).collect();

    // generic field types must be writable
    let mut generics = parsed.generics;
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for field in &fields {
            let ty = &field.ty;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: h5mesh::Field));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut body = quote! {};

    for field in fields {
        let field_span = field
            .ident
            .as_ref()
            .map(|ident| ident.span())
            .unwrap_or(span);

        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(span, "cannot derive for structs with unnamed fields"))?;

        // convert the output name to a string literal so `write_field` understands it
        let lit = syn::LitStr::new(&field.output_name(field_span)?, field_span);

        let center = match field.center(field_span)? {
            Center::Node => quote!(h5mesh::Center::Node),
            Center::Cell => quote!(h5mesh::Center::Cell),
        };

        body = quote! {
            #body
            attributes.push(h5mesh::write_field(container, &self.#ident, #lit, #center, extent)?);
        }
    }

    // declare the whole trait
    let expanded = quote! {
        impl #impl_generics h5mesh::FieldSet for #struct_type #ty_generics #where_clause {
            fn write_fields<C: h5mesh::Container>(
                &self,
                container: &mut C,
                extent: &h5mesh::Extent3D,
            ) -> Result<Vec<h5mesh::xdmf::Attribute>, h5mesh::Error> {
                #[allow(unused_mut)]
                let mut attributes = Vec::new();

                #body

                Ok(attributes)
            }
        }
    };

    // Hand the output tokens back to the compiler
    Ok(TokenStream::from(expanded))
}
