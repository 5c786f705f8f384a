use darling::FromField;
use proc_macro2::Span;
use syn::Error;
use syn::Result;

/// options accepted on each field through `#[mesh(...)]`
#[derive(Debug, FromField)]
#[darling(attributes(mesh))]
pub(crate) struct FieldOptions {
    pub(crate) ident: Option<syn::Ident>,
    pub(crate) ty: syn::Type,
    #[darling(default)]
    pub(crate) rename: Option<String>,
    #[darling(default)]
    pub(crate) center: Option<String>,
    #[darling(default)]
    pub(crate) skip: bool,
}

pub(crate) enum Center {
    Node,
    Cell,
}

impl FieldOptions {
    /// the name of the dataset / attribute this field is written as
    pub(crate) fn output_name(&self, span: Span) -> Result<String> {
        if let Some(rename) = &self.rename {
            if rename.is_empty() {
                return Err(Error::new(span, "`rename` cannot be an empty string"));
            }
            return Ok(rename.clone());
        }

        self.ident
            .as_ref()
            .map(|ident| ident.to_string())
            .ok_or_else(|| Error::new(span, "cannot derive for structs with unnamed fields"))
    }

    pub(crate) fn center(&self, span: Span) -> Result<Center> {
        match self.center.as_deref() {
            None | Some("node") => Ok(Center::Node),
            Some("cell") => Ok(Center::Cell),
            Some(other) => Err(Error::new(
                span,
                format!("unknown center `{other}`, expected \"node\" or \"cell\""),
            )),
        }
    }
}
