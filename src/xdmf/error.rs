use derive_more::{Constructor, Display, From};

/// Everything that can go wrong while reading an XDMF document
#[derive(Debug, thiserror::Error, From)]
pub enum ParseError {
    #[error("{0}")]
    MalformedXml(MalformedXml),
    #[error("{0}")]
    MalformedAttribute(MalformedAttribute),
    #[error("{0}")]
    UnexpectedElement(UnexpectedElement),
    #[error("{0}")]
    MissingAttribute(MissingAttribute),
    #[error("{0}")]
    UnexpectedAttributeValue(UnexpectedAttributeValue),
}

impl From<quick_xml::Error> for ParseError {
    fn from(xml_err: quick_xml::Error) -> Self {
        Self::MalformedXml(MalformedXml { xml_err })
    }
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(att_err: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedAttribute(MalformedAttribute { att_err })
    }
}

#[derive(Display, Debug)]
#[display(fmt = "malformed XDMF markup: {xml_err}")]
pub struct MalformedXml {
    xml_err: quick_xml::Error,
}

#[derive(Display, Debug)]
#[display(fmt = "malformed attribute in XDMF markup: {att_err}")]
pub struct MalformedAttribute {
    att_err: quick_xml::events::attributes::AttrError,
}

#[derive(Display, Debug)]
#[display(fmt = "expected `{expected_name}` but found {actual_element}")]
pub struct UnexpectedElement {
    expected_name: String,
    actual_element: String,
}

impl UnexpectedElement {
    pub(crate) fn new<T: Into<String>, U: Into<String>>(expected_name: T, actual_element: U) -> Self {
        Self {
            expected_name: expected_name.into(),
            actual_element: actual_element.into(),
        }
    }
}

#[derive(Display, Debug, Constructor)]
#[display(fmt = "`{element_name}` element has no `{attribute_name}` attribute")]
pub struct MissingAttribute {
    element_name: String,
    attribute_name: String,
}

#[derive(Display, Debug, Constructor)]
#[display(
    fmt = "`{attribute_name}` of `{element_name}` should be {expected_value}, found `{actual_value}`"
)]
pub struct UnexpectedAttributeValue {
    pub(crate) element_name: String,
    pub(crate) attribute_name: String,
    pub(crate) expected_value: String,
    pub(crate) actual_value: String,
}
