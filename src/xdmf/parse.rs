//! reading XDMF documents written by [`write_document`](super::write_document)
//!
//! This is not a general XDMF reader. It understands uniform structured grids with the
//! element layout this crate produces, which is enough to inspect and verify output files.

use super::error::{self, ParseError};
use super::*;
use crate::shape::parse_dimension_string;
use crate::Precision;
use crate::Error;

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// read in and parse an entire XDMF file for a given path
pub fn read_path<P: AsRef<std::path::Path>>(path: P) -> Result<Document, Error> {
    let file = std::fs::File::open(path)?;
    let buf_reader = std::io::BufReader::new(file);
    Ok(read_document(buf_reader)?)
}

/// parse an XDMF document
pub fn read_document<R: BufRead>(reader: R) -> Result<Document, ParseError> {
    let mut cursor = Cursor::new(reader);

    cursor.expect_start("Xdmf")?;
    cursor.expect_start("Domain")?;

    let mut grids = Vec::new();

    loop {
        match cursor.next()? {
            Node::Start(element) if element.name().as_ref() == b"Grid" => {
                grids.push(parse_grid(&mut cursor, &element)?);
            }
            Node::End(name) if name == "Domain" => break,
            other => {
                return Err(error::UnexpectedElement::new("Grid", other.describe()).into());
            }
        }
    }

    cursor.expect_end("Xdmf")?;

    Ok(Document::new(grids))
}

/// a simplified xml event with owned data
enum Node {
    Start(BytesStart<'static>),
    Empty(BytesStart<'static>),
    Text(String),
    End(String),
    Eof,
}

impl Node {
    fn describe(&self) -> String {
        match self {
            Self::Start(element) => format!("<{}>", element_name(element)),
            Self::Empty(element) => format!("<{}/>", element_name(element)),
            Self::Text(text) => format!("text `{text}`"),
            Self::End(name) => format!("</{name}>"),
            Self::Eof => "end of file".to_string(),
        }
    }
}

struct Cursor<R> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> Cursor<R> {
    fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.trim_text(true);

        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// the next element, text or closing tag. Declarations, comments and the doctype
    /// are skipped
    fn next(&mut self) -> Result<Node, ParseError> {
        loop {
            self.buffer.clear();
            let event = self.reader.read_event_into(&mut self.buffer)?;

            let node = match event {
                Event::Start(element) => Node::Start(element.into_owned()),
                Event::Empty(element) => Node::Empty(element.into_owned()),
                Event::End(element) => {
                    Node::End(String::from_utf8_lossy(element.name().as_ref()).into_owned())
                }
                Event::Text(text) => Node::Text(text.unescape()?.into_owned()),
                Event::CData(data) => {
                    Node::Text(String::from_utf8_lossy(data.into_inner().as_ref()).into_owned())
                }
                Event::Eof => Node::Eof,
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => continue,
            };

            return Ok(node);
        }
    }

    fn expect_start(&mut self, name: &str) -> Result<BytesStart<'static>, ParseError> {
        match self.next()? {
            Node::Start(element) if element.name().as_ref() == name.as_bytes() => Ok(element),
            other => Err(error::UnexpectedElement::new(name, other.describe()).into()),
        }
    }

    fn expect_end(&mut self, name: &str) -> Result<(), ParseError> {
        match self.next()? {
            Node::End(actual) if actual == name => Ok(()),
            other => Err(error::UnexpectedElement::new(format!("/{name}"), other.describe()).into()),
        }
    }
}

fn element_name(element: &BytesStart) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

fn attribute_value(element: &BytesStart, attribute_name: &str) -> Result<Option<String>, ParseError> {
    for attribute in element.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == attribute_name.as_bytes() {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }

    Ok(None)
}

fn required_attribute(element: &BytesStart, attribute_name: &str) -> Result<String, ParseError> {
    attribute_value(element, attribute_name)?.ok_or_else(|| {
        error::MissingAttribute::new(element_name(element), attribute_name.to_string()).into()
    })
}

/// read a required attribute and convert it, reporting `expected` when conversion fails
fn typed_attribute<T>(
    element: &BytesStart,
    attribute_name: &str,
    expected: &str,
    convert: impl FnOnce(&str) -> Option<T>,
) -> Result<T, ParseError> {
    let value = required_attribute(element, attribute_name)?;
    convert(&value).ok_or_else(|| {
        error::UnexpectedAttributeValue::new(
            element_name(element),
            attribute_name.to_string(),
            expected.to_string(),
            value,
        )
        .into()
    })
}

fn dimensions(element: &BytesStart) -> Result<Vec<usize>, ParseError> {
    typed_attribute(
        element,
        "Dimensions",
        "whitespace separated integers",
        |value| parse_dimension_string(value).ok(),
    )
}

fn parse_grid<R: BufRead>(
    cursor: &mut Cursor<R>,
    element: &BytesStart,
) -> Result<Grid, ParseError> {
    let name = required_attribute(element, "Name")?;
    typed_attribute(element, "GridType", "Uniform", |value| {
        (value == "Uniform").then_some(())
    })?;

    let topology = match cursor.next()? {
        Node::Empty(element) => parse_topology(&element)?,
        Node::Start(element) if element.name().as_ref() == b"Topology" => {
            let topology = parse_topology(&element)?;
            cursor.expect_end("Topology")?;
            topology
        }
        other => return Err(error::UnexpectedElement::new("Topology", other.describe()).into()),
    };

    let geometry_element = cursor.expect_start("Geometry")?;
    let kind = typed_attribute(
        &geometry_element,
        "GeometryType",
        "ORIGIN_DXDYDZ, VXVYVZ or XYZ",
        GeometryType::from_name,
    )?;
    let items = parse_data_items(cursor, "Geometry")?;
    let geometry = Geometry::new(kind, items);

    let mut attributes = Vec::new();

    loop {
        match cursor.next()? {
            Node::Start(element) if element.name().as_ref() == b"Attribute" => {
                attributes.push(parse_attribute(cursor, &element)?);
            }
            Node::End(name) if name == "Grid" => break,
            other => {
                return Err(error::UnexpectedElement::new("Attribute", other.describe()).into())
            }
        }
    }

    Ok(Grid {
        name,
        topology,
        geometry,
        attributes,
    })
}

fn parse_topology(element: &BytesStart) -> Result<Topology, ParseError> {
    if element.name().as_ref() != b"Topology" {
        return Err(error::UnexpectedElement::new("Topology", element_name(element)).into());
    }

    let kind = typed_attribute(
        element,
        "TopologyType",
        "3DCoRectMesh, 3DRectMesh or 3DSMesh",
        TopologyType::from_name,
    )?;
    let dims = dimensions(element)?;

    Ok(Topology::new(kind, dims))
}

fn parse_attribute<R: BufRead>(
    cursor: &mut Cursor<R>,
    element: &BytesStart,
) -> Result<Attribute, ParseError> {
    let name = required_attribute(element, "Name")?;
    let kind = typed_attribute(
        element,
        "AttributeType",
        "Scalar or Vector",
        AttributeType::from_name,
    )?;
    // XDMF defaults to node centered values
    let center = match attribute_value(element, "Center")? {
        Some(center) => Center::from_name(&center).ok_or_else(|| {
            ParseError::from(error::UnexpectedAttributeValue::new(
                "Attribute".to_string(),
                "Center".to_string(),
                "Node or Cell".to_string(),
                center.clone(),
            ))
        })?,
        None => Center::Node,
    };

    let item_element = cursor.expect_start("DataItem")?;

    let value = if attribute_value(&item_element, "ItemType")?.as_deref() == Some("Function") {
        let dims = dimensions(&item_element)?;
        let items = parse_data_items(cursor, "DataItem")?;
        AttributeValue::Join { dims, items }
    } else {
        AttributeValue::Item(parse_data_item(cursor, &item_element)?)
    };

    cursor.expect_end("Attribute")?;

    Ok(Attribute {
        name,
        kind,
        center,
        value,
    })
}

/// read `DataItem` children until the closing tag of `parent`
fn parse_data_items<R: BufRead>(
    cursor: &mut Cursor<R>,
    parent: &str,
) -> Result<Vec<DataItem>, ParseError> {
    let mut items = Vec::new();

    loop {
        match cursor.next()? {
            Node::Start(element) if element.name().as_ref() == b"DataItem" => {
                items.push(parse_data_item(cursor, &element)?);
            }
            Node::End(name) if name == parent => break,
            other => {
                return Err(error::UnexpectedElement::new("DataItem", other.describe()).into())
            }
        }
    }

    Ok(items)
}

/// parse a `DataItem` whose start tag was just read, consuming its text and end tag
fn parse_data_item<R: BufRead>(
    cursor: &mut Cursor<R>,
    element: &BytesStart,
) -> Result<DataItem, ParseError> {
    let dims = dimensions(element)?;
    typed_attribute(element, "NumberType", "Float", |value| {
        (value == "Float").then_some(())
    })?;
    let precision = typed_attribute(element, "Precision", "4 or 8", Precision::from_xdmf)?;
    let format = typed_attribute(element, "Format", "HDF, Binary or XML", |value| {
        match value {
            "HDF" | "Binary" | "XML" => Some(value.to_string()),
            _ => None,
        }
    })?;

    if format == "Binary" {
        typed_attribute(element, "Endian", "Little", |value| {
            (value == "Little").then_some(())
        })?;
    }

    let text = match cursor.next()? {
        Node::Text(text) => {
            cursor.expect_end("DataItem")?;
            text
        }
        // an inline item without values
        Node::End(name) if name == "DataItem" => String::new(),
        other => return Err(error::UnexpectedElement::new("DataItem text", other.describe()).into()),
    };

    let location = match format.as_str() {
        "HDF" => {
            // dataset paths never contain `:`, file names may
            let (file, path) = text.trim().rsplit_once(':').ok_or_else(|| {
                ParseError::from(error::UnexpectedAttributeValue::new(
                    "DataItem".to_string(),
                    "text".to_string(),
                    "file.h5:/path/to/dataset".to_string(),
                    text.clone(),
                ))
            })?;
            Location::Hdf {
                file: file.to_string(),
                path: path.to_string(),
            }
        }
        "Binary" => Location::Binary {
            file: text.trim().to_string(),
        },
        _ => Location::Xml(text.split_ascii_whitespace().collect::<Vec<_>>().join(" ")),
    };

    Ok(DataItem::new(dims, precision, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECTILINEAR: &str = r#"<?xml version="1.0"?>
<!DOCTYPE Xdmf SYSTEM "Xdmf.dtd" []>
<Xdmf Version="3.0">
  <Domain>
    <Grid Name="scalar" GridType="Uniform">
      <Topology TopologyType="3DRectMesh" Dimensions="2 3 4"/>
      <Geometry GeometryType="VXVYVZ">
        <DataItem Dimensions="4" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/xcoords</DataItem>
        <DataItem Dimensions="3" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/ycoords</DataItem>
        <DataItem Dimensions="2" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/zcoords</DataItem>
      </Geometry>
      <Attribute Name="scalars" AttributeType="Scalar" Center="Node">
        <DataItem Dimensions="2 3 4" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/scalars</DataItem>
      </Attribute>
    </Grid>
  </Domain>
</Xdmf>
"#;

    #[test]
    fn parse_rectilinear() {
        let document = read_document(RECTILINEAR.as_bytes()).unwrap();
        assert_eq!(document.grids.len(), 1);

        let grid = &document.grids[0];
        assert_eq!(grid.name, "scalar");
        assert_eq!(grid.topology.kind, TopologyType::RectMesh3D);
        assert_eq!(grid.topology.dims, vec![2, 3, 4]);
        assert_eq!(grid.geometry.kind, GeometryType::VxVyVz);
        assert_eq!(grid.geometry.items.len(), 3);
        assert_eq!(
            grid.geometry.items[1].location,
            Location::Hdf {
                file: "scalar.h5".into(),
                path: "/ycoords".into()
            }
        );
        assert_eq!(grid.attributes[0].name, "scalars");
        assert_eq!(grid.attributes[0].value.items()[0].dims, vec![2, 3, 4]);
    }

    #[test]
    fn colon_in_hdf_file_name() {
        let text = RECTILINEAR.replace("scalar.h5:/scalars", "C:/runs/scalar.h5:/scalars");
        let document = read_document(text.as_bytes()).unwrap();

        assert_eq!(
            document.grids[0].attributes[0].value.items()[0].location,
            Location::Hdf {
                file: "C:/runs/scalar.h5".into(),
                path: "/scalars".into()
            }
        );
    }

    #[test]
    fn missing_attribute_reported() {
        let text = RECTILINEAR.replace(r#" TopologyType="3DRectMesh""#, "");
        let err = read_document(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::MissingAttribute(_)));
    }

    #[test]
    fn unknown_precision_reported() {
        let text = RECTILINEAR.replace(r#"Precision="4" Format="HDF">scalar.h5:/scalars"#, r#"Precision="2" Format="HDF">scalar.h5:/scalars"#);
        let err = read_document(text.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedAttributeValue(_)));
    }

    #[test]
    fn wrong_root_element() {
        let err = read_document("<Domain></Domain>".as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedElement(_)));
    }
}
