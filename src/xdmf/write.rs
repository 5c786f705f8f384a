use super::{Attribute, AttributeValue, DataItem, Document, Geometry, Grid, Topology};
use crate::shape::dimension_string;
use crate::Error;

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

const XDMF_VERSION: &str = "3.0";

/// Write an XDMF document to a `Writer`
pub fn write_document<W: Write>(writer: W, document: &Document) -> Result<(), Error> {
    let mut writer = Writer::new_with_indent(writer, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    // written by hand so the doctype spacing does not depend on the xml writer
    writer
        .inner()
        .write_all(b"\n<!DOCTYPE Xdmf SYSTEM \"Xdmf.dtd\" []>")?;

    start_element(&mut writer, "Xdmf", &[("Version", XDMF_VERSION)])?;
    start_element(&mut writer, "Domain", &[])?;

    for grid in &document.grids {
        write_grid(&mut writer, grid)?;
    }

    end_element(&mut writer, "Domain")?;
    end_element(&mut writer, "Xdmf")?;

    writer.inner().write_all(b"\n")?;

    Ok(())
}

fn write_grid<W: Write>(writer: &mut Writer<W>, grid: &Grid) -> Result<(), Error> {
    start_element(
        writer,
        "Grid",
        &[("Name", grid.name.as_str()), ("GridType", "Uniform")],
    )?;

    write_topology(writer, &grid.topology)?;
    write_geometry(writer, &grid.geometry)?;

    for attribute in &grid.attributes {
        write_attribute(writer, attribute)?;
    }

    end_element(writer, "Grid")
}

fn write_topology<W: Write>(writer: &mut Writer<W>, topology: &Topology) -> Result<(), Error> {
    let dims = dimension_string(&topology.dims);
    empty_element(
        writer,
        "Topology",
        &[
            ("TopologyType", topology.kind.as_str()),
            ("Dimensions", dims.as_str()),
        ],
    )
}

fn write_geometry<W: Write>(writer: &mut Writer<W>, geometry: &Geometry) -> Result<(), Error> {
    start_element(writer, "Geometry", &[("GeometryType", geometry.kind.as_str())])?;

    for item in &geometry.items {
        write_data_item(writer, item)?;
    }

    end_element(writer, "Geometry")
}

fn write_attribute<W: Write>(writer: &mut Writer<W>, attribute: &Attribute) -> Result<(), Error> {
    start_element(
        writer,
        "Attribute",
        &[
            ("Name", attribute.name.as_str()),
            ("AttributeType", attribute.kind.as_str()),
            ("Center", attribute.center.as_str()),
        ],
    )?;

    match &attribute.value {
        AttributeValue::Item(item) => write_data_item(writer, item)?,
        AttributeValue::Join { dims, items } => {
            // JOIN($0, $1, $2) interleaves the components into the last axis
            let arguments = (0..items.len())
                .map(|idx| format!("${idx}"))
                .collect::<Vec<_>>()
                .join(", ");
            let function = format!("JOIN({arguments})");
            let dims = dimension_string(dims);

            start_element(
                writer,
                "DataItem",
                &[
                    ("ItemType", "Function"),
                    ("Function", function.as_str()),
                    ("Dimensions", dims.as_str()),
                ],
            )?;

            for item in items {
                write_data_item(writer, item)?;
            }

            end_element(writer, "DataItem")?;
        }
    }

    end_element(writer, "Attribute")
}

/// write a single `DataItem` element pointing at (or containing) an array
pub(crate) fn write_data_item<W: Write>(
    writer: &mut Writer<W>,
    item: &DataItem,
) -> Result<(), Error> {
    let dims = dimension_string(&item.dims);
    let mut attributes = vec![
        ("Dimensions", dims.as_str()),
        ("NumberType", "Float"),
        ("Precision", item.precision.as_xdmf()),
        ("Format", item.location.format()),
    ];

    if let super::Location::Binary { .. } = item.location {
        attributes.push(("Endian", "Little"));
    }

    start_element(writer, "DataItem", &attributes)?;

    let text = item.location.text();
    writer.write_event(Event::Text(BytesText::new(&text)))?;

    end_element(writer, "DataItem")
}

fn start_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), Error> {
    let element = make_element(name, attributes);
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn empty_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), Error> {
    let element = make_element(name, attributes);
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn end_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn make_element<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdmf::*;
    use crate::Precision;

    fn write_to_string(document: &Document) -> String {
        let mut out = Vec::new();
        write_document(&mut out, document).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn image_grid_document() {
        let grid = Grid {
            name: "scalar".into(),
            topology: Topology::new(TopologyType::CoRectMesh3D, vec![2, 3, 4]),
            geometry: Geometry::new(
                GeometryType::OriginDxDyDz,
                vec![
                    DataItem::inline(vec![3], &[0.0f64, 0.0, 0.0]),
                    DataItem::inline(vec![3], &[1.0f64, 1.0, 1.0]),
                ],
            ),
            attributes: vec![Attribute::new(
                "scalars",
                AttributeType::Scalar,
                Center::Node,
                AttributeValue::Item(DataItem::new(
                    vec![2, 3, 4],
                    Precision::Float32,
                    Location::Hdf {
                        file: "scalar.h5".into(),
                        path: "/scalars".into(),
                    },
                )),
            )],
        };

        let text = write_to_string(&Document::new(vec![grid]));

        assert!(text.starts_with("<?xml version=\"1.0\"?>"));
        assert!(text.contains("<!DOCTYPE Xdmf SYSTEM \"Xdmf.dtd\" []>"));
        assert!(text.contains("<Xdmf Version=\"3.0\">"));
        assert!(text
            .contains("<Topology TopologyType=\"3DCoRectMesh\" Dimensions=\"2 3 4\"/>"));
        assert!(text.contains("<Geometry GeometryType=\"ORIGIN_DXDYDZ\">"));
        assert!(text.contains(">0.0 0.0 0.0</DataItem>"));
        assert!(text.contains(
            "<DataItem Dimensions=\"2 3 4\" NumberType=\"Float\" Precision=\"4\" Format=\"HDF\">scalar.h5:/scalars</DataItem>"
        ));
        assert!(text.ends_with("</Xdmf>\n"));
    }

    #[test]
    fn joined_vector_document() {
        let item = |file: &str| {
            DataItem::new(
                vec![2, 3, 4],
                Precision::Float32,
                Location::Binary { file: file.into() },
            )
        };

        let grid = Grid {
            name: "vector_comps".into(),
            topology: Topology::new(TopologyType::CoRectMesh3D, vec![2, 3, 4]),
            geometry: Geometry::new(GeometryType::OriginDxDyDz, vec![]),
            attributes: vec![Attribute::new(
                "vectors",
                AttributeType::Vector,
                Center::Node,
                AttributeValue::Join {
                    dims: vec![2, 3, 4, 3],
                    items: vec![item("x.bin"), item("y.bin"), item("z.bin")],
                },
            )],
        };

        let text = write_to_string(&Document::new(vec![grid]));

        assert!(text.contains(
            "<DataItem ItemType=\"Function\" Function=\"JOIN($0, $1, $2)\" Dimensions=\"2 3 4 3\">"
        ));
        assert!(text.contains("Format=\"Binary\" Endian=\"Little\">x.bin</DataItem>"));
    }
}
