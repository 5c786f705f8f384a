//! # XDMF descriptions
//!
//! HDF5 files hold the heavy data but say nothing about what the arrays mean. Visualization
//! tools read an XDMF document next to them which names the grid type, points at the
//! coordinate datasets and lists the attributes (fields) defined on the grid.
//!
//! The types here model the subset of XDMF 3 this crate writes: one or more uniform
//! structured grids per document, each with a topology, a geometry and any number of
//! scalar or vector attributes. A [`Document`] is produced by [`write_mesh`](crate::write_mesh),
//! serialized with [`write_document`] and can be read back with [`read_document`].
//!
//! A document written for a rectilinear grid looks like:
//!
//! ```text
//! <?xml version="1.0"?>
//! <!DOCTYPE Xdmf SYSTEM "Xdmf.dtd" []>
//! <Xdmf Version="3.0">
//!   <Domain>
//!     <Grid Name="scalar" GridType="Uniform">
//!       <Topology TopologyType="3DRectMesh" Dimensions="128 192 256"/>
//!       <Geometry GeometryType="VXVYVZ">
//!         <DataItem Dimensions="256" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/xcoords</DataItem>
//!         <DataItem Dimensions="192" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/ycoords</DataItem>
//!         <DataItem Dimensions="128" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/zcoords</DataItem>
//!       </Geometry>
//!       <Attribute Name="scalars" AttributeType="Scalar" Center="Node">
//!         <DataItem Dimensions="128 192 256" NumberType="Float" Precision="4" Format="HDF">scalar.h5:/scalars</DataItem>
//!       </Attribute>
//!     </Grid>
//!   </Domain>
//! </Xdmf>
//! ```

mod error;
mod parse;
mod write;

pub use error::ParseError;
pub use parse::{read_document, read_path};
pub use write::write_document;

use crate::Numeric;
use crate::Precision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyType {
    /// uniform spacing, described by an origin and a spacing
    CoRectMesh3D,
    /// per-axis coordinate arrays
    RectMesh3D,
    /// explicit coordinates for every point
    SMesh3D,
}

impl TopologyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoRectMesh3D => "3DCoRectMesh",
            Self::RectMesh3D => "3DRectMesh",
            Self::SMesh3D => "3DSMesh",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "3DCoRectMesh" => Some(Self::CoRectMesh3D),
            "3DRectMesh" => Some(Self::RectMesh3D),
            "3DSMesh" => Some(Self::SMesh3D),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    OriginDxDyDz,
    VxVyVz,
    Xyz,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OriginDxDyDz => "ORIGIN_DXDYDZ",
            Self::VxVyVz => "VXVYVZ",
            Self::Xyz => "XYZ",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ORIGIN_DXDYDZ" => Some(Self::OriginDxDyDz),
            "VXVYVZ" => Some(Self::VxVyVz),
            "XYZ" => Some(Self::Xyz),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Scalar,
    Vector,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "Scalar",
            Self::Vector => "Vector",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Scalar" => Some(Self::Scalar),
            "Vector" => Some(Self::Vector),
            _ => None,
        }
    }
}

/// where the values of an attribute live on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Center {
    #[default]
    Node,
    Cell,
}

impl Center {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Cell => "Cell",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Node" => Some(Self::Node),
            "Cell" => Some(Self::Cell),
            _ => None,
        }
    }
}

/// where the values of a [`DataItem`] are stored
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// a dataset inside an HDF5 file, written as `file.h5:/path`
    Hdf { file: String, path: String },
    /// a raw little endian file holding only this array
    Binary { file: String },
    /// values written inline, separated by single spaces
    Xml(String),
}

impl Location {
    pub(crate) fn format(&self) -> &'static str {
        match self {
            Self::Hdf { .. } => "HDF",
            Self::Binary { .. } => "Binary",
            Self::Xml(_) => "XML",
        }
    }

    pub(crate) fn text(&self) -> String {
        match self {
            Self::Hdf { file, path } => format!("{file}:{path}"),
            Self::Binary { file } => file.clone(),
            Self::Xml(values) => values.clone(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hdf { file, path } => write!(f, "{file}:{path}"),
            Self::Binary { file } => write!(f, "{file}"),
            Self::Xml(values) => write!(f, "{} inline values", values.split_ascii_whitespace().count()),
        }
    }
}

/// One array as XDMF sees it: its shape, value type and storage location
#[derive(Debug, Clone, PartialEq)]
pub struct DataItem {
    pub dims: Vec<usize>,
    pub precision: Precision,
    pub location: Location,
}

impl DataItem {
    pub fn new(dims: Vec<usize>, precision: Precision, location: Location) -> Self {
        Self {
            dims,
            precision,
            location,
        }
    }

    /// an item whose values are written directly into the document
    pub fn inline<NUM: Numeric>(dims: Vec<usize>, values: &[NUM]) -> Self {
        Self::new(dims, NUM::as_precision(), Location::Xml(inline_values(values)))
    }

    /// number of values the item declares, an error if its dims overflow a `usize`
    pub fn num_values(&self) -> Result<usize, crate::Error> {
        crate::shape_len(&self.dims)
    }
}

/// Format values for an inline (`Format="XML"`) item
pub fn inline_values<NUM: Numeric>(values: &[NUM]) -> String {
    let mut buffer = ryu::Buffer::new();
    let mut out = String::with_capacity(values.len() * 8);

    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(value.format(&mut buffer));
    }

    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    pub kind: TopologyType,
    /// point counts, slowest varying axis first
    pub dims: Vec<usize>,
}

impl Topology {
    pub fn new(kind: TopologyType, dims: Vec<usize>) -> Self {
        Self { kind, dims }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: GeometryType,
    pub items: Vec<DataItem>,
}

impl Geometry {
    pub fn new(kind: GeometryType, items: Vec<DataItem>) -> Self {
        Self { kind, items }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// values stored in a single array
    Item(DataItem),
    /// a vector assembled from one array per component with an XDMF `JOIN` function
    Join {
        dims: Vec<usize>,
        items: Vec<DataItem>,
    },
}

impl AttributeValue {
    /// all arrays this attribute reads from
    pub fn items(&self) -> &[DataItem] {
        match self {
            Self::Item(item) => std::slice::from_ref(item),
            Self::Join { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeType,
    pub center: Center,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new<T: Into<String>>(
        name: T,
        kind: AttributeType,
        center: Center,
        value: AttributeValue,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            center,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub name: String,
    pub topology: Topology,
    pub geometry: Geometry,
    pub attributes: Vec<Attribute>,
}

impl Grid {
    /// every array referenced by the grid, geometry first
    pub fn items(&self) -> impl Iterator<Item = &DataItem> {
        self.geometry
            .items
            .iter()
            .chain(self.attributes.iter().flat_map(|att| att.value.items()))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub grids: Vec<Grid>,
}

impl Document {
    pub fn new(grids: Vec<Grid>) -> Self {
        Self { grids }
    }
}

#[test]
fn inline_values_single_spaced() {
    assert_eq!(inline_values(&[0.0f64, 1.5, -2.0]), "0.0 1.5 -2.0");
    assert_eq!(inline_values::<f32>(&[]), "");
}

#[test]
fn hdf_location_text() {
    let location = Location::Hdf {
        file: "scalar.h5".into(),
        path: "/scalars".into(),
    };
    assert_eq!(location.text(), "scalar.h5:/scalars");
    assert_eq!(location.format(), "HDF");
}
