use crate::prelude::*;
use crate::xdmf::{DataItem, Geometry, GeometryType, TopologyType};

/// A uniform grid: every point position follows from an origin and a spacing.
///
/// Nothing is written to the container for the geometry. The XDMF document holds the
/// origin and spacing inline, ordered z, y, x like every other shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Image3D {
    pub extent: Extent3D,
    /// position of the first point, `[x, y, z]`
    pub origin: [f64; 3],
    /// distance between neighbouring points, `[dx, dy, dz]`
    pub spacing: [f64; 3],
}

impl Image3D {
    /// a grid starting at the origin with unit spacing
    pub fn new(extent: Extent3D) -> Self {
        Self {
            extent,
            origin: [0.0; 3],
            spacing: [1.0; 3],
        }
    }

    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_spacing(mut self, spacing: [f64; 3]) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Domain for Image3D {
    fn extent(&self) -> Extent3D {
        self.extent
    }

    fn topology(&self) -> TopologyType {
        TopologyType::CoRectMesh3D
    }

    fn write_geometry<C: Container>(&self, _container: &mut C) -> Result<Geometry, Error> {
        let [x0, y0, z0] = self.origin;
        let [dx, dy, dz] = self.spacing;

        Ok(Geometry::new(
            GeometryType::OriginDxDyDz,
            vec![
                DataItem::inline(vec![3], &[z0, y0, x0]),
                DataItem::inline(vec![3], &[dz, dy, dx]),
            ],
        ))
    }
}

#[test]
fn origin_and_spacing_inline_reversed() {
    let extent = Extent3D::new(4, 3, 2).unwrap();
    let image = Image3D::new(extent)
        .with_origin([1.0, 2.0, 3.0])
        .with_spacing([0.5, 0.25, 0.125]);

    let mut container = crate::XmlContainer::new();
    let geometry = image.write_geometry(&mut container).unwrap();

    assert_eq!(geometry.kind, GeometryType::OriginDxDyDz);
    assert_eq!(
        geometry.items[0].location,
        xdmf::Location::Xml("3.0 2.0 1.0".into())
    );
    assert_eq!(
        geometry.items[1].location,
        xdmf::Location::Xml("0.125 0.25 0.5".into())
    );

    // the geometry lives in the document only
    assert_eq!(container.names().count(), 0);
}
