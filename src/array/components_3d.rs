use super::{shape_of, standard_values};
use crate::prelude::*;

/// Vector information stored as one scalar array per component.
///
/// Each component is written as its own dataset and the XDMF attribute assembles the
/// vector with a `JOIN` function. The dataset names default to `<name>_x`, `<name>_y`
/// and `<name>_z` and can be overridden with
/// [`with_dataset_names`](Components3D::with_dataset_names).
#[derive(Clone, PartialEq, Debug)]
pub struct Components3D<NUM> {
    pub x: Array3<NUM>,
    pub y: Array3<NUM>,
    pub z: Array3<NUM>,
    dataset_names: Option<[String; 3]>,
}

impl<NUM> Components3D<NUM>
where
    NUM: Numeric,
{
    /// Construct from three arrays of identical shape `[nz, ny, nx]`
    pub fn new(x: Array3<NUM>, y: Array3<NUM>, z: Array3<NUM>) -> Result<Self, Error> {
        if x.dim() != y.dim() || x.dim() != z.dim() {
            return Err(Error::InvalidDimensions(format!(
                "component arrays differ in shape: {:?} {:?} {:?}",
                x.shape(),
                y.shape(),
                z.shape()
            )));
        }

        Ok(Self {
            x,
            y,
            z,
            dataset_names: None,
        })
    }

    /// Construct from three flat buffers laid out `[nz, ny, nx]`
    pub fn from_vecs(
        extent: &Extent3D,
        x: Vec<NUM>,
        y: Vec<NUM>,
        z: Vec<NUM>,
    ) -> Result<Self, Error> {
        let [nz, ny, nx] = extent.dims();

        let to_array = |label: &str, values: Vec<NUM>| -> Result<Array3<NUM>, Error> {
            shape::check_len(label, &extent.dims(), values.len())?;
            Array3::from_shape_vec((nz, ny, nx), values)
                .map_err(|e| Error::InvalidDimensions(e.to_string()))
        };

        Self::new(
            to_array("x component", x)?,
            to_array("y component", y)?,
            to_array("z component", z)?,
        )
    }

    /// Construct by evaluating `f(i, j, k)` at every point of `extent`
    pub fn from_fn<F>(extent: &Extent3D, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> [NUM; 3],
    {
        let [nz, ny, nx] = extent.dims();
        let mut x = Array3::zeros((nz, ny, nx));
        let mut y = Array3::zeros((nz, ny, nx));
        let mut z = Array3::zeros((nz, ny, nx));

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let [u, v, w] = f(i, j, k);
                    x[[k, j, i]] = u;
                    y[[k, j, i]] = v;
                    z[[k, j, i]] = w;
                }
            }
        }

        Self {
            x,
            y,
            z,
            dataset_names: None,
        }
    }

    /// write the components to fixed dataset paths instead of `<name>_x/_y/_z`
    pub fn with_dataset_names<T: Into<String>>(mut self, x: T, y: T, z: T) -> Self {
        self.dataset_names = Some([x.into(), y.into(), z.into()]);
        self
    }

    /// dataset paths used when the attribute is called `name`
    pub fn dataset_names(&self, name: &str) -> [String; 3] {
        match &self.dataset_names {
            Some(names) => names.clone(),
            None => [
                format!("{name}_x"),
                format!("{name}_y"),
                format!("{name}_z"),
            ],
        }
    }
}

impl<NUM> Field for Components3D<NUM>
where
    NUM: Numeric,
{
    fn dims(&self) -> [usize; 3] {
        let (nz, ny, nx) = self.x.dim();
        [nz, ny, nx]
    }

    fn attribute_type(&self) -> AttributeType {
        AttributeType::Vector
    }

    fn write_field<C: Container>(
        &self,
        container: &mut C,
        name: &str,
        center: Center,
    ) -> Result<xdmf::Attribute, Error> {
        let names = self.dataset_names(name);
        let mut items = Vec::with_capacity(3);

        for (dataset, arr) in names.iter().zip([&self.x, &self.y, &self.z]) {
            let values = standard_values(arr);
            items.push(container.write_dataset(dataset, &shape_of(arr), &*values)?);
        }

        let [nz, ny, nx] = self.dims();

        Ok(xdmf::Attribute::new(
            name,
            AttributeType::Vector,
            center,
            xdmf::AttributeValue::Join {
                dims: vec![nz, ny, nx, 3],
                items,
            },
        ))
    }
}

#[test]
fn default_and_custom_dataset_names() {
    let extent = Extent3D::new(2, 2, 2).unwrap();
    let comps = Components3D::<f32>::from_fn(&extent, |_, _, _| [0.0; 3]);

    assert_eq!(
        comps.dataset_names("velocity"),
        ["velocity_x", "velocity_y", "velocity_z"]
    );

    let comps = comps.with_dataset_names("xcomps", "ycomps", "zcomps");
    assert_eq!(comps.dataset_names("vectors"), ["xcomps", "ycomps", "zcomps"]);
}

#[test]
fn mismatched_components_rejected() {
    let extent = Extent3D::new(2, 2, 2).unwrap();

    assert!(matches!(
        Components3D::from_vecs(&extent, vec![0.0f64; 8], vec![0.0; 8], vec![0.0; 7]),
        Err(Error::ShapeMismatch { .. })
    ));
    assert!(Components3D::new(
        Array3::<f64>::zeros((2, 2, 2)),
        Array3::zeros((2, 2, 2)),
        Array3::zeros((2, 2, 1)),
    )
    .is_err());
}

#[test]
fn written_as_joined_attribute() {
    let extent = Extent3D::new(3, 2, 1).unwrap();
    let comps = Components3D::<f32>::from_fn(&extent, |i, j, k| {
        [i as f32, j as f32, k as f32]
    })
    .with_dataset_names("xcomps", "ycomps", "zcomps");

    let mut container = crate::XmlContainer::new();
    let attribute = comps
        .write_field(&mut container, "vectors", Center::Node)
        .unwrap();

    match &attribute.value {
        xdmf::AttributeValue::Join { dims, items } => {
            assert_eq!(dims, &vec![1, 2, 3, 3]);
            assert_eq!(items.len(), 3);
        }
        other => panic!("expected a joined attribute, got {other:?}"),
    }

    assert_eq!(
        container.dataset("xcomps").unwrap().1,
        &[0.0, 1.0, 2.0, 0.0, 1.0, 2.0]
    );
    assert_eq!(
        container.dataset("ycomps").unwrap().1,
        &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]
    );
}
