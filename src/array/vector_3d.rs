use super::{shape_of, standard_values};
use crate::prelude::*;

#[derive(Deref, DerefMut, Into, Clone, PartialEq, Default, Debug)]
/// Array container for vector information in a 3D domain such as velocity
///
/// The array is indexed `[k, j, i, component]` and written as a single dataset with the
/// components interleaved, so component `c` of point `(i, j, k)` sits at
/// `3 * extent.linear_index(i, j, k) + c` in the flat buffer. The last axis always has
/// length 3.
///
/// To write one dataset per component instead, see [Components3D](crate::Components3D).
pub struct Vector3D<NUM>(Array4<NUM>);

impl<NUM> Vector3D<NUM>
where
    NUM: Numeric,
{
    /// Construct a `Vector3D` from an array shaped `[nz, ny, nx, 3]`
    pub fn new(arr: Array4<NUM>) -> Result<Self, Error> {
        let (_, _, _, components) = arr.dim();

        if components != 3 {
            return Err(Error::InvalidDimensions(format!(
                "vector arrays need 3 components along the last axis, got {components}"
            )));
        }

        Ok(Self(arr))
    }

    /// Construct a `Vector3D` from a flat interleaved buffer laid out `[nz, ny, nx, 3]`
    pub fn from_vec(extent: &Extent3D, values: Vec<NUM>) -> Result<Self, Error> {
        let dims = extent.vector_dims(3);
        shape::check_len("vector values", &dims, values.len())?;

        let arr = Array4::from_shape_vec((dims[0], dims[1], dims[2], 3), values)
            .map_err(|e| Error::InvalidDimensions(e.to_string()))?;

        Ok(Self(arr))
    }

    /// Construct a `Vector3D` by evaluating `f(i, j, k)` at every point of `extent`
    pub fn from_fn<F>(extent: &Extent3D, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> [NUM; 3],
    {
        let [nz, ny, nx] = extent.dims();
        let mut arr = Array4::zeros((nz, ny, nx, 3));

        for ((k, j, i), mut point) in arr
            .lanes_mut(ndarray::Axis(3))
            .into_iter()
            .enumerate()
            .map(|(idx, lane)| (unflatten(idx, ny, nx), lane))
        {
            point.assign(&ndarray::aview1(&f(i, j, k)));
        }

        Self(arr)
    }

    pub fn inner(self) -> Array4<NUM> {
        self.0
    }

    /// interleaved values in the order they are written to the container
    pub fn as_standard_slice(&self) -> std::borrow::Cow<'_, [NUM]> {
        standard_values(&self.0)
    }
}

fn unflatten(idx: usize, ny: usize, nx: usize) -> (usize, usize, usize) {
    (idx / (ny * nx), (idx / nx) % ny, idx % nx)
}

impl<NUM> Field for Vector3D<NUM>
where
    NUM: Numeric,
{
    fn dims(&self) -> [usize; 3] {
        let (nz, ny, nx, _) = self.0.dim();
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
        let values = self.as_standard_slice();
        let item = container.write_dataset(name, &shape_of(&self.0), &*values)?;

        Ok(xdmf::Attribute::new(
            name,
            AttributeType::Vector,
            center,
            xdmf::AttributeValue::Item(item),
        ))
    }
}

#[test]
fn components_interleaved() {
    let extent = Extent3D::new(4, 3, 2).unwrap();
    let vector = Vector3D::<f64>::from_fn(&extent, |i, j, k| [i as f64, j as f64, k as f64]);
    let values = vector.as_standard_slice();

    for k in 0..2 {
        for j in 0..3 {
            for i in 0..4 {
                let idx = 3 * extent.linear_index(i, j, k);
                assert_eq!(&values[idx..idx + 3], &[i as f64, j as f64, k as f64]);
            }
        }
    }
}

#[test]
fn last_axis_must_hold_three_components() {
    assert!(Vector3D::new(Array4::<f32>::zeros((2, 2, 2, 2))).is_err());
    assert!(Vector3D::new(Array4::<f32>::zeros((2, 2, 2, 3))).is_ok());
}

#[test]
fn written_with_component_axis() {
    let extent = Extent3D::new(2, 1, 1).unwrap();
    let vector = Vector3D::from_vec(&extent, vec![1.0f32, 2., 3., 4., 5., 6.]).unwrap();

    let mut container = crate::XmlContainer::new();
    let attribute = vector
        .write_field(&mut container, "vectors", Center::Node)
        .unwrap();

    assert_eq!(vector.dims(), [1, 1, 2]);
    assert_eq!(attribute.kind, AttributeType::Vector);
    assert_eq!(attribute.value.items()[0].dims, vec![1, 1, 2, 3]);
}
