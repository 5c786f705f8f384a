use super::{shape_of, standard_values};
use crate::prelude::*;

#[derive(Deref, DerefMut, Into, Clone, PartialEq, Default, Debug)]
/// Array container for scalar information in a 3D domain such as pressure
///
/// The array is indexed `[k, j, i]`: the first axis holds z information and the last axis
/// holds x information, matching the layout of the dataset written to the container.
/// No vector information can be stored in `Scalar3D`. If you need to store vector data, see
/// [Vector3D](crate::Vector3D) or [Components3D](crate::Components3D)
///
/// ## Example
///
/// For some scalar data (such as a pressure field, or density field), if your data is `nx=100`,
/// `ny=200` and `nz=300` then your array shape should be `(300, 200, 100)`
pub struct Scalar3D<NUM>(Array3<NUM>);

impl<NUM> Scalar3D<NUM>
where
    NUM: Numeric,
{
    /// Construct a `Scalar3D` from an array.
    pub fn new(arr: Array3<NUM>) -> Self {
        Self(arr)
    }

    /// Construct a `Scalar3D` from a flat buffer laid out `[nz, ny, nx]`
    pub fn from_vec(extent: &Extent3D, values: Vec<NUM>) -> Result<Self, Error> {
        shape::check_len("scalar values", &extent.dims(), values.len())?;

        let [nz, ny, nx] = extent.dims();
        let arr = Array3::from_shape_vec((nz, ny, nx), values)
            .map_err(|e| Error::InvalidDimensions(e.to_string()))?;

        Ok(Self(arr))
    }

    /// Construct a `Scalar3D` by evaluating `f(i, j, k)` at every point of `extent`
    pub fn from_fn<F>(extent: &Extent3D, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> NUM,
    {
        let [nz, ny, nx] = extent.dims();
        Self(Array3::from_shape_fn((nz, ny, nx), |(k, j, i)| f(i, j, k)))
    }

    /// get the array that this type wraps.
    /// usually this method is not required because `Scalar3D` implements [`DerefMut`](std::ops::DerefMut) and
    /// [`Deref`](std::ops::Deref)
    pub fn inner(self) -> Array3<NUM> {
        self.0
    }

    /// values in the order they are written to the container
    pub fn as_standard_slice(&self) -> std::borrow::Cow<'_, [NUM]> {
        standard_values(&self.0)
    }
}

impl<NUM> Field for Scalar3D<NUM>
where
    NUM: Numeric,
{
    fn dims(&self) -> [usize; 3] {
        let (nz, ny, nx) = self.0.dim();
        [nz, ny, nx]
    }

    fn attribute_type(&self) -> AttributeType {
        AttributeType::Scalar
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
            AttributeType::Scalar,
            center,
            xdmf::AttributeValue::Item(item),
        ))
    }
}

#[test]
fn iter_order() {
    let extent = Extent3D::new(3, 2, 4).unwrap();

    let scalar = Scalar3D::<f64>::from_fn(&extent, |i, j, k| extent.linear_index(i, j, k) as f64);

    let expected = (0..extent.num_points())
        .map(|idx| idx as f64)
        .collect::<Vec<_>>();

    assert_eq!(scalar.as_standard_slice().as_ref(), expected.as_slice());
    assert_eq!(scalar.dims(), [4, 2, 3]);
}

#[test]
fn from_vec_checks_length() {
    let extent = Extent3D::new(3, 2, 4).unwrap();

    assert!(Scalar3D::from_vec(&extent, vec![0.0f32; 24]).is_ok());
    assert!(matches!(
        Scalar3D::from_vec(&extent, vec![0.0f32; 23]),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn written_as_one_dataset() {
    let extent = Extent3D::new(2, 2, 1).unwrap();
    let scalar = Scalar3D::from_vec(&extent, vec![1.0f32, 2., 3., 4.]).unwrap();

    let mut container = crate::XmlContainer::new();
    let attribute = scalar
        .write_field(&mut container, "scalars", Center::Node)
        .unwrap();

    assert_eq!(attribute.kind, AttributeType::Scalar);
    assert_eq!(attribute.value.items()[0].dims, vec![1, 2, 2]);
    assert_eq!(
        container.dataset("/scalars").unwrap().1,
        &[1.0, 2.0, 3.0, 4.0]
    );
}
