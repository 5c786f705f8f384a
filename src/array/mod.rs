//! container types for the arrays written on a grid
//!
//! Every type wraps an `ndarray` array whose axes are ordered slowest varying first
//! (`[nz, ny, nx]`, plus a trailing component axis for interleaved vectors). Arrays that
//! are not in standard layout (after a transpose, say) are copied into it before writing.

mod components_3d;
mod scalar_3d;
mod vector_3d;

pub use components_3d::Components3D;
pub use scalar_3d::Scalar3D;
pub use vector_3d::Vector3D;

use crate::prelude::*;
use ndarray::{ArrayBase, Data, Dimension};
use std::borrow::Cow;

/// the buffer of an array in slowest-first order, borrowed when already laid out that way
pub(crate) fn standard_values<'a, S, D, NUM>(arr: &'a ArrayBase<S, D>) -> Cow<'a, [NUM]>
where
    S: Data<Elem = NUM>,
    D: Dimension,
    NUM: Numeric,
{
    match arr.as_slice() {
        Some(slice) => Cow::Borrowed(slice),
        None => Cow::Owned(arr.iter().copied().collect()),
    }
}

/// array shape of `arr` as a `Vec`, for the container
pub(crate) fn shape_of<S, D>(arr: &ArrayBase<S, D>) -> Vec<usize>
where
    S: Data,
    D: Dimension,
{
    arr.shape().to_vec()
}

#[test]
fn transposed_arrays_copied_in_logical_order() {
    let arr = ndarray::Array2::from_shape_vec((2, 3), vec![0.0f64, 1., 2., 3., 4., 5.]).unwrap();

    assert!(matches!(standard_values(&arr), Cow::Borrowed(_)));

    let transposed = arr.t();
    let values = standard_values(&transposed);
    assert!(matches!(values, Cow::Owned(_)));
    assert_eq!(values.as_ref(), &[0., 3., 1., 4., 2., 5.]);
}
