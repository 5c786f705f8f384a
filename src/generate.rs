//! Synthetic arrays for the example meshes.
//!
//! The values are arbitrary but smooth, so the output is easy to recognise once loaded
//! into a viewer. All functions loop `k` (z) outermost and `i` (x) innermost, matching the
//! layout of the arrays they produce.

use crate::prelude::*;
use crate::{Components3D, Curvilinear3D, Scalar3D, Vector3D};

use std::f64::consts::PI;

/// `sin(i / (atan(1) * nx)) * cos(2 j / ny)` at every point
pub fn sin_cos_scalars<NUM: Numeric>(extent: &Extent3D) -> Scalar3D<NUM> {
    let nx = extent.x_len() as f64;
    let ny = extent.y_len() as f64;
    let quarter_pi = 1f64.atan();

    Scalar3D::from_fn(extent, |i, j, _| {
        let x = i as f64 / (quarter_pi * nx);
        let y = 2.0 * j as f64 / ny;
        NUM::cast_from_f64(x.sin() * y.cos())
    })
}

fn reciprocal<NUM: Numeric>(i: usize, j: usize, k: usize) -> [NUM; 3] {
    [
        NUM::cast_from_f64(1.0 / (i + 1) as f64),
        NUM::cast_from_f64(1.0 / (j + 1) as f64),
        NUM::cast_from_f64(1.0 / (k + 1) as f64),
    ]
}

/// `(1 / (i + 1), 1 / (j + 1), 1 / (k + 1))` at every point, interleaved
pub fn reciprocal_vectors<NUM: Numeric>(extent: &Extent3D) -> Vector3D<NUM> {
    Vector3D::from_fn(extent, reciprocal)
}

/// the same values as [`reciprocal_vectors`], one array per component
pub fn reciprocal_components<NUM: Numeric>(extent: &Extent3D) -> Components3D<NUM> {
    Components3D::from_fn(extent, reciprocal)
}

/// Coordinates whose spacing grows along the axis: `c[0] = 0` and
/// `c[i] = c[i - 1] + (i - 1) * step`.
///
/// ```
/// let coords = h5mesh::generate::accumulating_axis::<f64>(4, 1.0);
/// assert_eq!(coords, vec![0.0, 0.0, 1.0, 3.0]);
/// ```
pub fn accumulating_axis<NUM: Numeric>(n: usize, step: f64) -> Vec<NUM> {
    let mut coords = Vec::with_capacity(n);
    let mut position = 0.0;

    for i in 0..n {
        coords.push(NUM::cast_from_f64(position));
        position += i as f64 * step;
    }

    coords
}

/// angle of row `j` when `ntheta` rows go once around the cylinder
fn theta(j: usize, ntheta: usize) -> f64 {
    if ntheta > 1 {
        j as f64 * 2.0 * PI / (ntheta - 1) as f64
    } else {
        0.0
    }
}

/// A cylinder of `nr x ntheta x nz` points.
///
/// The radius advances 0.1 per `i`, the angle goes from 0 to 2π over the `ntheta` rows (the
/// last row coincides with the first and closes the cylinder) and the height advances 0.1
/// per `k`. Coordinates are stored `[nz, ntheta, nr, 3]`.
pub fn cylindrical_coords<NUM: Numeric>(
    nr: usize,
    ntheta: usize,
    nz: usize,
) -> Result<Curvilinear3D<NUM>, Error> {
    let extent = Extent3D::new(nr, ntheta, nz)?;

    let coords = Vector3D::from_fn(&extent, |i, j, k| {
        let r = 0.1 * i as f64;
        let theta = theta(j, ntheta);
        let z = 0.1 * k as f64;

        [
            NUM::cast_from_f64(r * theta.cos()),
            NUM::cast_from_f64(r * theta.sin()),
            NUM::cast_from_f64(z),
        ]
    });

    Curvilinear3D::new(coords.inner())
}

/// `sin θ * cos θ` at every point of the cylinder built by [`cylindrical_coords`]
pub fn theta_scalars<NUM: Numeric>(
    nr: usize,
    ntheta: usize,
    nz: usize,
) -> Result<Scalar3D<NUM>, Error> {
    let extent = Extent3D::new(nr, ntheta, nz)?;

    Ok(Scalar3D::from_fn(&extent, |_, j, _| {
        let theta = theta(j, ntheta);
        NUM::cast_from_f64(theta.sin() * theta.cos())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn sin_cos_values() {
        let extent = Extent3D::new(8, 4, 2).unwrap();
        let scalars = sin_cos_scalars::<f64>(&extent);

        assert_eq!(scalars[[1, 0, 0]], 0.0);

        let expected = (3.0 / (1f64.atan() * 8.0)).sin() * (2.0 * 2.0 / 4.0f64).cos();
        assert!(close(scalars[[0, 2, 3]], expected));
    }

    #[test]
    fn reciprocal_layouts_agree() {
        let extent = Extent3D::new(3, 2, 2).unwrap();
        let vectors = reciprocal_vectors::<f32>(&extent);
        let comps = reciprocal_components::<f32>(&extent);

        assert_eq!(vectors[[1, 1, 2, 0]], 1.0 / 3.0);
        assert_eq!(vectors[[1, 1, 2, 1]], 0.5);
        assert_eq!(vectors[[1, 1, 2, 2]], 0.5);

        assert_eq!(comps.x[[1, 1, 2]], vectors[[1, 1, 2, 0]]);
        assert_eq!(comps.y[[1, 1, 2]], vectors[[1, 1, 2, 1]]);
        assert_eq!(comps.z[[1, 1, 2]], vectors[[1, 1, 2, 2]]);

        // the first point is finite
        assert!(vectors.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn axis_spacing_grows() {
        let coords = accumulating_axis::<f64>(5, 0.1);

        assert_eq!(coords.len(), 5);
        assert_eq!(coords[0], 0.0);
        assert_eq!(coords[1], 0.0);
        assert!(close(coords[2], 0.1));
        assert!(close(coords[3], 0.3));
        assert!(close(coords[4], 0.6));
        assert!(accumulating_axis::<f32>(0, 0.1).is_empty());
    }

    #[test]
    fn cylinder_closes() {
        let grid = cylindrical_coords::<f64>(4, 5, 2).unwrap();
        let coords = grid.coords();

        assert_eq!(coords.dim(), (2, 5, 4, 3));

        // first and last theta rows coincide
        for i in 0..4 {
            for c in 0..3 {
                assert!(close(coords[[1, 0, i, c]], coords[[1, 4, i, c]]));
            }
        }

        // radius 0.3 along x, height 0.1
        assert!(close(coords[[1, 0, 3, 0]], 0.3));
        assert!(close(coords[[1, 0, 3, 2]], 0.1));

        // quarter turn puts the point on the y axis
        assert!(close(coords[[0, 1, 2, 0]], 0.0));
        assert!(close(coords[[0, 1, 2, 1]], 0.2));
    }

    #[test]
    fn theta_scalars_match_cylinder() {
        let scalars = theta_scalars::<f64>(4, 5, 2).unwrap();

        assert_eq!(scalars.dim(), (2, 5, 4));
        // five rows sit on multiples of pi / 2
        assert!(scalars.iter().all(|value| close(*value, 0.0)));

        let scalars = theta_scalars::<f64>(1, 9, 1).unwrap();
        assert!(close(scalars[[0, 1, 0]], 0.5));
    }

    #[test]
    fn zero_sized_cylinder_rejected() {
        assert!(cylindrical_coords::<f32>(0, 5, 2).is_err());
        assert!(theta_scalars::<f32>(3, 0, 2).is_err());
    }
}
