use crate::Error;

/// Number of points along each axis of a structured grid.
///
/// The container convention is "fastest is last": an array on this grid has the shape
/// `[nz, ny, nx]` (see [`dims`](Extent3D::dims)), so the `x` index varies fastest in the
/// flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent3D {
    nx: usize,
    ny: usize,
    nz: usize,
}

impl Extent3D {
    /// create an extent from point counts. Every count must be non-zero
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, Error> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(Error::EmptyExtent([nx, ny, nz]));
        }

        // interleaved vectors are the largest arrays written on an extent
        shape_len(&[nz, ny, nx, 3])?;

        Ok(Self { nx, ny, nz })
    }

    /// create an extent from a shape ordered `[nz, ny, nx]`
    pub fn from_dims(dims: &[usize]) -> Result<Self, Error> {
        match dims {
            [nz, ny, nx] => Self::new(*nx, *ny, *nz),
            _ => Err(Error::InvalidDimensions(dimension_string(dims))),
        }
    }

    /// parse the `Dimensions` attribute of an XDMF topology, `"nz ny nx"`
    ///
    /// # Example
    /// ```
    /// let extent = h5mesh::Extent3D::from_dimension_string("128 192 256").unwrap();
    /// assert_eq!(extent.x_len(), 256);
    /// ```
    pub fn from_dimension_string(dimensions: &str) -> Result<Self, Error> {
        let dims = parse_dimension_string(dimensions)?;
        Self::from_dims(&dims)
    }

    pub fn x_len(&self) -> usize {
        self.nx
    }

    pub fn y_len(&self) -> usize {
        self.ny
    }

    pub fn z_len(&self) -> usize {
        self.nz
    }

    /// array shape of a scalar on the points of this grid, `[nz, ny, nx]`
    pub fn dims(&self) -> [usize; 3] {
        [self.nz, self.ny, self.nx]
    }

    /// array shape of an interleaved vector with `components` values per point
    pub fn vector_dims(&self, components: usize) -> [usize; 4] {
        [self.nz, self.ny, self.nx, components]
    }

    /// array shape of a scalar on the cells of this grid
    pub fn cell_dims(&self) -> [usize; 3] {
        [
            self.nz.saturating_sub(1),
            self.ny.saturating_sub(1),
            self.nx.saturating_sub(1),
        ]
    }

    pub fn num_points(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn num_cells(&self) -> usize {
        self.cell_dims().iter().product()
    }

    /// position of point `(i, j, k)` in a flat buffer laid out `[nz, ny, nx]`
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.ny + j) * self.nx + i
    }
}

/// Format a shape the way XDMF expects it in a `Dimensions` attribute
pub fn dimension_string(dims: &[usize]) -> String {
    dims.iter()
        .map(|dim| dim.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a whitespace separated list of dimensions
pub fn parse_dimension_string(dimensions: &str) -> Result<Vec<usize>, Error> {
    let dims = dimensions
        .split_ascii_whitespace()
        .map(|token| token.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidDimensions(dimensions.to_string()))?;

    if dims.is_empty() {
        return Err(Error::InvalidDimensions(dimensions.to_string()));
    }

    Ok(dims)
}

/// Number of values an array of `shape` holds, or an error if that count does not fit
/// in a `usize`
pub fn shape_len(shape: &[usize]) -> Result<usize, Error> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or_else(|| {
            Error::InvalidDimensions(format!(
                "{} holds too many values",
                dimension_string(shape)
            ))
        })
}

/// Check that a buffer of `len` values fills `shape` exactly
pub fn check_len(name: &str, shape: &[usize], len: usize) -> Result<(), Error> {
    let expected = shape_len(shape)?;

    if expected != len {
        return Err(Error::ShapeMismatch {
            name: name.to_string(),
            shape: shape.to_vec(),
            expected,
            actual: len,
        });
    }

    Ok(())
}

#[test]
fn dims_are_slowest_first() {
    let extent = Extent3D::new(256, 192, 128).unwrap();

    assert_eq!(extent.dims(), [128, 192, 256]);
    assert_eq!(extent.vector_dims(3), [128, 192, 256, 3]);
    assert_eq!(extent.cell_dims(), [127, 191, 255]);
    assert_eq!(extent.num_points(), 256 * 192 * 128);
}

#[test]
fn linear_index_matches_nested_loops() {
    let extent = Extent3D::new(4, 3, 2).unwrap();
    let mut expected = 0;

    for k in 0..2 {
        for j in 0..3 {
            for i in 0..4 {
                assert_eq!(extent.linear_index(i, j, k), expected);
                expected += 1;
            }
        }
    }
}

#[test]
fn zero_extent_rejected() {
    assert!(matches!(
        Extent3D::new(4, 0, 2),
        Err(Error::EmptyExtent([4, 0, 2]))
    ));
}

#[test]
fn dimension_strings() {
    let extent = Extent3D::from_dimension_string(" 2  3 4 ").unwrap();
    assert_eq!(extent, Extent3D::new(4, 3, 2).unwrap());
    assert_eq!(dimension_string(&extent.dims()), "2 3 4");

    assert!(Extent3D::from_dimension_string("2 3").is_err());
    assert!(Extent3D::from_dimension_string("2 three 4").is_err());
    assert!(parse_dimension_string("").is_err());
}

#[test]
fn buffer_length_checked() {
    assert!(check_len("scalars", &[2, 3, 4], 24).is_ok());

    let err = check_len("scalars", &[2, 3, 4], 23).unwrap_err();
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            expected: 24,
            actual: 23,
            ..
        }
    ));
}

#[test]
fn overflowing_shapes_rejected() {
    let huge = (1usize << (usize::BITS - 1)) + 1;

    assert!(matches!(
        check_len("x", &[huge, 2], 2),
        Err(Error::InvalidDimensions(_))
    ));
    assert!(matches!(shape_len(&[huge, 2]), Err(Error::InvalidDimensions(_))));
    assert_eq!(shape_len(&[huge, 1]).unwrap(), huge);

    assert!(matches!(
        Extent3D::new(usize::MAX, 2, 1),
        Err(Error::InvalidDimensions(_))
    ));
}
