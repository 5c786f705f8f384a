use crate::data::MeshData;
use crate::xdmf::{self, Attribute, Center, Document, Grid, Topology};
use crate::{BinaryContainer, Container, Domain, Error, Extent3D, Field, FieldSet, Format, XmlContainer};

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

/// Write a single field after checking that it fits the grid.
///
/// Node centered fields must have the point shape of `extent` (`[nz, ny, nx]`), cell
/// centered fields one less along every axis.
pub fn write_field<C, F>(
    container: &mut C,
    field: &F,
    name: &str,
    center: Center,
    extent: &Extent3D,
) -> Result<Attribute, Error>
where
    C: Container,
    F: Field,
{
    let expected = match center {
        Center::Node => extent.dims(),
        Center::Cell => extent.cell_dims(),
    };

    let actual = field.dims();

    if actual != expected {
        return Err(Error::FieldShape {
            name: name.to_string(),
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }

    field.write_field(container, name, center)
}

/// Write the geometry and every field of a mesh to `container`
///
/// The returned document describes a single grid called `name` and references the
/// datasets just written. Nothing is closed here, so several meshes can share a container
/// as long as their dataset names differ.
pub fn write_mesh<C, DOMAIN, D>(
    container: &mut C,
    name: &str,
    mesh: &MeshData<DOMAIN, D>,
) -> Result<Document, Error>
where
    C: Container,
    DOMAIN: Domain,
    D: FieldSet,
{
    let extent = mesh.domain.extent();

    let geometry = mesh.domain.write_geometry(container)?;
    let attributes = mesh.data.write_fields(container, &extent)?;

    let grid = Grid {
        name: name.to_string(),
        topology: Topology::new(mesh.domain.topology(), extent.dims().to_vec()),
        geometry,
        attributes,
    };

    Ok(Document::new(vec![grid]))
}

/// Paths produced by [`write_mesh_files`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFiles {
    /// the XDMF description
    pub xdmf: PathBuf,
    /// the files holding the arrays, empty when everything was inlined
    pub data: Vec<PathBuf>,
}

/// Write a mesh to `dir` in the given format and describe it in `<dir>/<stem>.xdmf`.
///
/// With [`Format::Hdf5`] every array goes into `<dir>/<stem>.h5`, with [`Format::Binary`]
/// each array gets its own `<stem>_<dataset>.bin` file, and with [`Format::Xml`] values are
/// written inline into the XDMF document. Existing files are overwritten and `dir` must
/// already exist.
pub fn write_mesh_files<P, DOMAIN, D>(
    dir: P,
    stem: &str,
    format: Format,
    mesh: &MeshData<DOMAIN, D>,
) -> Result<MeshFiles, Error>
where
    P: AsRef<Path>,
    DOMAIN: Domain,
    D: FieldSet,
{
    let dir = dir.as_ref();

    let (document, data) = match format {
        Format::Hdf5 => write_hdf5(dir, stem, mesh)?,
        Format::Binary => {
            let mut container = BinaryContainer::create(dir, stem)?;
            let document = write_mesh(&mut container, stem, mesh)?;
            let files = container.files().to_vec();
            container.close()?;
            (document, files)
        }
        Format::Xml => {
            let mut container = XmlContainer::new();
            let document = write_mesh(&mut container, stem, mesh)?;
            container.close()?;
            (document, Vec::new())
        }
    };

    let xdmf_path = dir.join(format!("{stem}.xdmf"));
    let mut writer = BufWriter::new(std::fs::File::create(&xdmf_path)?);
    xdmf::write_document(&mut writer, &document)?;
    writer.flush()?;

    info!(
        xdmf = %xdmf_path.display(),
        %format,
        data_files = data.len(),
        "finished writing mesh"
    );

    Ok(MeshFiles {
        xdmf: xdmf_path,
        data,
    })
}

#[cfg(feature = "hdf5")]
fn write_hdf5<DOMAIN, D>(
    dir: &Path,
    stem: &str,
    mesh: &MeshData<DOMAIN, D>,
) -> Result<(Document, Vec<PathBuf>), Error>
where
    DOMAIN: Domain,
    D: FieldSet,
{
    let path = dir.join(format!("{stem}.h5"));
    let mut container = crate::Hdf5Container::create(&path)?;
    let document = write_mesh(&mut container, stem, mesh)?;
    container.close()?;

    Ok((document, vec![path]))
}

#[cfg(not(feature = "hdf5"))]
fn write_hdf5<DOMAIN, D>(
    _dir: &Path,
    _stem: &str,
    _mesh: &MeshData<DOMAIN, D>,
) -> Result<(Document, Vec<PathBuf>), Error>
where
    DOMAIN: Domain,
    D: FieldSet,
{
    Err(Error::Unsupported("hdf5 output"))
}
