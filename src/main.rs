//! Example programs writing structured meshes to HDF5 (or raw binary) files with an
//! XDMF description, plus an `inspect` command that checks such a description against
//! the data it points at.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use h5mesh::container::{verify_document, Verified};
use h5mesh::generate;
use h5mesh::{
    Curvilinear3D, Domain, Extent3D, FieldSet, Format, Image3D, MeshData, NamedField,
    Rectilinear3D,
};

#[derive(Parser, Debug)]
#[command(name = "h5mesh")]
#[command(about = "Write example meshes for ParaView and VisIt", long_about = None)]
struct Cli {
    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scalar field on a uniform grid, written to `/scalars`
    ImageScalar(OutputArgs),

    /// Same as image-scalar, written to `basic_mesh` unless a stem is given
    Basic(OutputArgs),

    /// Vector field on a uniform grid, components interleaved in `/vectors`
    ImageVectorInterleaved(OutputArgs),

    /// Vector field on a uniform grid, one dataset per component (`/xcomps`, `/ycomps`, `/zcomps`)
    ImageVectorComps(OutputArgs),

    /// Scalar field on a grid with growing spacing along every axis
    RectilinearScalar(OutputArgs),

    /// Scalar field on a cylinder. `--nx` counts radial points and `--ny` angular
    /// intervals (one more row closes the cylinder)
    CurvilinearScalar(OutputArgs),

    /// Print the grids of an XDMF file and check the data it references
    Inspect {
        /// Path to the XDMF file
        xdmf: PathBuf,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory the files are written to
    #[arg(long, env = "H5MESH_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// File name stem for every file written
    #[arg(long)]
    stem: Option<String>,

    /// Storage for the arrays, defaults to hdf5 when compiled in and binary otherwise
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Points along x
    #[arg(long, default_value_t = 256)]
    nx: usize,

    /// Points along y
    #[arg(long, default_value_t = 192)]
    ny: usize,

    /// Points along z
    #[arg(long, default_value_t = 128)]
    nz: usize,
}

impl OutputArgs {
    fn extent(&self) -> Result<Extent3D> {
        Extent3D::new(self.nx, self.ny, self.nz).context("invalid grid size")
    }

    fn format(&self) -> Format {
        self.format.map(Format::from).unwrap_or_default()
    }

    fn stem<'a>(&'a self, default: &'a str) -> &'a str {
        self.stem.as_deref().unwrap_or(default)
    }

    /// radial points, angular rows and axial points of the cylinder. The extra angular
    /// row repeats the first one so the surface closes
    fn cylinder_size(&self) -> (usize, usize, usize) {
        (self.nx, self.ny + 1, self.nz)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Hdf5,
    Binary,
    Xml,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Hdf5 => Format::Hdf5,
            FormatArg::Binary => Format::Binary,
            FormatArg::Xml => Format::Xml,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::ImageScalar(args) => image_scalar(&args, "scalar"),
        Commands::Basic(args) => image_scalar(&args, "basic_mesh"),
        Commands::ImageVectorInterleaved(args) => {
            let extent = args.extent()?;
            let vectors = generate::reciprocal_vectors::<f32>(&extent);
            write(
                &args,
                "vector_interleaved",
                Image3D::new(extent),
                NamedField::node("vectors", vectors),
            )
        }
        Commands::ImageVectorComps(args) => {
            let extent = args.extent()?;
            let comps = generate::reciprocal_components::<f32>(&extent)
                .with_dataset_names("xcomps", "ycomps", "zcomps");
            write(
                &args,
                "vector_comps",
                Image3D::new(extent),
                NamedField::node("vectors", comps),
            )
        }
        Commands::RectilinearScalar(args) => {
            let extent = args.extent()?;
            let grid = Rectilinear3D::new(
                generate::accumulating_axis::<f32>(args.nx, 0.1),
                generate::accumulating_axis::<f32>(args.ny, 0.1),
                generate::accumulating_axis::<f32>(args.nz, 0.1),
            )?;
            let scalars = generate::sin_cos_scalars::<f32>(&extent);
            write(
                &args,
                "rectilinear_scalar",
                grid,
                NamedField::node("scalars", scalars),
            )
        }
        Commands::CurvilinearScalar(args) => {
            let (nr, ntheta, nz) = args.cylinder_size();
            let grid: Curvilinear3D<f32> = generate::cylindrical_coords(nr, ntheta, nz)?;
            let scalars = generate::theta_scalars::<f32>(nr, ntheta, nz)?;
            write(
                &args,
                "curvilinear_scalar",
                grid,
                NamedField::node("scalars", scalars),
            )
        }
        Commands::Inspect { xdmf } => inspect(&xdmf),
    }
}

fn image_scalar(args: &OutputArgs, default_stem: &str) -> Result<()> {
    let extent = args.extent()?;
    let scalars = generate::sin_cos_scalars::<f32>(&extent);

    write(
        args,
        default_stem,
        Image3D::new(extent),
        NamedField::node("scalars", scalars),
    )
}

fn write<DOMAIN, D>(args: &OutputArgs, default_stem: &str, domain: DOMAIN, data: D) -> Result<()>
where
    DOMAIN: Domain,
    D: FieldSet,
{
    let stem = args.stem(default_stem);
    let format = args.format();

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("could not create {}", args.out_dir.display()))?;

    let extent = domain.extent();
    info!(stem, %format, dims = ?extent.dims(), "writing mesh");

    let mesh = MeshData::new(domain, data);
    let files = h5mesh::write_mesh_files(&args.out_dir, stem, format, &mesh)
        .with_context(|| format!("could not write mesh `{stem}`"))?;

    for file in &files.data {
        info!(file = %file.display(), "wrote data");
    }
    info!(file = %files.xdmf.display(), "wrote description");

    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let document = h5mesh::xdmf::read_path(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    for grid in &document.grids {
        println!(
            "grid `{}`: {} {}",
            grid.name,
            grid.topology.kind.as_str(),
            h5mesh::dimension_string(&grid.topology.dims)
        );
        println!(
            "  geometry {} ({} items)",
            grid.geometry.kind.as_str(),
            grid.geometry.items.len()
        );

        for attribute in &grid.attributes {
            let datasets = attribute
                .value
                .items()
                .iter()
                .map(|item| item.location.to_string())
                .collect::<Vec<_>>();

            println!(
                "  {} `{}` on {}: {}",
                attribute.kind.as_str(),
                attribute.name,
                attribute.center.as_str(),
                datasets.join(", ")
            );
        }
    }

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let results = verify_document(&document, base_dir)
        .with_context(|| format!("data referenced by {} is inconsistent", path.display()))?;

    let checked = results
        .iter()
        .filter(|result| **result == Verified::Checked)
        .count();
    let skipped = results.len() - checked;

    println!("{checked} items checked, {skipped} skipped");

    Ok(())
}
