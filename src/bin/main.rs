use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use molecool_rs::{
    build_bond_list, calculate_angle, calculate_distance, read_molecule, BondCriteria, Format,
    Molecule,
};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Command-line tool for measuring molecular geometry and mass
#[derive(Parser)]
#[command(name = "molecool")]
#[command(about = "Measure distances, angles, masses and bonds of molecules in PDB or XYZ files", long_about = None)]
struct Cli {
    /// Input format (default: guessed from the file extension)
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Pdb,
    Xyz,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdb => Format::Pdb,
            FormatArg::Xyz => Format::Xyz,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print atom count, molecular mass and center of mass
    Info {
        /// Path to the coordinate file
        file: PathBuf,
    },

    /// Distance between two atoms (0-based indices)
    Distance {
        /// Path to the coordinate file
        file: PathBuf,
        i: usize,
        j: usize,
    },

    /// Angle i-j-k with atom j at the vertex (0-based indices)
    Angle {
        /// Path to the coordinate file
        file: PathBuf,
        i: usize,
        j: usize,
        k: usize,

        /// Report the angle in degrees instead of radians
        #[arg(long)]
        degrees: bool,
    },

    /// Write the bond list as CSV to stdout
    Bonds {
        /// Path to the coordinate file
        file: PathBuf,

        /// Minimum bond length, exclusive (default: 0.0)
        #[arg(long, default_value_t = 0.0)]
        min_bond: f64,

        /// Maximum bond length, exclusive (default: 1.5)
        #[arg(long, default_value_t = 1.5)]
        max_bond: f64,
    },

    /// Write atom count, mass and center of mass of each file as CSV to stdout
    Summary {
        /// Paths to the coordinate files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Serialize)]
struct SummaryRow {
    file: String,
    atoms: usize,
    mass: f64,
    com_x: f64,
    com_y: f64,
    com_z: f64,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let format = cli.format.map(Format::from);

    match cli.command {
        Commands::Info { file } => {
            let molecule = load(&file, format);

            println!("Atoms: {}", molecule.len());
            match molecule.molecular_mass() {
                Ok(mass) => println!("Molecular mass: {:.4}", mass),
                Err(e) => fail("Error calculating molecular mass", e),
            }
            match molecule.center_of_mass() {
                Ok(c) => println!("Center of mass: ({:.4}, {:.4}, {:.4})", c.x, c.y, c.z),
                Err(e) => fail("Error calculating center of mass", e),
            }
        }

        Commands::Distance { file, i, j } => {
            let molecule = load(&file, format);
            let coordinates = molecule.coordinates();
            check_indices(&molecule, &[i, j]);

            let distance = calculate_distance(&coordinates[i], &coordinates[j]);
            println!("Distance {}-{}: {:.4}", i, j, distance);
        }

        Commands::Angle {
            file,
            i,
            j,
            k,
            degrees,
        } => {
            let molecule = load(&file, format);
            let coordinates = molecule.coordinates();
            check_indices(&molecule, &[i, j, k]);

            match calculate_angle(&coordinates[i], &coordinates[j], &coordinates[k], degrees) {
                Ok(angle) => {
                    let unit = if degrees { "deg" } else { "rad" };
                    println!("Angle {}-{}-{}: {:.4} {}", i, j, k, angle, unit);
                }
                Err(e) => fail("Error calculating angle", e),
            }
        }

        Commands::Bonds {
            file,
            min_bond,
            max_bond,
        } => {
            let molecule = load(&file, format);

            let criteria = match BondCriteria::new(min_bond, max_bond) {
                Ok(c) => c,
                Err(e) => fail("Invalid bond criteria", e),
            };

            let bonds = match build_bond_list(molecule.coordinates(), &criteria) {
                Ok(b) => b,
                Err(e) => fail("Error building bond list", e),
            };

            let mut writer = csv::Writer::from_writer(io::stdout());
            for bond in &bonds {
                if let Err(e) = writer.serialize(bond) {
                    fail("Error writing CSV row", e);
                }
            }
            if let Err(e) = writer.flush() {
                fail("Error flushing CSV output", e);
            }
            eprintln!("✅ Found {} bonds among {} atoms", bonds.len(), molecule.len());
        }

        Commands::Summary { files } => {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({percent}%)")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );

            let mut writer = csv::Writer::from_writer(io::stdout());
            for file in &files {
                let row = match summarize(file, format) {
                    Ok(row) => row,
                    Err(e) => {
                        pb.abandon();
                        fail(&format!("Error summarizing {:?}", file), e);
                    }
                };
                if let Err(e) = writer.serialize(&row) {
                    pb.abandon();
                    fail("Error writing CSV row", e);
                }
                pb.inc(1);
            }

            pb.finish_with_message("Summary complete");
            if let Err(e) = writer.flush() {
                fail("Error flushing CSV output", e);
            }
            eprintln!("✅ Summarized {} files", files.len());
        }
    }
}

/// Read a molecule, exiting with a message on failure
fn load(file: &Path, format: Option<Format>) -> Molecule {
    let format = format.unwrap_or_else(|| Format::from_path(file));
    match read_molecule(file, format) {
        Ok(molecule) => {
            eprintln!("✅ Loaded {} atoms from {:?}", molecule.len(), file);
            molecule
        }
        Err(e) => fail("Error reading coordinate file", e),
    }
}

fn summarize(file: &Path, format: Option<Format>) -> molecool_rs::Result<SummaryRow> {
    let format = format.unwrap_or_else(|| Format::from_path(file));
    let molecule = read_molecule(file, format)?;
    let mass = molecule.molecular_mass()?;
    let center = molecule.center_of_mass()?;

    Ok(SummaryRow {
        file: file.display().to_string(),
        atoms: molecule.len(),
        mass,
        com_x: center.x,
        com_y: center.y,
        com_z: center.z,
    })
}

fn check_indices(molecule: &Molecule, indices: &[usize]) {
    if let Some(&bad) = indices.iter().find(|&&idx| idx >= molecule.len()) {
        eprintln!(
            "❌ Atom index {} out of range for a molecule with {} atoms",
            bad,
            molecule.len()
        );
        std::process::exit(1);
    }
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}: {}", context, err);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bonds_defaults() {
        let cli = Cli::try_parse_from(["molecool", "bonds", "water.pdb"]).unwrap();
        match cli.command {
            Commands::Bonds {
                file,
                min_bond,
                max_bond,
            } => {
                assert_eq!(file, PathBuf::from("water.pdb"));
                assert_eq!(min_bond, 0.0);
                assert_eq!(max_bond, 1.5);
            }
            _ => panic!("expected bonds command"),
        }
    }

    #[test]
    fn test_angle_with_global_format() {
        let cli = Cli::try_parse_from([
            "molecool", "angle", "water.txt", "1", "0", "2", "--degrees", "--format", "xyz",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(FormatArg::Xyz));
        match cli.command {
            Commands::Angle { i, j, k, degrees, .. } => {
                assert_eq!((i, j, k), (1, 0, 2));
                assert!(degrees);
            }
            _ => panic!("expected angle command"),
        }
    }

    #[test]
    fn test_summary_requires_files() {
        assert!(Cli::try_parse_from(["molecool", "summary"]).is_err());
    }
}
