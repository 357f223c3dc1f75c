pub mod bonds;
pub mod error;
pub mod measure;
pub mod reader;
pub mod structure;
pub mod weights;

#[cfg(feature = "python")]
pub mod python_bindings;

// Re-export commonly used types and functions
pub use bonds::{build_bond_list, Bond, BondCriteria};
pub use error::{Error, Result};
pub use measure::{
    calculate_angle, calculate_center_of_mass, calculate_distance, calculate_molecular_mass,
};
pub use reader::{
    open_coordinate_file, open_pdb, open_xyz, read_molecule, CoordinateFile, Format, PdbFile,
    XyzFile,
};
pub use structure::{Coordinate, Molecule};
pub use weights::WeightTable;
