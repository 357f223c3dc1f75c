use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::structure::{Coordinate, Molecule};

/// Coordinate file formats understood by the readers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pdb,
    Xyz,
}

impl Format {
    /// Guess the format from a file extension: `.xyz` is XYZ, anything else PDB
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("xyz") => Format::Xyz,
            _ => Format::Pdb,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pdb => write!(f, "PDB"),
            Format::Xyz => write!(f, "XYZ"),
        }
    }
}

/// Field carried by a fixed-column span of a PDB atom record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdbField {
    RecordName,
    Coordinates,
    Element,
}

/// Inclusive, 1-indexed column range of a PDB record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub field: PdbField,
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    pub const fn new(field: PdbField, start: usize, end: usize) -> Self {
        Self { field, start, end }
    }

    /// Cut this span out of `line`, counting columns in characters.
    ///
    /// Short lines yield a truncated, possibly empty, slice.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let byte_offset = |column: usize| {
            line.char_indices()
                .nth(column)
                .map_or(line.len(), |(offset, _)| offset)
        };
        &line[byte_offset(self.start - 1)..byte_offset(self.end)]
    }
}

pub const RECORD_NAME: ColumnSpan = ColumnSpan::new(PdbField::RecordName, 1, 6);
pub const COORDINATES: ColumnSpan = ColumnSpan::new(PdbField::Coordinates, 31, 55);
pub const ELEMENT: ColumnSpan = ColumnSpan::new(PdbField::Element, 77, 79);

/// Every column span the PDB reader consumes
pub const PDB_COLUMNS: [ColumnSpan; 3] = [RECORD_NAME, COORDINATES, ELEMENT];

/// Record names that carry atom coordinates
pub const ATOM_RECORDS: [&str; 2] = ["ATOM", "HETATM"];

/// A file that can be read into a [`Molecule`]
pub trait CoordinateFile {
    fn path(&self) -> &Path;

    fn format(&self) -> Format;

    /// Read every atom record in the file.
    ///
    /// The first malformed record aborts the read; no partial molecule is
    /// returned.
    fn read(&self) -> Result<Molecule>;

    fn open(&self) -> Result<BufReader<File>> {
        let file = File::open(self.path()).map_err(|e| Error::io(self.path(), e))?;
        Ok(BufReader::new(file))
    }
}

/// Protein Data Bank file, read by fixed column positions
pub struct PdbFile {
    path: PathBuf,
}

impl PdbFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CoordinateFile for PdbFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Format {
        Format::Pdb
    }

    fn read(&self) -> Result<Molecule> {
        let molecule = parse_pdb(self.open()?)?;
        debug!(path = %self.path.display(), atoms = molecule.len(), "read PDB file");
        Ok(molecule)
    }
}

/// XYZ file: atom count, comment line, then `symbol x y z` per atom
pub struct XyzFile {
    path: PathBuf,
}

impl XyzFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CoordinateFile for XyzFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format(&self) -> Format {
        Format::Xyz
    }

    fn read(&self) -> Result<Molecule> {
        let molecule = parse_xyz(self.open()?)?;
        debug!(path = %self.path.display(), atoms = molecule.len(), "read XYZ file");
        Ok(molecule)
    }
}

/// Open and read symbols and coordinates from a PDB file.
///
/// The element symbol must be present in columns 77-79 of every atom record.
pub fn open_pdb(path: impl AsRef<Path>) -> Result<Molecule> {
    PdbFile::new(path).read()
}

/// Open and read symbols and coordinates from an XYZ file
pub fn open_xyz(path: impl AsRef<Path>) -> Result<Molecule> {
    XyzFile::new(path).read()
}

/// Read a coordinate file in the given format
pub fn read_molecule(path: impl AsRef<Path>, format: Format) -> Result<Molecule> {
    match format {
        Format::Pdb => open_pdb(path),
        Format::Xyz => open_xyz(path),
    }
}

/// Read a coordinate file, choosing the format from its extension, and split
/// the result into parallel symbol and coordinate vectors.
pub fn open_coordinate_file(path: impl AsRef<Path>) -> Result<(Vec<String>, Vec<Coordinate>)> {
    let path = path.as_ref();
    Ok(read_molecule(path, Format::from_path(path))?.into_parts())
}

/// Parse PDB text into a molecule
pub fn parse_pdb<R: BufRead>(reader: R) -> Result<Molecule> {
    let mut symbols = Vec::new();
    let mut coordinates = Vec::new();
    let mut skipped = 0usize;

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_no = idx + 1;

        let record = RECORD_NAME.slice(&line);
        if !ATOM_RECORDS.iter().any(|name| record.starts_with(name)) {
            skipped += 1;
            continue;
        }

        let element = ELEMENT.slice(&line).trim();
        if element.is_empty() {
            return Err(Error::parse(
                Format::Pdb,
                line_no,
                "missing element symbol in columns 77-79",
            ));
        }

        let coordinate = parse_xyz_triple(COORDINATES.slice(&line))
            .map_err(|details| Error::parse(Format::Pdb, line_no, details))?;

        trace!(line = line_no, element, "atom record");
        symbols.push(element.to_string());
        coordinates.push(coordinate);
    }

    debug!(atoms = symbols.len(), skipped, "parsed PDB records");
    Molecule::new(symbols, coordinates)
}

/// Parse XYZ text into a molecule
pub fn parse_xyz<R: BufRead>(reader: R) -> Result<Molecule> {
    let mut lines = reader.lines();

    let count_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::parse(Format::Xyz, 1, "missing atom count"))?;
    let declared: usize = count_line.trim().parse().map_err(|e| {
        Error::parse(
            Format::Xyz,
            1,
            format!("invalid atom count '{}': {}", count_line.trim(), e),
        )
    })?;

    // Comment line
    lines.next().transpose()?;

    let mut symbols = Vec::new();
    let mut coordinates = Vec::new();

    for (idx, line_result) in lines.enumerate() {
        let line = line_result?;
        let line_no = idx + 3;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (symbol, rest) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| Error::parse(Format::Xyz, line_no, "expected a symbol and 3 coordinates"))?;
        let coordinate = parse_xyz_triple(rest)
            .map_err(|details| Error::parse(Format::Xyz, line_no, details))?;

        symbols.push(symbol.to_string());
        coordinates.push(coordinate);
    }

    if symbols.len() != declared {
        return Err(Error::parse(
            Format::Xyz,
            1,
            format!("declared {} atoms, found {}", declared, symbols.len()),
        ));
    }

    Molecule::new(symbols, coordinates)
}

/// Exactly three whitespace-separated floats, in x, y, z order
fn parse_xyz_triple(text: &str) -> std::result::Result<Coordinate, String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(format!(
            "expected 3 coordinate values, found {} in '{}'",
            tokens.len(),
            text.trim()
        ));
    }

    let mut values = [0.0; 3];
    for (value, token) in values.iter_mut().zip(&tokens) {
        *value = token
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{}': {}", token, e))?;
    }

    Ok(Coordinate::from(values))
}
