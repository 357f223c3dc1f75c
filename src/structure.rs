use std::ops::{Add, Div, Mul, Sub};

use crate::error::{Error, Result};
use crate::weights::WeightTable;

/// 3D coordinate vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Coordinate) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Calculate Euclidean distance to another coordinate
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        (*self - *other).norm()
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Coordinate {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

impl From<Coordinate> for [f64; 3] {
    fn from(c: Coordinate) -> Self {
        c.to_array()
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Coordinate {
    type Output = Coordinate;

    fn mul(self, scalar: f64) -> Coordinate {
        Coordinate::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Div<f64> for Coordinate {
    type Output = Coordinate;

    fn div(self, scalar: f64) -> Coordinate {
        Coordinate::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

/// Element symbols paired positionally with their coordinates
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    symbols: Vec<String>,
    coordinates: Vec<Coordinate>,
}

impl Molecule {
    /// Pair symbols with coordinates; both sequences must have the same length
    pub fn new(symbols: Vec<String>, coordinates: Vec<Coordinate>) -> Result<Self> {
        if symbols.len() != coordinates.len() {
            return Err(Error::LengthMismatch {
                symbols: symbols.len(),
                coordinates: coordinates.len(),
            });
        }
        Ok(Self {
            symbols,
            coordinates,
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over (symbol, coordinate) pairs
    pub fn atoms(&self) -> impl Iterator<Item = (&str, &Coordinate)> {
        self.symbols
            .iter()
            .map(String::as_str)
            .zip(self.coordinates.iter())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Coordinate>) {
        (self.symbols, self.coordinates)
    }

    pub fn molecular_mass(&self) -> Result<f64> {
        WeightTable::global().molecular_mass(&self.symbols)
    }

    pub fn center_of_mass(&self) -> Result<Coordinate> {
        WeightTable::global().center_of_mass(&self.symbols, &self.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coordinate_distance() {
        let c1 = Coordinate::new(0.0, 0.0, 0.0);
        let c2 = Coordinate::new(3.0, 4.0, 0.0);
        assert_eq!(c1.distance_to(&c2), 5.0);
    }

    #[test]
    fn test_coordinate_arithmetic() {
        let a = Coordinate::new(1.0, 2.0, 3.0);
        let b = Coordinate::from([0.5, 0.5, 0.5]);
        assert_eq!(a + b, Coordinate::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Coordinate::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Coordinate::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Coordinate::new(0.5, 1.0, 1.5));
        assert_relative_eq!(a.dot(&b), 3.0);
    }

    #[test]
    fn test_coordinate_cross() {
        let x = Coordinate::new(1.0, 0.0, 0.0);
        let y = Coordinate::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Coordinate::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(&x), Coordinate::new(0.0, 0.0, -1.0));
        assert!(!Coordinate::new(f64::NAN, 0.0, 0.0).is_finite());
    }

    #[test]
    fn test_molecule_rejects_length_mismatch() {
        let result = Molecule::new(
            vec!["C".to_string(), "H".to_string()],
            vec![Coordinate::ORIGIN],
        );
        assert!(matches!(
            result,
            Err(Error::LengthMismatch {
                symbols: 2,
                coordinates: 1
            })
        ));
    }

    #[test]
    fn test_molecule_atoms_pairs_in_order() {
        let molecule = Molecule::new(
            vec!["O".to_string(), "H".to_string()],
            vec![Coordinate::ORIGIN, Coordinate::new(0.96, 0.0, 0.0)],
        )
        .unwrap();

        let atoms: Vec<_> = molecule.atoms().collect();
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].0, "O");
        assert_eq!(atoms[1].1.x, 0.96);
    }
}
