use serde::Serialize;

use crate::error::{Error, Result};
use crate::measure::calculate_distance;
use crate::structure::Coordinate;

/// Bond between atoms `i` and `j` (`i < j`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub distance: f64,
}

/// Distance window, exclusive on both ends, within which two atoms are bonded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondCriteria {
    pub min_bond: f64,
    pub max_bond: f64,
}

impl Default for BondCriteria {
    fn default() -> Self {
        Self {
            min_bond: 0.0,
            max_bond: 1.5,
        }
    }
}

impl BondCriteria {
    pub fn new(min_bond: f64, max_bond: f64) -> Result<Self> {
        let criteria = Self { min_bond, max_bond };
        criteria.validate()?;
        Ok(criteria)
    }

    fn validate(&self) -> Result<()> {
        // Negated comparisons also reject NaN
        if !(self.min_bond >= 0.0) || !(self.max_bond > self.min_bond) {
            return Err(Error::InvalidBondRange {
                min: self.min_bond,
                max: self.max_bond,
            });
        }
        Ok(())
    }

    pub fn is_bonded(&self, distance: f64) -> bool {
        distance > self.min_bond && distance < self.max_bond
    }
}

/// Build a list of bonds from atomic separation.
///
/// Every pair of atoms is checked once; the result is ordered by `(i, j)`.
pub fn build_bond_list(coordinates: &[Coordinate], criteria: &BondCriteria) -> Result<Vec<Bond>> {
    criteria.validate()?;

    let mut bonds = Vec::new();
    for (i, a) in coordinates.iter().enumerate() {
        for (j, b) in coordinates.iter().enumerate().skip(i + 1) {
            let distance = calculate_distance(a, b);
            if criteria.is_bonded(distance) {
                bonds.push(Bond { i, j, distance });
            }
        }
    }

    Ok(bonds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn water() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0, 0.0),
            Coordinate::new(0.957, 0.0, 0.0),
            Coordinate::new(-0.240, 0.927, 0.0),
        ]
    }

    #[test]
    fn test_build_bond_list_water() {
        let bonds = build_bond_list(&water(), &BondCriteria::default()).unwrap();

        assert_eq!(bonds.len(), 2);
        assert_eq!((bonds[0].i, bonds[0].j), (0, 1));
        assert_eq!((bonds[1].i, bonds[1].j), (0, 2));
        assert_relative_eq!(bonds[0].distance, 0.957, epsilon = 1e-12);
    }

    #[test]
    fn test_build_bond_list_respects_window() {
        // H-H separation in the water geometry is about 1.51
        let criteria = BondCriteria::new(1.0, 2.0).unwrap();
        let bonds = build_bond_list(&water(), &criteria).unwrap();
        assert_eq!(bonds.len(), 1);
        assert_eq!((bonds[0].i, bonds[0].j), (1, 2));
    }

    #[test]
    fn test_coincident_atoms_are_not_bonded() {
        let coordinates = [Coordinate::ORIGIN, Coordinate::ORIGIN];
        let bonds = build_bond_list(&coordinates, &BondCriteria::default()).unwrap();
        assert!(bonds.is_empty());
    }

    #[test]
    fn test_invalid_bond_range() {
        assert!(matches!(
            BondCriteria::new(-0.1, 1.5),
            Err(Error::InvalidBondRange { .. })
        ));
        assert!(matches!(
            BondCriteria::new(1.5, 1.0),
            Err(Error::InvalidBondRange { .. })
        ));

        let criteria = BondCriteria {
            min_bond: f64::NAN,
            max_bond: 1.5,
        };
        assert!(build_bond_list(&water(), &criteria).is_err());
    }

    #[test]
    fn test_empty_molecule_has_no_bonds() {
        let bonds = build_bond_list(&[], &BondCriteria::default()).unwrap();
        assert!(bonds.is_empty());
    }
}
