//! Geometric and mass measurements over element symbols and coordinates.
//!
//! Every function here is pure: identical inputs always give identical
//! results and no argument is modified.

use tracing::trace;

use crate::error::{Error, Result};
use crate::structure::Coordinate;
use crate::weights::WeightTable;

/// Euclidean distance between two points
pub fn calculate_distance(r_a: &Coordinate, r_b: &Coordinate) -> f64 {
    r_a.distance_to(r_b)
}

/// Angle at vertex `r_b` formed by the points `r_a`, `r_b`, `r_c`.
///
/// The result lies in `[0, π]` radians, or `[0, 180]` when `degrees` is set.
/// Fails with [`Error::DegenerateAngle`] if `r_b` coincides with either end
/// point, since the angle has no direction to measure against, and with
/// [`Error::NonFiniteCoordinate`] if any point is infinite or NaN.
pub fn calculate_angle(
    r_a: &Coordinate,
    r_b: &Coordinate,
    r_c: &Coordinate,
    degrees: bool,
) -> Result<f64> {
    let ab = direction(r_a, r_b)?;
    let bc = direction(r_c, r_b)?;

    // atan2 stays accurate near 0 and π, where acos of the cosine does not
    let theta = ab.cross(&bc).norm().atan2(ab.dot(&bc));

    Ok(if degrees { theta.to_degrees() } else { theta })
}

/// Unit vector pointing from `from` to `to`.
///
/// Both points are halved before subtracting and the difference is scaled by
/// its largest component, so no intermediate overflows for finite input.
fn direction(from: &Coordinate, to: &Coordinate) -> Result<Coordinate> {
    if !(from.is_finite() && to.is_finite()) {
        return Err(Error::NonFiniteCoordinate);
    }

    let v = *to * 0.5 - *from * 0.5;
    let scale = v.x.abs().max(v.y.abs()).max(v.z.abs());
    if scale == 0.0 {
        return Err(Error::DegenerateAngle);
    }

    let v = v / scale;
    Ok(v / v.norm())
}

/// Total mass of a molecule from the standard weight table
pub fn calculate_molecular_mass<S: AsRef<str>>(symbols: &[S]) -> Result<f64> {
    WeightTable::global().molecular_mass(symbols)
}

/// Mass-weighted centroid of a molecule from the standard weight table
pub fn calculate_center_of_mass<S: AsRef<str>>(
    symbols: &[S],
    coordinates: &[Coordinate],
) -> Result<Coordinate> {
    WeightTable::global().center_of_mass(symbols, coordinates)
}

impl WeightTable {
    /// Sum of the weights of `symbols`.
    ///
    /// Stops at the first symbol missing from the table and returns
    /// [`Error::UnknownElement`] for it; no partial sum is produced.
    pub fn molecular_mass<S: AsRef<str>>(&self, symbols: &[S]) -> Result<f64> {
        let mut mass = 0.0;
        for symbol in symbols {
            mass += self.weight(symbol.as_ref())?;
        }
        trace!(atoms = symbols.len(), mass, "molecular mass");
        Ok(mass)
    }

    /// Center of mass R = (1/M) Σ mᵢ rᵢ.
    ///
    /// Empty input has zero total mass and fails with [`Error::ZeroMass`].
    pub fn center_of_mass<S: AsRef<str>>(
        &self,
        symbols: &[S],
        coordinates: &[Coordinate],
    ) -> Result<Coordinate> {
        if symbols.len() != coordinates.len() {
            return Err(Error::LengthMismatch {
                symbols: symbols.len(),
                coordinates: coordinates.len(),
            });
        }

        let total = self.molecular_mass(symbols)?;
        if total == 0.0 {
            return Err(Error::ZeroMass);
        }

        let mut weighted = Coordinate::ORIGIN;
        for (symbol, coordinate) in symbols.iter().zip(coordinates) {
            weighted = weighted + *coordinate * self.weight(symbol.as_ref())?;
        }

        Ok(weighted / total)
    }
}
