use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};

use crate::bonds::{build_bond_list as build_bonds, BondCriteria};
use crate::error::Error;
use crate::measure;
use crate::reader::open_coordinate_file;
use crate::structure::Coordinate;
use crate::weights::WeightTable;

type Point = [f64; 3];

/// Map library errors onto the matching Python exception classes
fn to_py_err(err: Error) -> PyErr {
    let msg = err.to_string();
    match err {
        Error::Io { .. } | Error::Read(_) => PyIOError::new_err(msg),
        Error::UnknownElement(symbol) => PyKeyError::new_err(symbol),
        Error::DegenerateAngle | Error::ZeroMass => PyZeroDivisionError::new_err(msg),
        Error::Parse { .. }
        | Error::LengthMismatch { .. }
        | Error::NonFiniteCoordinate
        | Error::InvalidWeight { .. }
        | Error::InvalidBondRange { .. } => PyValueError::new_err(msg),
    }
}

/// Python binding for calculate_distance.
///
/// Arguments that are not 3-float sequences raise TypeError during extraction.
#[pyfunction]
fn calculate_distance(r_a: Point, r_b: Point) -> f64 {
    measure::calculate_distance(&r_a.into(), &r_b.into())
}

/// Python binding for calculate_angle
#[pyfunction]
#[pyo3(signature = (r_a, r_b, r_c, degrees=false))]
fn calculate_angle(r_a: Point, r_b: Point, r_c: Point, degrees: bool) -> PyResult<f64> {
    measure::calculate_angle(&r_a.into(), &r_b.into(), &r_c.into(), degrees).map_err(to_py_err)
}

/// Python binding for calculate_molecular_mass
#[pyfunction]
fn calculate_molecular_mass(symbols: Vec<String>) -> PyResult<f64> {
    measure::calculate_molecular_mass(&symbols).map_err(to_py_err)
}

/// Python binding for calculate_center_of_mass, returning an (x, y, z) tuple
#[pyfunction]
fn calculate_center_of_mass(
    symbols: Vec<String>,
    coordinates: Vec<Point>,
) -> PyResult<(f64, f64, f64)> {
    let coordinates: Vec<Coordinate> = coordinates.into_iter().map(Coordinate::from).collect();
    measure::calculate_center_of_mass(&symbols, &coordinates)
        .map(|c| (c.x, c.y, c.z))
        .map_err(to_py_err)
}

/// Python binding for open_coordinate_file: returns (symbols, coordinates)
#[pyfunction]
#[pyo3(name = "open_coordinate_file")]
fn open_coordinate_file_py(py: Python<'_>, file_location: &str) -> PyResult<PyObject> {
    let (symbols, coordinates) = open_coordinate_file(file_location).map_err(to_py_err)?;

    let py_coordinates = PyList::empty_bound(py);
    for coordinate in coordinates {
        py_coordinates.append(coordinate.to_array().to_vec())?;
    }

    let py_result = PyTuple::new_bound(py, &[symbols.into_py(py), py_coordinates.into_py(py)]);
    Ok(py_result.into())
}

/// Python binding for build_bond_list: returns {(i, j): distance}
#[pyfunction]
#[pyo3(signature = (coordinates, max_bond=1.5, min_bond=0.0))]
fn build_bond_list(
    py: Python<'_>,
    coordinates: Vec<Point>,
    max_bond: f64,
    min_bond: f64,
) -> PyResult<PyObject> {
    let coordinates: Vec<Coordinate> = coordinates.into_iter().map(Coordinate::from).collect();
    let criteria = BondCriteria::new(min_bond, max_bond).map_err(to_py_err)?;
    let bonds = build_bonds(&coordinates, &criteria).map_err(to_py_err)?;

    let py_bonds = PyDict::new_bound(py);
    for bond in bonds {
        py_bonds.set_item((bond.i, bond.j), bond.distance)?;
    }

    Ok(py_bonds.into())
}

/// Python module definition
#[pymodule]
fn molecool_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(calculate_distance, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_angle, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_molecular_mass, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_center_of_mass, m)?)?;
    m.add_function(wrap_pyfunction!(build_bond_list, m)?)?;
    m.add_function(wrap_pyfunction!(open_coordinate_file_py, m)?)?;

    let atomic_weights = PyDict::new_bound(m.py());
    for (symbol, mass) in WeightTable::global().iter() {
        atomic_weights.set_item(symbol, mass)?;
    }
    m.add("atomic_weights", atomic_weights)?;
    m.add("__doc__", "Molecular geometry and mass measurements")?;
    Ok(())
}
