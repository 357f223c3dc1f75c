use std::path::PathBuf;

use thiserror::Error;

use crate::reader::Format;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse {format} data: {details} (at line {line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("element {0} is not stored in the weight table")]
    UnknownElement(String),

    #[error("{symbols} symbols cannot be paired with {coordinates} coordinates")]
    LengthMismatch { symbols: usize, coordinates: usize },

    #[error("angle is undefined when the vertex coincides with an end point")]
    DegenerateAngle,

    #[error("coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("center of mass is undefined for a total mass of zero")]
    ZeroMass,

    #[error("atomic weight for {symbol} must be positive and finite, got {mass}")]
    InvalidWeight { symbol: String, mass: f64 },

    #[error("invalid bond range: minimum {min} must be non-negative and below maximum {max}")]
    InvalidBondRange { min: f64, max: f64 },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_names_symbol() {
        let err = Error::UnknownElement("Xx".to_string());
        assert!(err.to_string().contains("Xx"));
    }

    #[test]
    fn test_parse_error_reports_format_and_line() {
        let err = Error::parse(Format::Pdb, 7, "expected 3 coordinates, found 2");
        let msg = err.to_string();
        assert!(msg.contains("PDB"));
        assert!(msg.contains("line 7"));
    }
}
