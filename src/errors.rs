//! DCIMG read/parse errors.

use std::fmt;

/// Errors produced while opening a DCIMG file or reading a plane from it.
#[derive(Debug)]
pub enum DcimgError {
    /// Underlying read/seek failure.
    Io(std::io::Error),
    /// Converted `binrw::Error` from a scalar read.
    BinRw(binrw::Error),
    /// Magic mismatch, unknown version, size mismatch, unsupported pixel
    /// type, or footer version mismatch.
    Format(String),
    /// Plane index out of range, buffer too small, or region exceeds frame.
    Arg(String),
    /// Operation invoked in the wrong reader state.
    State(String),
}

impl std::error::Error for DcimgError {}

impl fmt::Display for DcimgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DcimgError::Io(err) => write!(f, "IO error: {err}"),
            DcimgError::BinRw(err) => write!(f, "binrw error: {err}"),
            DcimgError::Format(msg) => write!(f, "format error: {msg}"),
            DcimgError::Arg(msg) => write!(f, "argument error: {msg}"),
            DcimgError::State(msg) => write!(f, "state error: {msg}"),
        }
    }
}

/// Converts std::io::Error to DcimgError
impl From<std::io::Error> for DcimgError {
    fn from(err: std::io::Error) -> Self {
        DcimgError::Io(err)
    }
}

/// Converts binrw::Error to DcimgError
impl From<binrw::Error> for DcimgError {
    fn from(err: binrw::Error) -> Self {
        DcimgError::BinRw(err)
    }
}

/// Converts DcimgError to std::io::Error
impl From<DcimgError> for std::io::Error {
    fn from(err: DcimgError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}
