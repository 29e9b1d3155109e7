//! Format constants for the DCIMG container.

/// Magic bytes at the start of every DCIMG file.
pub(crate) const MAGIC: &[u8; 5] = b"DCIMG";

/// Version 0 header layout marker.
pub(crate) const VERSION_V0: u64 = 0x7;

/// Minimum version value that uses the version 1 header layout.
pub(crate) const VERSION_V1_MIN: u64 = 0x1000000;

/// `pixelType` value for 8-bit monochrome.
pub(crate) const PIXEL_TYPE_U8: i64 = 0x1;

/// `pixelType` value for 16-bit monochrome.
pub(crate) const PIXEL_TYPE_U16: i64 = 0x2;

/// Lowercase extension a companion file must carry to be considered.
pub(crate) const COMPANION_EXTENSION: &str = "dcimg";
