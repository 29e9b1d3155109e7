//! Random-access reader for Hamamatsu DCIMG image containers.
//!
//! DCIMG is a binary format used by scientific CMOS cameras to store
//! multi-frame grayscale image stacks. This crate opens a `.dcimg` file (or
//! a directory of same-geometry siblings treated as Z-slices), parses its
//! header and, where present, its four-pixel correction footer, and serves
//! random-access reads of rectangular pixel windows.
//!
//! ```rs
//! use dcimg::{Dcimg, DcimgOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), dcimg::DcimgError> {
//!     let mut reader = Dcimg::open(Path::new("capture.dcimg"), DcimgOptions::default())?;
//!
//!     let geometry = reader.geometry().clone();
//!     println!("{}x{}, {} planes", geometry.size_x, geometry.size_y, reader.image_count());
//!
//!     let byte_factor = geometry.pixel_type.byte_factor() as usize;
//!     let mut buf = vec![0_u8; geometry.size_x as usize * geometry.size_y as usize * byte_factor];
//!     reader.read_plane(0, &mut buf, 0, 0, geometry.size_x, geometry.size_y)?;
//!
//!     reader.close();
//!     Ok(())
//! }
//! ```

mod companion;
mod consts;
mod dcimg;
mod errors;
mod footer;
mod geometry;
mod header;
mod layout;
mod options;
mod patch;
mod plane;

// Internal byte source.
mod reader;

pub use dcimg::Dcimg;
pub use errors::DcimgError;
pub use geometry::{Geometry, PixelType, Version};
pub use options::DcimgOptions;
pub use reader::is_dcimg;
