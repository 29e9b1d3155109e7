//! Core `Dcimg` reader and its open/ready/closed lifecycle.
//!
//! ```rs
//! use dcimg::{Dcimg, DcimgOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), dcimg::DcimgError> {
//!     let mut reader = Dcimg::open(Path::new("capture.dcimg"), DcimgOptions::default())?;
//!
//!     let geometry = reader.geometry();
//!     let mut buf = vec![0_u8; (geometry.size_x * geometry.size_y) as usize * geometry.pixel_type.byte_factor() as usize];
//!     reader.read_plane(0, &mut buf, 0, 0, geometry.size_x, geometry.size_y)?;
//!
//!     reader.close();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use crate::companion;
use crate::errors::DcimgError;
use crate::geometry::Geometry;
use crate::header;
use crate::layout::Layout;
use crate::options::DcimgOptions;
use crate::patch::{self, Patch};
use crate::plane;
use crate::reader::DcimgReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    Closed,
}

/// A reader over one DCIMG file, optionally grouped with same-directory
/// siblings as additional Z-slices.
///
/// Traverses `Ready -> Closed`; there is no `Unopened` state to represent
/// in Rust terms, since a value only exists once [`Dcimg::open`] has
/// already completed every parsing step successfully. `Closed` is
/// terminal: there is no re-open.
#[derive(Debug)]
pub struct Dcimg {
    state: State,
    primary_reader: DcimgReader,
    /// Index into `companions` that `primary_reader` was opened against.
    primary_index: usize,
    geometry: Geometry,
    layout: Layout,
    patch: Patch,
    companions: Vec<PathBuf>,
}

impl Dcimg {
    /// Opens `path`, parsing the header (and, for V0, the footer) and, if
    /// `options.group_files` is set, the sibling companion set. All
    /// parsing happens here; a successful return is always `Ready`.
    pub fn open(path: impl AsRef<Path>, options: DcimgOptions) -> Result<Self, DcimgError> {
        let primary_path = path.as_ref().to_path_buf();
        let mut reader = DcimgReader::open(&primary_path)?;

        let parsed = header::parse(&mut reader)?;
        let mut patch = patch::derive(
            parsed.version_raw,
            &parsed.layout,
            parsed.geometry.size_y,
            &mut reader,
        )?;
        if let Some(row) = options.patch_row_override {
            patch.patch_row = row;
        }

        let companions = companion::group(&primary_path, options.group_files)?;
        let primary_index = companions
            .iter()
            .position(|path| same_file(path, &primary_path))
            .unwrap_or(0);
        let geometry = Geometry {
            size_z: companions.len() as u32,
            ..parsed.geometry
        };

        Ok(Self {
            state: State::Ready,
            primary_reader: reader,
            primary_index,
            geometry,
            layout: parsed.layout,
            patch,
            companions,
        })
    }

    /// Frozen geometry for this reader: size, pixel type, version, order.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// `sizeZ * sizeT * sizeC`.
    pub fn image_count(&self) -> u64 {
        self.geometry.image_count()
    }

    /// Files backing this reader's Z axis.
    ///
    /// DCIMG has no metadata files distinct from pixel-bearing files, so
    /// `no_pixels == true` (meaning "files other than the pixel data")
    /// always yields `None`; `no_pixels == false` yields every companion
    /// path, primary included, in Z order.
    pub fn used_files(&self, no_pixels: bool) -> Result<Option<Vec<PathBuf>>, DcimgError> {
        self.ensure_ready()?;
        if no_pixels {
            Ok(None)
        } else {
            Ok(Some(self.companions.clone()))
        }
    }

    /// Fills `buf` with the `(x, y, w, h)` window of plane `plane_index`.
    ///
    /// `plane_index` decomposes as `z = plane_index / sizeT`,
    /// `t = plane_index % sizeT`; `z` selects the companion file, `t` the
    /// frame within it.
    pub fn read_plane(
        &mut self,
        plane_index: u64,
        buf: &mut [u8],
        x: u32,
        y: u32,
        w: u32,
        h: u32,
    ) -> Result<(), DcimgError> {
        self.ensure_ready()?;

        let image_count = self.geometry.image_count();
        if plane_index >= image_count {
            return Err(DcimgError::Arg(format!(
                "plane index {plane_index} out of range (image count {image_count})"
            )));
        }
        if x.checked_add(w).map_or(true, |v| v > self.geometry.size_x)
            || y.checked_add(h).map_or(true, |v| v > self.geometry.size_y)
        {
            return Err(DcimgError::Arg(format!(
                "region (x={x}, y={y}, w={w}, h={h}) exceeds frame bounds ({}x{})",
                self.geometry.size_x, self.geometry.size_y
            )));
        }
        if self.patch.patch_present && x < 4 && w < 4 - x {
            return Err(DcimgError::Arg(format!(
                "region (x={x}, w={w}) is narrower than the four-pixel patch it overlaps"
            )));
        }
        let byte_factor = self.geometry.pixel_type.byte_factor() as u64;
        let expected_len = w as u64 * h as u64 * byte_factor;
        if buf.len() as u64 != expected_len {
            return Err(DcimgError::Arg(format!(
                "buffer length {} does not match expected {expected_len}",
                buf.len()
            )));
        }

        let size_t = self.geometry.size_t as u64;
        let z = (plane_index / size_t) as usize;
        let t = (plane_index % size_t) as u32;

        let path = &self.companions[z];
        if z == self.primary_index {
            plane::read_plane(
                &mut self.primary_reader,
                &self.layout,
                &self.geometry,
                &self.patch,
                t,
                x,
                y,
                w,
                h,
                buf,
            )
        } else {
            let mut reader = DcimgReader::open(path)?;
            let result = plane::read_plane(
                &mut reader, &self.layout, &self.geometry, &self.patch, t, x, y, w, h, buf,
            );
            reader.close();
            result
        }
    }

    /// Moves the reader to `Closed`, releasing the primary byte source.
    /// Idempotent; there is no way back to `Ready`.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    fn ensure_ready(&self) -> Result<(), DcimgError> {
        match self.state {
            State::Ready => Ok(()),
            State::Closed => Err(DcimgError::State("reader is closed".into())),
        }
    }
}

/// Compares two paths by canonical form so that e.g. `capture.dcimg` and
/// `./capture.dcimg` (as produced by directory enumeration) are recognized
/// as the same file. Falls back to direct comparison if either path cannot
/// be canonicalized.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
