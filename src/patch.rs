//! The four-pixel patch record and its version-dependent derivation.

use crate::errors::DcimgError;
use crate::footer;
use crate::layout::{Layout, VersionLayout};
use crate::reader::DcimgReader;

/// Coordinates of the four-pixel correction for one opened reader.
/// Present (`patch_present == false`) even when the file carries no patch,
/// so that callers never need to special-case the absence.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Patch {
    pub(crate) patch_present: bool,
    pub(crate) patch_row: u32,
    pub(crate) patch_absolute_offset: u64,
}

/// Derives the patch record for the version this reader was opened against.
///
/// `version_raw` is the raw `version` field read from the global prefix
/// (`0x7` for V0, `>= 0x1000000` for V1): the footer chain's replicated
/// version field is checked against this exact value.
pub(crate) fn derive(
    version_raw: u64,
    layout: &Layout,
    size_y: u32,
    reader: &mut DcimgReader,
) -> Result<Patch, DcimgError> {
    match layout.version {
        VersionLayout::V0 {
            bytes_per_row,
            offset_to_footer,
        } => derive_v0(version_raw, layout, bytes_per_row, offset_to_footer, size_y, reader),
        VersionLayout::V1 { frame_footer_size } => Ok(derive_v1(layout, frame_footer_size, size_y)),
    }
}

fn derive_v0(
    version_raw: u64,
    layout: &Layout,
    bytes_per_row: u64,
    offset_to_footer: i64,
    size_y: u32,
    reader: &mut DcimgReader,
) -> Result<Patch, DcimgError> {
    let footer_start = footer::add_signed(layout.header_size, offset_to_footer)?;
    let info = footer::locate_four_pixels(reader, footer_start, version_raw)?;

    let patch_present = info.four_pixel_size > 0;
    let patch_row = if patch_present {
        (info.four_pixel_offset_in_frame / bytes_per_row) as u32 + 1
    } else {
        size_y.saturating_sub(1)
    };
    let patch_absolute_offset = footer::add_signed(footer_start, info.offset_to_four_pixels)?;

    Ok(Patch {
        patch_present,
        patch_row,
        patch_absolute_offset,
    })
}

fn derive_v1(layout: &Layout, frame_footer_size: u64, size_y: u32) -> Patch {
    let patch_present = frame_footer_size >= 512 || frame_footer_size == 32;
    let patch_row = if size_y % 2 == 0 {
        size_y / 2
    } else {
        size_y / 2 + 1
    };
    let patch_absolute_offset = layout.header_size + layout.data_offset + layout.bytes_per_image + 12;

    Patch {
        patch_present,
        patch_row,
        patch_absolute_offset,
    }
}
