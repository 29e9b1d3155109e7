//! Version 0 footer chain: locates the four-pixel patch region.
//!
//! At `headerSize + offsetToFooter` sits a small header that repeats the
//! file version and points, via a relative offset, at a second footer
//! record. That second record is where the actual patch coordinates live.

use crate::errors::DcimgError;
use crate::reader::DcimgReader;

/// Raw fields recovered from the V0 footer chain, before being turned into
/// a [`crate::patch::Patch`].
pub(crate) struct FourPixelInfo {
    pub(crate) offset_to_four_pixels: i64,
    pub(crate) four_pixel_offset_in_frame: u64,
    pub(crate) four_pixel_size: i64,
}

/// Follows the two-hop footer chain and returns the raw patch fields.
///
/// `footer_start` is `headerSize + offsetToFooter`.
pub(crate) fn locate_four_pixels(
    reader: &mut DcimgReader,
    footer_start: u64,
    expected_version: u64,
) -> Result<FourPixelInfo, DcimgError> {
    reader.seek(footer_start)?;
    let footer_version = reader.read_u32le()?;
    if footer_version != expected_version {
        return Err(DcimgError::Format(format!(
            "footer version {footer_version:#x} does not match header version {expected_version:#x}"
        )));
    }
    reader.skip(4)?;
    let second_footer_offset = reader.read_i64le()?;

    let second_footer_start = add_signed(footer_start, second_footer_offset)?;
    reader.seek(second_footer_start)?;
    reader.skip(72)?;
    reader.skip(16)?;
    let offset_to_four_pixels = reader.read_i64le()?;
    reader.skip(4)?;
    let four_pixel_offset_in_frame = reader.read_u32le()?;
    let four_pixel_size = reader.read_i64le()?;

    Ok(FourPixelInfo {
        offset_to_four_pixels,
        four_pixel_offset_in_frame,
        four_pixel_size,
    })
}

/// Adds a possibly-negative relative offset to an absolute file position.
pub(crate) fn add_signed(base: u64, relative: i64) -> Result<u64, DcimgError> {
    let result = base as i64 + relative;
    if result < 0 {
        return Err(DcimgError::Format(format!(
            "computed negative file offset ({base} + {relative})"
        )));
    }
    Ok(result as u64)
}
