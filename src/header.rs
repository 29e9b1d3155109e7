//! Global prefix and version-dependent session header parsing.
//!
//! The global prefix fields below are read by seeking directly to their
//! absolute offsets (`[8..12)`, `[32..36)`, `[40..44)`, `[56..60)`) rather
//! than by walking a chain of relative skips from byte zero, since that
//! chain does not land on the same offsets. The V0/V1 session header
//! offsets below it are walked relative to `headerSize`, which is
//! internally consistent.

use crate::consts::{VERSION_V0, VERSION_V1_MIN};
use crate::errors::DcimgError;
use crate::geometry::{Geometry, PixelType, Version};
use crate::layout::{Layout, VersionLayout};
use crate::reader::DcimgReader;

pub(crate) struct Header {
    pub(crate) geometry: Geometry,
    pub(crate) layout: Layout,
    pub(crate) version_raw: u64,
}

pub(crate) fn parse(reader: &mut DcimgReader) -> Result<Header, DcimgError> {
    reader.seek(0)?;
    let magic = reader.read_string(5)?;
    if magic != "DCIMG" {
        return Err(DcimgError::Format(format!(
            "magic mismatch: expected \"DCIMG\", got {magic:?}"
        )));
    }

    reader.seek(8)?;
    let version_raw = reader.read_u32le()?;
    let version = if version_raw == VERSION_V0 {
        Version::V0
    } else if version_raw >= VERSION_V1_MIN {
        if version_raw > VERSION_V1_MIN {
            log::warn!("DCIMG version {version_raw:#x} is newer than any tested version");
        }
        Version::V1
    } else {
        return Err(DcimgError::Format(format!(
            "unknown DCIMG version {version_raw:#x}"
        )));
    };

    reader.seek(32)?;
    let header_size = reader.read_u32le()?;
    reader.seek(40)?;
    let file_size = reader.read_u32le()?;
    reader.seek(56)?;
    let file_size2 = reader.read_u32le()?;
    if file_size != file_size2 {
        return Err(DcimgError::Format("file sizes do not match".into()));
    }

    let (geometry, layout) = match version {
        Version::V0 => parse_v0(reader, header_size)?,
        Version::V1 => parse_v1(reader, header_size)?,
    };

    Ok(Header {
        geometry,
        layout,
        version_raw,
    })
}

fn parse_v0(reader: &mut DcimgReader, header_size: u64) -> Result<(Geometry, Layout), DcimgError> {
    reader.seek(header_size)?;
    reader.skip(32)?;
    let size_t = reader.read_i32le()?;
    let pixel_type_raw = reader.read_i32le()?;
    reader.skip(4)?;
    let size_x = reader.read_i32le()?;
    let bytes_per_row = reader.read_u32le()?;
    let size_y = reader.read_i32le()?;
    let bytes_per_image = reader.read_u32le()?;
    reader.skip(8)?;
    let data_offset = reader.read_i32le()?;
    let offset_to_footer = reader.read_i64le()?;

    let pixel_type = pixel_type_from_raw(pixel_type_raw)?;
    let geometry = Geometry {
        version: Version::V0,
        size_x: non_negative_u32(size_x, "sizeX")?,
        size_y: non_negative_u32(size_y, "sizeY")?,
        size_t: non_negative_u32(size_t, "sizeT")?,
        size_z: 1,
        size_c: 1,
        pixel_type,
        little_endian: true,
    };
    let layout = Layout {
        header_size,
        data_offset: non_negative_u64(data_offset as i64, "dataOffset")?,
        bytes_per_image,
        version: VersionLayout::V0 {
            bytes_per_row,
            offset_to_footer,
        },
    };
    Ok((geometry, layout))
}

fn parse_v1(reader: &mut DcimgReader, header_size: u64) -> Result<(Geometry, Layout), DcimgError> {
    reader.seek(header_size)?;
    reader.skip(8)?;
    reader.skip(52)?;
    let size_t = reader.read_i32le()?;
    let pixel_type_raw = reader.read_i32le()?;
    reader.skip(4)?;
    let size_x = reader.read_i32le()?;
    let size_y = reader.read_i32le()?;
    reader.skip(4)?;
    let bytes_per_image = reader.read_u32le()?;
    reader.skip(8)?;
    let data_offset = reader.read_i64le()?;
    reader.skip(20)?;
    let frame_footer_size = reader.read_u32le()?;

    let pixel_type = pixel_type_from_raw(pixel_type_raw)?;
    let geometry = Geometry {
        version: Version::V1,
        size_x: non_negative_u32(size_x, "sizeX")?,
        size_y: non_negative_u32(size_y, "sizeY")?,
        size_t: non_negative_u32(size_t, "sizeT")?,
        size_z: 1,
        size_c: 1,
        pixel_type,
        little_endian: true,
    };
    let layout = Layout {
        header_size,
        data_offset: non_negative_u64(data_offset, "dataOffset")?,
        bytes_per_image,
        version: VersionLayout::V1 { frame_footer_size },
    };
    Ok((geometry, layout))
}

fn pixel_type_from_raw(value: i64) -> Result<PixelType, DcimgError> {
    PixelType::from_header_value(value)
        .ok_or_else(|| DcimgError::Format(format!("unsupported pixel type {value:#x}")))
}

fn non_negative_u32(value: i64, field: &str) -> Result<u32, DcimgError> {
    u32::try_from(value).map_err(|_| DcimgError::Format(format!("{field} is negative: {value}")))
}

fn non_negative_u64(value: i64, field: &str) -> Result<u64, DcimgError> {
    u64::try_from(value).map_err(|_| DcimgError::Format(format!("{field} is negative: {value}")))
}
