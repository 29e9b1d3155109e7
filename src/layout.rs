//! Byte offsets derived while parsing the session header.

/// Fields needed to locate the four-pixel patch, specific to the version
/// whose layout produced them.
#[derive(Debug, Clone, Copy)]
pub(crate) enum VersionLayout {
    V0 { bytes_per_row: u64, offset_to_footer: i64 },
    V1 { frame_footer_size: u64 },
}

/// Offsets and sizes needed to locate frame data within a file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub(crate) header_size: u64,
    pub(crate) data_offset: u64,
    pub(crate) bytes_per_image: u64,
    pub(crate) version: VersionLayout,
}
