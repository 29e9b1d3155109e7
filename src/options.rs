//! Options controlling how a DCIMG file is opened.

/// Construction-time options for [`crate::Dcimg::open`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DcimgOptions {
    /// Enumerate same-directory sibling `.dcimg` files as additional
    /// Z-slices, sorted lexicographically.
    pub group_files: bool,
    /// Overrides the computed four-pixel patch row.
    ///
    /// The V1 patch row (`sizeY/2`, adjusted by parity) is a heuristic
    /// inherited from the reference reader and is known to be wrong for
    /// some files; set this when the correct row is known out of band.
    pub patch_row_override: Option<u32>,
}

impl DcimgOptions {
    pub fn new(group_files: bool) -> Self {
        Self {
            group_files,
            patch_row_override: None,
        }
    }
}
