//! Companion-file grouping: treats sorted same-directory siblings as the Z axis.

use std::path::{Path, PathBuf};

use crate::consts::COMPANION_EXTENSION;
use crate::errors::DcimgError;
use crate::reader::{is_dcimg, DcimgReader};

/// Builds the ordered companion set for `primary`.
///
/// When `enabled` is `false` the set is just `[primary]`. Otherwise the
/// parent directory is scanned, entries are sorted lexicographically, and
/// each `.dcimg` entry is opened transiently to verify the magic; entries
/// that fail to open or fail the check are skipped with a warning rather
/// than aborting the whole group.
pub(crate) fn group(primary: &Path, enabled: bool) -> Result<Vec<PathBuf>, DcimgError> {
    if !enabled {
        return Ok(vec![primary.to_path_buf()]);
    }

    let dir = primary
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut entries: Vec<PathBuf> = std::fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    let mut companions = Vec::new();
    for path in entries {
        let matches_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(COMPANION_EXTENSION))
            .unwrap_or(false);
        if !matches_extension {
            continue;
        }

        match probe(&path) {
            Ok(true) => companions.push(path),
            Ok(false) => log::warn!("{} failed the DCIMG magic check, skipping", path.display()),
            Err(err) => log::warn!("{} could not be probed for DCIMG magic: {err}", path.display()),
        }
    }

    if companions.is_empty() {
        return Err(DcimgError::Format(
            "no DCIMG companion files found in directory".into(),
        ));
    }
    Ok(companions)
}

fn probe(path: &Path) -> Result<bool, DcimgError> {
    let mut reader = DcimgReader::open(path)?;
    reader.seek(0)?;
    let result = is_dcimg(&mut reader)?;
    reader.close();
    Ok(result)
}
