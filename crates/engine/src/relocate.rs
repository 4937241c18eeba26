use std::{
    ffi::{OsStr, OsString},
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::SortError;

/// `stem_N.ext`, or `name_N` when there is no extension. Dotfiles such as
/// `.env` are all stem.
pub fn disambiguated_name(file_name: &OsStr, n: u64) -> OsString {
    let path = Path::new(file_name);
    let stem = path.file_stem().unwrap_or(file_name);

    let mut out = OsString::from(stem);
    out.push(format!("_{n}"));
    if let Some(ext) = path.extension() {
        out.push(".");
        out.push(ext);
    }
    out
}

/// First free path for `file_name` inside `dir`: the plain name, then
/// `_1`, `_2`, ... in increasing order.
pub fn unique_target<F>(dir: &Path, file_name: &OsStr, taken: F) -> PathBuf
where
    F: Fn(&Path) -> bool,
{
    let candidate = dir.join(file_name);
    if !taken(&candidate) {
        return candidate;
    }

    (1..=u64::MAX)
        .map(|n| dir.join(disambiguated_name(file_name, n)))
        .find(|p| !taken(p))
        .unwrap_or(candidate)
}

/// True when anything, including a dangling symlink, occupies `path`.
pub(crate) fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Rename, falling back to copy and delete across filesystems.
pub fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!("[relocate] {:?} crosses devices, copying", from);
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Move `src` into `bucket_dir`, creating the directory if needed and never
/// overwriting an existing entry. Returns the final path.
pub fn relocate(src: &Path, bucket_dir: &Path) -> Result<PathBuf, SortError> {
    fs::create_dir_all(bucket_dir).map_err(|source| SortError::CreateDir {
        path: bucket_dir.to_path_buf(),
        source,
    })?;

    let file_name = src.file_name().ok_or_else(|| SortError::Move {
        from: src.to_path_buf(),
        to: bucket_dir.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
    })?;

    let target = unique_target(bucket_dir, file_name, occupied);

    move_file(src, &target).map_err(|source| SortError::Move {
        from: src.to_path_buf(),
        to: target.clone(),
        source,
    })?;

    debug!("[relocate] {:?} -> {:?}", src, target);
    Ok(target)
}

#[cfg(test)]
#[path = "relocate_tests.rs"]
mod tests;
