use std::{
    fs::{self, read_dir},
    io::Result,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    inspect::{InspectOptions, inspect},
    record::FileRecord,
};

#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Descend into subdirectories without depth limit.
    pub recursive: bool,
    /// Directory subtree to leave out, typically a destination nested in the
    /// source. Compared after canonicalization.
    pub exclude: Option<PathBuf>,
}

/// List regular files under `root` in a stable order.
///
/// Within a directory, entries are sorted by name and files come before
/// subdirectories; subdirectories are visited depth-first. Symlinks are
/// never followed or returned. Only an unreadable `root` is an error; any
/// other unreadable directory or entry is logged and skipped.
pub fn collect_files(root: &Path, opts: &WalkOptions) -> Result<Vec<PathBuf>> {
    let exclude = opts.exclude.as_deref().and_then(|p| p.canonicalize().ok());

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut is_root = true;

    while let Some(dir) = pending.pop() {
        let subdirs = match scan_dir(&dir, &mut files) {
            Ok(subdirs) => subdirs,
            Err(e) if is_root => return Err(e),
            Err(e) => {
                warn!("[walk] read_dir({:?}) failed: {e}", dir);
                continue;
            }
        };
        is_root = false;

        if !opts.recursive {
            if !subdirs.is_empty() {
                debug!("[walk] non-recursive: skipping {} subdirectories", subdirs.len());
            }
            break;
        }

        // Reversed so the stack pops them in name order.
        for sub in subdirs.into_iter().rev() {
            if is_excluded(&sub, exclude.as_deref()) {
                debug!("[walk] skipping excluded directory {:?}", sub);
                continue;
            }
            pending.push(sub);
        }
    }

    Ok(files)
}

/// Inspect every file `collect_files` yields. Files that fail inspection
/// are logged and left out.
pub fn scan(
    root: &Path,
    walk: &WalkOptions,
    inspect_opts: &InspectOptions,
) -> Result<Vec<FileRecord>> {
    let paths = collect_files(root, walk)?;
    let mut records = Vec::with_capacity(paths.len());

    for path in paths {
        match inspect(&path, inspect_opts) {
            Ok(rec) => records.push(rec),
            Err(e) => warn!("[walk] skipping {:?}: {e}", path),
        }
    }

    Ok(records)
}

/// Append the files of `dir` to `files` and return its subdirectories, both
/// sorted by name.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<fs::DirEntry> = Vec::new();

    for entry_res in read_dir(dir)? {
        match entry_res {
            Ok(e) => entries.push(e),
            Err(e) => warn!("[walk] error reading entry in {:?}: {e}", dir),
        }
    }

    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        // DirEntry::file_type does not follow symlinks.
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                warn!("[walk] cannot stat {:?}: {e}", entry.path());
                continue;
            }
        };

        if file_type.is_file() {
            files.push(entry.path());
        } else if file_type.is_dir() {
            subdirs.push(entry.path());
        } else {
            debug!("[walk] skipping non-regular entry {:?}", entry.path());
        }
    }

    Ok(subdirs)
}

fn is_excluded(dir: &Path, exclude: Option<&Path>) -> bool {
    match exclude {
        Some(ex) => dir.canonicalize().is_ok_and(|c| c == ex),
        None => false,
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
