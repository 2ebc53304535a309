use crate::{Result, ShufflerError};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// True when the text after the last '.' is a recognized extension, ignoring case.
/// A name with no '.' at all never qualifies.
pub fn has_image_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|&valid_ext| valid_ext.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

pub fn is_image_file(path: &Path) -> bool {
    path.file_name()
        .map(|name| has_image_extension(&name.to_string_lossy()))
        .unwrap_or(false)
}

fn is_image_entry(entry: &DirEntry) -> bool {
    !entry.path().is_dir() && is_image_file(entry.path())
}

/// Direct children of `dir`, sorted by file name.
///
/// Links are listed as they are, dangling ones included; only failing to read `dir`
/// itself is an error.
pub fn list_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| ShufflerError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })
}

pub fn count_images(entries: &[DirEntry]) -> usize {
    entries.iter().filter(|entry| is_image_entry(entry)).count()
}

/// Samples entries of `folder` uniformly at random until one is a recognized image.
///
/// Every sampled name is written to `out`, and the accepted one again. The listing is
/// checked for at least one image first, so a folder emptied after startup yields
/// `NoValidImage` instead of sampling forever.
pub fn pick_image<R, W>(folder: &Path, rng: &mut R, out: &mut W) -> Result<PathBuf>
where
    R: Rng + ?Sized,
    W: Write + ?Sized,
{
    let entries = list_entries(folder)?;
    if count_images(&entries) == 0 {
        return Err(ShufflerError::NoValidImage(folder.display().to_string()));
    }

    debug!("Sampling {} entries in {:?}", entries.len(), folder);

    let chosen = loop {
        let Some(entry) = entries.choose(rng) else {
            return Err(ShufflerError::EmptySubfolder(folder.display().to_string()));
        };
        let name = entry.file_name().to_string_lossy();
        writeln!(out, "found file: {name}")?;
        if is_image_entry(entry) {
            writeln!(out, "found valid image: {name}")?;
            break entry.path();
        }
    };

    Ok(std::path::absolute(chosen).unwrap_or_else(|_| chosen.to_path_buf()))
}
