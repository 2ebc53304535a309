use crate::bucket::TimeBucket;
use crate::picker::{count_images, list_entries};
use crate::{Result, ShufflerError};
use log::debug;
use std::path::{Path, PathBuf};

/// Checks that `base` holds one non-empty subfolder per bucket, each with at least one
/// recognized image. Stops at the first failing bucket.
pub fn validate_base_directory(base: &Path) -> Result<()> {
    if !base.is_dir() {
        return Err(ShufflerError::BaseDirectoryMissing(base.to_path_buf()));
    }

    for bucket in TimeBucket::ALL {
        let name = bucket.folder_name();
        let folder = base.join(name);
        if !folder.is_dir() {
            return Err(ShufflerError::MissingSubfolder(name.to_owned()));
        }

        let entries = list_entries(&folder)?;
        if entries.is_empty() {
            return Err(ShufflerError::EmptySubfolder(name.to_owned()));
        }

        let images = count_images(&entries);
        if images == 0 {
            return Err(ShufflerError::NoValidImage(name.to_owned()));
        }
        debug!("Subfolder {name:?}: {images} of {} entries are images", entries.len());
    }

    Ok(())
}

/// A base directory that passed validation.
#[derive(Debug, Clone)]
pub struct BaseDirectory {
    root: PathBuf,
}

impl BaseDirectory {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        validate_base_directory(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bucket_path(&self, bucket: TimeBucket) -> PathBuf {
        self.root.join(bucket.folder_name())
    }
}
