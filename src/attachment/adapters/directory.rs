//! Directory-backed blob store using capability-based filesystem access.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};
use std::io::{self, Write};
use tracing::warn;

use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult};

/// Blob store rooted at one upload directory.
///
/// All access goes through a [`Dir`] handle, so names can never escape the
/// root.
#[derive(Debug)]
pub struct CapStdBlobStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl CapStdBlobStore {
    /// Opens the directory, creating it and its parents when missing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> io::Result<Self> {
        let path = root.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            root: path.to_owned(),
            dir,
        })
    }

    fn write_claimed(&self, name: &str, payload: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(name, &options)?;
        let written = file.write_all(payload).and_then(|()| file.sync_all());
        if let Err(err) = written {
            drop(file);
            if let Err(cleanup) = self.dir.remove_file(name) {
                warn!(name, error = %cleanup, "failed to remove partial blob");
            }
            return Err(err);
        }
        Ok(())
    }
}

impl BlobStore for CapStdBlobStore {
    fn create_new(&self, name: &str, payload: &[u8]) -> BlobStoreResult<String> {
        match self.write_claimed(name, payload) {
            Ok(()) => Ok(self.root.join(name).into_string()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(BlobStoreError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn read(&self, name: &str) -> BlobStoreResult<Vec<u8>> {
        match self.dir.read(name) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(BlobStoreError::NotFound(name.to_owned()))
            }
            Err(err) => Err(err.into()),
        }
    }
}
