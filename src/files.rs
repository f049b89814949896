//! Named text-file access for the hosts data directory.
//!
//! The builder reads and writes exactly two logical files: the mandatory
//! override file and the mirror cache. Both go through the [`FileStore`]
//! trait so tests can supply in-memory content.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Logical name of the mandatory local override file.
pub const OVERRIDE_FILE: &str = "hosts.txt";

/// Logical name of the mirror cache file.
pub const MIRROR_CACHE_FILE: &str = "hosts-cache.txt";

/// Read/write access to named text files.
pub trait FileStore {
    /// Reads the full contents of a named file as UTF-8 text.
    fn read_text(&self, name: &str) -> io::Result<String>;

    /// Writes `contents` to a named file, replacing any previous contents.
    fn write_text(&self, name: &str, contents: &str) -> io::Result<()>;
}

/// [`FileStore`] rooted at a data directory on disk.
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Creates a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The full path of a named file inside this store.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl FileStore for DirStore {
    fn read_text(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.path_of(name))
    }

    fn write_text(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.path_of(name), contents)
    }
}
