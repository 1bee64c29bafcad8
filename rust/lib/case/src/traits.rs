use std::io;
use std::path::Path;

/// CaseStore is the filesystem seam under a case directory.
///
/// `CaseDirectory` only touches disk through this trait, so the default
/// `FileStore` can be swapped for an in-memory store or a fault-injecting
/// wrapper in tests. Errors are plain `io::Error`s; the caller attaches the
/// path. A missing file must surface as `io::ErrorKind::NotFound`.
pub trait CaseStore: Send + Sync {
    /// Read a whole text file.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Create or overwrite a text file. Parent directories already exist.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Create a directory and any missing parents. No-op if it exists.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Names of the immediate subdirectories of `path`, in no particular order.
    fn list_dirs(&self, path: &Path) -> io::Result<Vec<String>>;
}
