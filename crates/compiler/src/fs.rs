use std::{
    io::{self, Error, ErrorKind},
    path::Path,
};

/// A trait to allow replacing the file system access used to read the input
/// stylesheets and write the result.
///
/// Tests use this to run whole invocations in memory.
pub trait Fs: std::fmt::Debug {
    /// Returns `true` if the path exists on disk and is pointing at a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Returns `true` if the path exists on disk and is pointing at a regular file.
    fn is_file(&self, path: &Path) -> bool;
    /// Read the entire contents of a file into a bytes vector.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    /// Replace the contents of a file, creating it if needed.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Create a directory and all of its missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Use [`std::fs`] to read and write files on disk.
///
/// This is the default file system implementation.
#[derive(Debug)]
pub struct StdFs;

impl Fs for StdFs {
    #[inline]
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[inline]
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    #[inline]
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    #[inline]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// A file system implementation that acts like it’s completely empty.
///
/// Every read and write fails, so only [`from_string`][crate::from_string]
/// is usable with it.
#[derive(Debug)]
pub struct NullFs;

impl NullFs {
    fn error() -> Error {
        Error::new(ErrorKind::NotFound, "NullFs, there is no file system")
    }
}

impl Fs for NullFs {
    #[inline]
    fn is_file(&self, _path: &Path) -> bool {
        false
    }

    #[inline]
    fn is_dir(&self, _path: &Path) -> bool {
        false
    }

    #[inline]
    fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
        Err(Self::error())
    }

    #[inline]
    fn write(&self, _path: &Path, _contents: &[u8]) -> io::Result<()> {
        Err(Self::error())
    }

    #[inline]
    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Err(Self::error())
    }
}
