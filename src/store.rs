//! Persistent Parameter Store
//!
//! The board reads its identity from two files in the flash file system.
//! Only read-by-path with a maximum length is needed, so the store is a
//! one-method trait. `RamStore` keeps files in memory for host builds and
//! board simulation.

use heapless::Vec;

use crate::error::{StoreError, StoreResult};

/// Read access to the flash file system
pub trait ParameterStore {
    /// Read up to `buf.len()` bytes of the file at `path` into `buf`
    ///
    /// Returns the number of bytes copied. A file longer than `buf` is
    /// truncated to `buf.len()`.
    fn read(&mut self, path: &str, buf: &mut [u8]) -> StoreResult<usize>;

    /// Read exactly `buf.len()` bytes, treating anything shorter as a failure
    fn read_exact(&mut self, path: &str, buf: &mut [u8]) -> StoreResult<()> {
        let len = self.read(path, buf)?;
        if len < buf.len() {
            return Err(StoreError::ShortRead {
                expected: buf.len(),
                actual: len,
            });
        }
        Ok(())
    }
}

impl<S: ParameterStore + ?Sized> ParameterStore for &mut S {
    fn read(&mut self, path: &str, buf: &mut [u8]) -> StoreResult<usize> {
        (**self).read(path, buf)
    }
}

/// Maximum number of files held by a [`RamStore`]
pub const RAM_STORE_FILES: usize = 4;

/// Maximum file size held by a [`RamStore`]
pub const RAM_STORE_FILE_SIZE: usize = 256;

/// A stored file
#[derive(Clone, Debug)]
struct RamFile {
    path: &'static str,
    data: Vec<u8, RAM_STORE_FILE_SIZE>,
}

/// In-memory parameter store
///
/// Counts reads per store so callers can verify caching behaviour.
#[derive(Clone, Debug, Default)]
pub struct RamStore {
    files: Vec<RamFile, RAM_STORE_FILES>,
    failure: Option<i32>,
    reads: u32,
}

impl RamStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            failure: None,
            reads: 0,
        }
    }

    /// Add or replace a file
    ///
    /// Data beyond [`RAM_STORE_FILE_SIZE`] is dropped. Returns `false` if the
    /// store is full.
    pub fn insert(&mut self, path: &'static str, data: &[u8]) -> bool {
        let len = data.len().min(RAM_STORE_FILE_SIZE);
        let mut contents = Vec::new();
        if contents.extend_from_slice(&data[..len]).is_err() {
            return false;
        }

        if let Some(file) = self.files.iter_mut().find(|f| f.path == path) {
            file.data = contents;
            return true;
        }

        self.files
            .push(RamFile {
                path,
                data: contents,
            })
            .is_ok()
    }

    /// Make every subsequent read fail with the given status
    pub fn fail_with(&mut self, status: i32) {
        self.failure = Some(status);
    }

    /// Number of read calls served so far
    #[must_use]
    pub const fn reads(&self) -> u32 {
        self.reads
    }
}

impl ParameterStore for RamStore {
    fn read(&mut self, path: &str, buf: &mut [u8]) -> StoreResult<usize> {
        self.reads += 1;

        if let Some(status) = self.failure {
            return Err(StoreError::Io(status));
        }

        let file = self
            .files
            .iter()
            .find(|f| f.path == path)
            .ok_or(StoreError::NotFound)?;

        let len = file.data.len().min(buf.len());
        buf[..len].copy_from_slice(&file.data[..len]);
        Ok(len)
    }
}
