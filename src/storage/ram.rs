use std::{
    fs,
    path::PathBuf,
};

use crate::error::Result;

/// Memory-backed byte store. Cell accessors take byte offsets and do not
/// bounds-extend; callers grow the store with `ensure_capacity` first.
pub struct DataAccess {
    file: Option<PathBuf>,
    bytes: Vec<u8>,
    closed: bool,
}

impl DataAccess {
    pub(super) fn new(file: Option<PathBuf>) -> DataAccess {
        DataAccess {
            file,
            bytes: Vec::new(),
            closed: false,
        }
    }

    /// Allocates the initial capacity, zero-filled.
    pub fn create(&mut self, bytes: usize) {
        self.bytes = vec![0; bytes];
    }

    /// Grows the store to at least the given size, zero-filling new space.
    /// Never shrinks.
    pub fn ensure_capacity(&mut self, bytes: usize) {
        if bytes > self.bytes.len() {
            self.bytes.resize(bytes, 0);
        }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn set_u16(&mut self, offset: usize, value: u16) {
        self.bytes[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    pub fn get_u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes(self.bytes[offset..offset + 2].try_into().unwrap())
    }

    pub fn set_u32(&mut self, offset: usize, value: u32) {
        self.bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn get_u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.bytes[offset..offset + 4].try_into().unwrap())
    }

    /// Replaces the buffer with previously flushed data. Returns false when
    /// there is no backing file or it has never been written.
    pub fn load_existing(&mut self) -> Result<bool> {
        let Some(file) = &self.file else {
            return Ok(false);
        };

        if !file.exists() {
            return Ok(false);
        }

        self.bytes = fs::read(file)?;
        Ok(true)
    }

    /// Writes the buffer to the backing file, if any.
    pub fn flush(&mut self) -> Result<()> {
        if let Some(file) = &self.file {
            if let Some(parent) = file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(file, &self.bytes)?;
        }

        Ok(())
    }

    /// Marks the store closed. Idempotent; the buffer stays readable so late
    /// readers do not observe torn state.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
