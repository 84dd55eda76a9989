//! Persistence seam for assembled slices.
//!
//! Encoding to text, MATLAB containers or images lives outside the crate. The runner hands every
//! assembled slice to a [`SliceStore`] under a stable key, and the compositor reads them back
//! when slices are streamed.
use std::collections::BTreeMap;

use crate::error::Result;
use crate::phantom::compositor::PhantomVolume;
use crate::phantom::slice::PhantomSlice;

/// Key of slice `index` for a phantom of `depth` slices.
///
/// Single-slice phantoms use the prefix as is; slice `z` of a multi-slice phantom is stored as
/// `"<prefix>_slice_<z>"`.
pub fn slice_key(prefix: &str, index: usize, depth: usize) -> String {
    if depth <= 1 {
        prefix.to_owned()
    } else {
        format!("{prefix}_slice_{index}")
    }
}

/// Receives assembled slices and the composed volume.
pub trait SliceStore {
    /// Persist `slice` under `key`.
    fn put(&mut self, key: &str, slice: &PhantomSlice) -> Result<()>;

    /// Read back the slice stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<PhantomSlice>>;

    /// Persist the composed volume of a multi-slice phantom.
    fn put_volume(&mut self, _prefix: &str, _volume: &PhantomVolume) -> Result<()> {
        Ok(())
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySliceStore {
    slices: BTreeMap<String, PhantomSlice>,
    volumes: BTreeMap<String, PhantomVolume>,
}

impl MemorySliceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&PhantomSlice> {
        self.slices.get(key)
    }

    pub fn volume(&self, prefix: &str) -> Option<&PhantomVolume> {
        self.volumes.get(prefix)
    }

    /// Stored slice keys in lexical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl SliceStore for MemorySliceStore {
    fn put(&mut self, key: &str, slice: &PhantomSlice) -> Result<()> {
        self.slices.insert(key.to_owned(), slice.clone());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<PhantomSlice>> {
        Ok(self.slices.get(key).cloned())
    }

    fn put_volume(&mut self, prefix: &str, volume: &PhantomVolume) -> Result<()> {
        self.volumes.insert(prefix.to_owned(), volume.clone());
        Ok(())
    }
}
