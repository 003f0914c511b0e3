//! Growable byte stores with fixed-width little-endian cell access.
//!
//! A [`Directory`] hands out [`DataAccess`] handles by name. A handle is a
//! random-access byte buffer that can be flushed to and reloaded from a
//! backing file, or kept purely in memory.

mod ram;

pub use ram::DataAccess;

use std::path::PathBuf;

/// Namespace for byte stores. With a base path, stores flush to
/// `<base>/<name>`; without one they are memory-only and `load_existing`
/// always reports no data.
pub struct Directory {
    base: Option<PathBuf>,
}

impl Directory {
    pub fn ram() -> Directory {
        Directory { base: None }
    }

    pub fn with_path(base: impl Into<PathBuf>) -> Directory {
        Directory {
            base: Some(base.into()),
        }
    }

    pub fn find(&self, name: &str) -> DataAccess {
        DataAccess::new(self.base.as_ref().map(|base| base.join(name)))
    }
}
