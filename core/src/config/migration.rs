//! Config schema migration

use anyhow::Result;

/// Versioned config schemas implement this to migrate forward on load
pub trait Migrate {
    /// Version currently stored on disk
    fn current_version(&self) -> u32;

    /// Version this build expects
    fn target_version() -> u32;

    /// Migrate the config in place to the target version
    fn migrate(&mut self) -> Result<()>;
}
