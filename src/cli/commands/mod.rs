//! Command implementations

pub mod categories;
pub mod completions;
pub mod init;
pub mod load;
pub mod stats;

use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::Config;

/// Resolve the catalog database path for this invocation
///
/// An explicit --database wins over the configured paths; --test selects
/// the test catalog.
pub(crate) fn catalog_path(global: &GlobalOpts) -> PathBuf {
    if let Some(ref path) = global.database {
        return path.clone();
    }
    Config::load().database_path(global.test)
}
