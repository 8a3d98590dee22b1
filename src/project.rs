//! Locating the configure script of an autotools project.

use std::path::{Path, PathBuf};

use tracing::debug;

pub const CONFIGURE_AC: &str = "configure.ac";
pub const CONFIGURE_IN: &str = "configure.in";

pub const DEPRECATED_CONFIGURE_IN: &str =
    "Files named 'configure.in' are deprecated. Consider renaming to 'configure.ac'";
pub const MISSING_CONFIGURE: &str = "Cannot find 'configure.ac' or 'configure.in'";

/// The configure script chosen for a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureFile {
    pub path: PathBuf,
    /// Set when only the old `configure.in` name was found.
    pub deprecated: bool,
}

impl ConfigureFile {
    /// Name used in diagnostics, without a leading `./`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .strip_prefix(".")
            .unwrap_or(&self.path)
            .display()
            .to_string()
    }
}

/// Find the configure script in `dir`. `configure.ac` wins over
/// `configure.in`.
#[must_use]
pub fn locate_configure_file(dir: &Path) -> Option<ConfigureFile> {
    let found = [(CONFIGURE_AC, false), (CONFIGURE_IN, true)]
        .into_iter()
        .map(|(name, deprecated)| (dir.join(name), deprecated))
        .find(|(path, _)| path.is_file())
        .map(|(path, deprecated)| ConfigureFile { path, deprecated });
    debug!(dir = %dir.display(), ?found, "configure script lookup");
    found
}
