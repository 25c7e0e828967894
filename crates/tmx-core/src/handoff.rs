//! Delivering files and URIs to the OS default handler.

use crate::error::Result;
use crate::platform;
use std::path::Path;
use tracing::info;

/// Hands an acquired map to whatever the OS resolves as its handler.
///
/// A successful return only means the OS accepted the request. Whether the
/// game actually loaded the map is not observable from here.
pub trait Handoff: Send + Sync {
    /// Open a file with its registered default application.
    fn open_path(&self, path: &Path) -> Result<()>;

    /// Invoke a custom URI scheme.
    fn open_uri(&self, uri: &str) -> Result<()>;
}

/// Handoff through the desktop shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellHandoff;

impl Handoff for ShellHandoff {
    fn open_path(&self, path: &Path) -> Result<()> {
        info!("Opening map: {}", path.display());
        platform::open_path(path)
    }

    fn open_uri(&self, uri: &str) -> Result<()> {
        info!("Opening URI: {}", uri);
        platform::open_uri(uri)
    }
}
