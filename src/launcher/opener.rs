//! Handing addresses to the operating system

use crate::error::{QuickLauncherError, Result};
use tracing::info;

/// Opens button targets
///
/// Both calls are fire-and-forget: they return once the request has been
/// handed off, not when the target application exits.
pub trait Opener {
    /// Open a URL in the default browser
    fn open_url(&mut self, url: &str) -> Result<()>;

    /// Open a file, folder or program with its default handler
    fn open_path(&mut self, path: &str) -> Result<()>;
}

/// [`Opener`] backed by the desktop's default handlers
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open_url(&mut self, url: &str) -> Result<()> {
        info!("Opening URL: {}", url);
        open::that_detached(url).map_err(|e| QuickLauncherError::LaunchFailed(Box::new(e)))
    }

    fn open_path(&mut self, path: &str) -> Result<()> {
        info!("Opening path: {}", path);
        open::that_detached(path).map_err(|e| QuickLauncherError::LaunchFailed(Box::new(e)))
    }
}
