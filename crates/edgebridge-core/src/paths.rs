//! Platform configuration directory resolution shared by both applications.
//!
//! - Windows:  `%APPDATA%\EdgeBridge\`
//! - Linux:    `$XDG_CONFIG_HOME/edgebridge/` or `~/.config/edgebridge/`
//! - macOS:    `~/Library/Application Support/EdgeBridge/`

use std::path::PathBuf;

/// Returns the EdgeBridge configuration directory for the current platform,
/// or `None` when the required environment variables are unset.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("EdgeBridge"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("EdgeBridge")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("edgebridge"))
    }
}
