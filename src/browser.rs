//! Opening download links in the user's browser

use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser for {url}: {source}")]
    Launch {
        url: String,
        source: std::io::Error,
    },

    #[error("Browser opener exited with {status} for {url}")]
    Exit { url: String, status: String },
}

/// Something that can show a URL to the user
pub trait Browser {
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]);
            cmd
        };

        #[cfg(target_os = "macos")]
        let mut command = Command::new("open");

        #[cfg(all(unix, not(target_os = "macos")))]
        let mut command = Command::new("xdg-open");

        command.arg(url);
        command
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        let status = Self::command(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| BrowserError::Launch {
                url: url.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(BrowserError::Exit {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}
