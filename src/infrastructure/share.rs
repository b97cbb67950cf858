//! Hand-off of a finished order to something outside the app.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("failed to write order to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Receives the order text when the user sends an order.
pub trait ShareTarget: fmt::Debug {
    fn share(&mut self, subject: &str, body: &str) -> Result<(), ShareError>;

    /// Short description shown to the user after a successful share.
    fn describe(&self) -> String;
}

/// Copies the order onto the system clipboard.
///
/// The clipboard handle is opened on first use and kept, since on some
/// platforms the copied text only lives as long as the handle does.
#[derive(Default)]
pub struct ClipboardShare {
    clipboard: Option<arboard::Clipboard>,
}

impl fmt::Debug for ClipboardShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardShare")
            .field("open", &self.clipboard.is_some())
            .finish()
    }
}

impl ShareTarget for ClipboardShare {
    fn share(&mut self, subject: &str, body: &str) -> Result<(), ShareError> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()?,
        };
        let result = clipboard.set_text(format!("{}\n\n{}", subject, body));
        self.clipboard = Some(clipboard);
        Ok(result?)
    }

    fn describe(&self) -> String {
        "clipboard".to_string()
    }
}

/// Appends each order to a text file.
#[derive(Debug, Clone)]
pub struct FileShare {
    path: PathBuf,
}

impl FileShare {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareTarget for FileShare {
    fn share(&mut self, subject: &str, body: &str) -> Result<(), ShareError> {
        let io_error = |source| ShareError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error)?;
        writeln!(file, "{}\n\n{}\n", subject, body).map_err(io_error)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
