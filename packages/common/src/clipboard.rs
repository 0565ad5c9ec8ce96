//! Copying the web link or the `qrx:` token, with a soft hint instead of an
//! error.
//!
//! The entry page script performs the same copy in the browser and shows
//! [`COPY_OK_HINT`] or [`COPY_FAILED_HINT`]; [`copy_with_hint`] is the
//! reference model of that behavior, usable by any native client that has a
//! [`Clipboard`].

use thiserror::Error;
use tracing::warn;

pub const COPY_OK_HINT: &str = "Link kopiert ✅";
pub const COPY_FAILED_HINT: &str = "Kopieren nicht möglich – bitte manuell markieren/kopieren.";

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard access denied")]
    PermissionDenied,

    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    /// Acknowledgement shown next to the copy buttons.
    pub fn hint(self) -> &'static str {
        match self {
            Self::Copied => COPY_OK_HINT,
            Self::Failed => COPY_FAILED_HINT,
        }
    }
}

/// Copy `text`, turning any clipboard failure into a soft hint.
pub fn copy_with_hint<C: Clipboard + ?Sized>(clipboard: &C, text: &str) -> CopyOutcome {
    match clipboard.write_text(text) {
        Ok(()) => CopyOutcome::Copied,
        Err(e) => {
            warn!("Clipboard write failed: {e}");
            CopyOutcome::Failed
        }
    }
}
