//! host::traits
//!
//! Capability traits for the services an extension host provides.
//!
//! # Design
//!
//! Patches never reach for ambient globals. Each one receives the narrow
//! capability it needs (dialogs, clipboard, or HTTP) as a trait object.
//! The traits are async because every host service performs I/O.
//!
//! Host services are opaque: a patch only sees the values these traits
//! return, never the widget tree or network stack behind them.
//!
//! # Example
//!
//! ```ignore
//! use natorder::host::{Clipboard, HostError};
//!
//! async fn copy(clipboard: &dyn Clipboard) -> Result<(), HostError> {
//!     clipboard.write_text("[Example](https://example.com)").await
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Errors from host services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The dialog never appeared while polling.
    #[error("dialog '{id}' not found after {attempts} attempts")]
    DialogNotFound { id: String, attempts: u32 },

    /// The dialog was closed while a patch was working on it.
    #[error("dialog closed: {0}")]
    DialogClosed(String),

    /// The clipboard rejected the write.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// The URL could not be parsed or is not http(s).
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The service is not available in this host.
    #[error("host service unavailable: {0}")]
    Unavailable(String),
}

/// Opaque reference to a host dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogHandle(pub u64);

/// Dialog dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One row of a dialog's user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    /// Stable identifier the host uses to reorder rows
    pub id: String,
    /// Text shown for the row
    pub display_name: String,
}

impl UserEntry {
    /// Create a user entry.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// What a fetch learned about a remote resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedResource {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Raw `Content-Type` header, if present
    pub content_type: Option<String>,
    /// First bytes of the body, for sniffing
    pub body_prefix: Vec<u8>,
}

/// Access to the host's dialogs.
#[async_trait]
pub trait DialogService: Send + Sync {
    /// Look up an open dialog by id.
    async fn find_dialog(&self, id: &str) -> Result<Option<DialogHandle>, HostError>;

    /// Current dialog size.
    async fn geometry(&self, dialog: DialogHandle) -> Result<Size, HostError>;

    /// Resize the dialog.
    async fn resize(&self, dialog: DialogHandle, size: Size) -> Result<(), HostError>;

    /// Rows of the dialog's user list, in display order.
    async fn user_entries(&self, dialog: DialogHandle) -> Result<Vec<UserEntry>, HostError>;

    /// Rearrange the user list to match `ids`.
    async fn reorder_users(&self, dialog: DialogHandle, ids: &[String]) -> Result<(), HostError>;
}

/// Write access to the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    async fn write_text(&self, text: &str) -> Result<(), HostError>;
}

/// Minimal HTTP access for inspecting a resource before installing it.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Fetch status, content type, and the start of the body.
    async fn fetch_head(&self, url: &str) -> Result<FetchedResource, HostError>;
}
