//! host::mock
//!
//! In-memory host for deterministic testing.
//!
//! # Design
//!
//! `MockHost` implements every capability trait. Dialogs, clipboard
//! contents, and fetchable resources live in memory. A dialog can be set to
//! appear only after a number of polls, any operation can be made to fail,
//! and every call is recorded for later assertions.
//!
//! # Example
//!
//! ```
//! use natorder::host::mock::MockHost;
//! use natorder::host::{Size, UserEntry};
//! use natorder::host::login_dialog::LoginDialogPatch;
//!
//! # tokio_test::block_on(async {
//! let host = MockHost::new().with_dialog(
//!     "login",
//!     Size::new(300, 200),
//!     vec![UserEntry::new("u10", "user10"), UserEntry::new("u2", "user2")],
//! );
//!
//! let report = LoginDialogPatch::default().apply(&host).await.unwrap();
//! assert_eq!(report.user_ids, vec!["u2", "u10"]);
//! assert!(report.resized);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::traits::{
    Clipboard, DialogHandle, DialogService, FetchedResource, HostError, HttpFetch, Size,
    UserEntry,
};

/// Mock host for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    inner: Arc<Mutex<MockHostInner>>,
}

#[derive(Debug, Default)]
struct MockHostInner {
    dialogs: HashMap<String, MockDialog>,
    clipboard: Option<String>,
    resources: HashMap<String, FetchedResource>,
    next_handle: u64,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

#[derive(Debug)]
struct MockDialog {
    handle: DialogHandle,
    size: Size,
    users: Vec<UserEntry>,
    /// Polls that still return "not open"
    hidden_polls: u32,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    FindDialog(HostError),
    Geometry(HostError),
    Resize(HostError),
    UserEntries(HostError),
    ReorderUsers(HostError),
    WriteText(HostError),
    FetchHead(HostError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    FindDialog { id: String },
    Geometry { dialog: DialogHandle },
    Resize { dialog: DialogHandle, size: Size },
    UserEntries { dialog: DialogHandle },
    ReorderUsers { dialog: DialogHandle, ids: Vec<String> },
    WriteText { text: String },
    FetchHead { url: String },
}

impl MockHost {
    /// Create an empty mock host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an open dialog.
    pub fn with_dialog(self, id: &str, size: Size, users: Vec<UserEntry>) -> Self {
        self.with_delayed_dialog(id, size, users, 0)
    }

    /// Add a dialog that opens only after `hidden_polls` lookups miss it.
    pub fn with_delayed_dialog(
        self,
        id: &str,
        size: Size,
        users: Vec<UserEntry>,
        hidden_polls: u32,
    ) -> Self {
        {
            let mut inner = self.state();
            inner.next_handle += 1;
            let handle = DialogHandle(inner.next_handle);
            inner.dialogs.insert(
                id.to_string(),
                MockDialog {
                    handle,
                    size,
                    users,
                    hidden_polls,
                },
            );
        }
        self
    }

    /// Make `url` fetchable.
    pub fn with_resource(self, url: &str, resource: FetchedResource) -> Self {
        self.state().resources.insert(url.to_string(), resource);
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.state().fail_on = Some(fail_on);
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.state().fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.state().operations.clone()
    }

    /// Current clipboard contents.
    pub fn clipboard_text(&self) -> Option<String> {
        self.state().clipboard.clone()
    }

    /// Current size of a dialog.
    pub fn dialog_size(&self, id: &str) -> Option<Size> {
        self.state().dialogs.get(id).map(|d| d.size)
    }

    /// Current user order of a dialog, as ids.
    pub fn dialog_user_ids(&self, id: &str) -> Option<Vec<String>> {
        self.state()
            .dialogs
            .get(id)
            .map(|d| d.users.iter().map(|u| u.id.clone()).collect())
    }

    fn state(&self) -> MutexGuard<'_, MockHostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: MockOperation) {
        self.state().operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Result<(), HostError> {
        let inner = self.state();
        let error = match &inner.fail_on {
            Some(FailOn::FindDialog(e)) if expected == "find_dialog" => e,
            Some(FailOn::Geometry(e)) if expected == "geometry" => e,
            Some(FailOn::Resize(e)) if expected == "resize" => e,
            Some(FailOn::UserEntries(e)) if expected == "user_entries" => e,
            Some(FailOn::ReorderUsers(e)) if expected == "reorder_users" => e,
            Some(FailOn::WriteText(e)) if expected == "write_text" => e,
            Some(FailOn::FetchHead(e)) if expected == "fetch_head" => e,
            _ => return Ok(()),
        };
        Err(error.clone())
    }

    fn with_dialog_mut<T>(
        &self,
        handle: DialogHandle,
        f: impl FnOnce(&mut MockDialog) -> T,
    ) -> Result<T, HostError> {
        let mut inner = self.state();
        inner
            .dialogs
            .values_mut()
            .find(|d| d.handle == handle)
            .map(f)
            .ok_or_else(|| HostError::DialogClosed(format!("handle {}", handle.0)))
    }
}

#[async_trait]
impl DialogService for MockHost {
    async fn find_dialog(&self, id: &str) -> Result<Option<DialogHandle>, HostError> {
        self.record(MockOperation::FindDialog { id: id.to_string() });
        self.check_fail("find_dialog")?;

        let mut inner = self.state();
        Ok(match inner.dialogs.get_mut(id) {
            Some(dialog) if dialog.hidden_polls > 0 => {
                dialog.hidden_polls -= 1;
                None
            }
            Some(dialog) => Some(dialog.handle),
            None => None,
        })
    }

    async fn geometry(&self, dialog: DialogHandle) -> Result<Size, HostError> {
        self.record(MockOperation::Geometry { dialog });
        self.check_fail("geometry")?;
        self.with_dialog_mut(dialog, |d| d.size)
    }

    async fn resize(&self, dialog: DialogHandle, size: Size) -> Result<(), HostError> {
        self.record(MockOperation::Resize { dialog, size });
        self.check_fail("resize")?;
        self.with_dialog_mut(dialog, |d| d.size = size)
    }

    async fn user_entries(&self, dialog: DialogHandle) -> Result<Vec<UserEntry>, HostError> {
        self.record(MockOperation::UserEntries { dialog });
        self.check_fail("user_entries")?;
        self.with_dialog_mut(dialog, |d| d.users.clone())
    }

    async fn reorder_users(&self, dialog: DialogHandle, ids: &[String]) -> Result<(), HostError> {
        self.record(MockOperation::ReorderUsers {
            dialog,
            ids: ids.to_vec(),
        });
        self.check_fail("reorder_users")?;
        self.with_dialog_mut(dialog, |d| {
            let mut reordered = Vec::with_capacity(d.users.len());
            for id in ids {
                if let Some(pos) = d.users.iter().position(|u| &u.id == id) {
                    reordered.push(d.users.remove(pos));
                }
            }
            // Rows the caller did not mention keep their relative order at the end
            reordered.append(&mut d.users);
            d.users = reordered;
        })
    }
}

#[async_trait]
impl Clipboard for MockHost {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        self.record(MockOperation::WriteText {
            text: text.to_string(),
        });
        self.check_fail("write_text")?;
        self.state().clipboard = Some(text.to_string());
        Ok(())
    }
}

#[async_trait]
impl HttpFetch for MockHost {
    async fn fetch_head(&self, url: &str) -> Result<FetchedResource, HostError> {
        self.record(MockOperation::FetchHead {
            url: url.to_string(),
        });
        self.check_fail("fetch_head")?;
        self.state()
            .resources
            .get(url)
            .cloned()
            .ok_or_else(|| HostError::Network(format!("no route to {}", url)))
    }
}
