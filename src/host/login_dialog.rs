//! host::login_dialog
//!
//! Resize the host's login dialog and sort its user list.
//!
//! # Flow
//!
//! 1. Poll for the dialog until it opens or attempts run out
//! 2. Resize it to the target size if it differs
//! 3. Natural-sort the user rows by display name and push the new order

use std::time::Duration;

use super::traits::{DialogHandle, DialogService, HostError, Size};
use crate::core::compare::NaturalOrder;

/// Id the host registers its login dialog under.
pub const LOGIN_DIALOG_ID: &str = "login";

/// Settings for the login dialog patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDialogPatch {
    /// Dialog to patch
    pub dialog_id: String,
    /// Size the dialog is resized to
    pub size: Size,
    /// Delay between polls
    pub poll_interval: Duration,
    /// Polls before giving up (at least 1)
    pub max_attempts: u32,
    /// Comparator for the user list
    pub order: NaturalOrder,
}

impl Default for LoginDialogPatch {
    fn default() -> Self {
        Self {
            dialog_id: LOGIN_DIALOG_ID.to_string(),
            size: Size::new(480, 640),
            poll_interval: Duration::from_millis(100),
            max_attempts: 50,
            order: NaturalOrder::default(),
        }
    }
}

/// What the patch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginDialogReport {
    /// Polls made before the dialog was found
    pub attempts: u32,
    /// Whether a resize was issued
    pub resized: bool,
    /// Whether the user list order changed
    pub reordered: bool,
    /// User ids in their final order
    pub user_ids: Vec<String>,
}

impl LoginDialogPatch {
    /// Apply the patch against the host's dialogs.
    ///
    /// # Errors
    ///
    /// Returns `HostError::DialogNotFound` if the dialog does not open within
    /// `max_attempts` polls, and propagates any dialog service error.
    pub async fn apply(
        &self,
        dialogs: &dyn DialogService,
    ) -> Result<LoginDialogReport, HostError> {
        let (dialog, attempts) = self.wait_for_dialog(dialogs).await?;

        let current = dialogs.geometry(dialog).await?;
        let resized = current != self.size;
        if resized {
            dialogs.resize(dialog, self.size).await?;
        }

        let entries = dialogs.user_entries(dialog).await?;
        let original: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let sorted = self.order.sort(entries, |e| e.display_name.clone());
        let user_ids: Vec<String> = sorted.into_iter().map(|e| e.id).collect();

        let reordered = user_ids != original;
        if reordered {
            dialogs.reorder_users(dialog, &user_ids).await?;
        }

        Ok(LoginDialogReport {
            attempts,
            resized,
            reordered,
            user_ids,
        })
    }

    async fn wait_for_dialog(
        &self,
        dialogs: &dyn DialogService,
    ) -> Result<(DialogHandle, u32), HostError> {
        let max_attempts = self.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            if let Some(handle) = dialogs.find_dialog(&self.dialog_id).await? {
                return Ok((handle, attempt));
            }
            if attempt < max_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(HostError::DialogNotFound {
            id: self.dialog_id.clone(),
            attempts: max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let patch = LoginDialogPatch::default();
        assert_eq!(patch.dialog_id, "login");
        assert_eq!(patch.size, Size::new(480, 640));
        assert_eq!(patch.max_attempts, 50);
    }
}
