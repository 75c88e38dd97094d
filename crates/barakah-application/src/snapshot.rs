//! Shared loading/error envelope for store snapshots.

use barakah_core::error::BarakahError;
use serde::{Deserialize, Serialize};

/// The loading/error portion every store snapshot carries.
///
/// The uniform action protocol drives it: an action begins by setting
/// `is_loading` and clearing `error`, then ends by either succeeding (data
/// applied, loading cleared) or failing (error set, data untouched). The
/// `error` field is the sole failure channel the UI observes; nothing is
/// thrown past a store.
///
/// Concurrent invocations of the same action are deliberately not serialized;
/// the UI event loop drives stores one action at a time, and a race would
/// resolve as last-write-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ActionStatus {
    /// Step 1 of the protocol: loading on, previous error cleared.
    pub fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Step 3: the action succeeded.
    pub fn succeed(&mut self) {
        self.is_loading = false;
        self.error = None;
    }

    /// Step 4: the action failed; render the error for the UI.
    pub fn fail(&mut self, err: &BarakahError) {
        self.is_loading = false;
        self.error = Some(err.to_string());
    }
}
