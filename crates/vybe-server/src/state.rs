//! Application State

use std::sync::Arc;

use vybe_core::Dialog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Dialog engine; owns every user session
    pub dialog: Arc<Dialog>,
}

impl AppState {
    pub fn new(dialog: Dialog) -> Self {
        Self {
            dialog: Arc::new(dialog),
        }
    }
}
