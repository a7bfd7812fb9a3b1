use crate::models::Member;
use std::sync::Arc;

/// Read-only snapshot shared by every handler. Nothing mutates it after startup.
#[derive(Clone)]
pub struct AppState {
    pub members: Arc<Vec<Member>>,
    pub trend_window: usize,
}

impl AppState {
    pub fn new(members: Vec<Member>, trend_window: usize) -> Self {
        Self {
            members: Arc::new(members),
            trend_window,
        }
    }
}
