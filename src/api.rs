//! HTTP API for the Python tutor page
//!
//! One conversation lives behind these routes. Handlers read and mutate it
//! under the session lock; the chat handler runs the full completion cycle.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::llm::CompletionClient;
use crate::session::{Session, SharedSession};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub client: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            client,
        }
    }
}
