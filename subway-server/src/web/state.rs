//! Application state for the web layer.

use crate::service::SubwayService;

/// Shared application state.
#[derive(Clone, Default)]
pub struct AppState {
    /// Station and line registry
    pub subway: SubwayService,
}

impl AppState {
    /// Create a new app state.
    pub fn new(subway: SubwayService) -> Self {
        Self { subway }
    }
}
