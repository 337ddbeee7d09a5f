use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    /// Rendered question page, built once at startup.
    pub(crate) page: Arc<str>,
}
