use std::sync::Arc;

use crate::models::CharacterTable;
use crate::storage::JsonlMatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<JsonlMatchStore>,
    pub characters: Arc<CharacterTable>,
    pub set_window: usize,
}
