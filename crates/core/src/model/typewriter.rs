use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypeMode {
    #[default]
    Typing,
    Deleting,
}

/// Position of the typewriter within its phrase cycle.
///
/// `cursor` counts characters of the current phrase that are on screen and
/// always stays within `0..=len(phrase)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypewriterState {
    pub phrase_index: usize,
    pub cursor: usize,
    pub mode: TypeMode,
}
