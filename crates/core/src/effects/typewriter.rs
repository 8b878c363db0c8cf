use portfolio_fx_protocol::SharedStr;
use thiserror::Error;

use crate::config::TypewriterConfig;
use crate::model::{TypeMode, TypewriterState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypewriterError {
    #[error("typewriter needs at least one phrase")]
    NoPhrases,
}

/// Outcome of one typewriter transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    /// New subtitle text, or `None` when the transition only changed mode.
    pub text: Option<SharedStr>,
    /// Delay before the next [`Typewriter::step`].
    pub delay_ms: u32,
}

/// Types and deletes a cycle of phrases one character at a time.
///
/// Each call to [`step`](Self::step) performs exactly one transition and
/// says how long to wait before the next; the host owns the timer chain.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<SharedStr>,
    state: TypewriterState,
    start_delay_ms: u32,
    type_delay_ms: u32,
    delete_delay_ms: u32,
    read_pause_ms: u32,
    next_phrase_pause_ms: u32,
}

impl Typewriter {
    pub fn new(config: &TypewriterConfig) -> Result<Self, TypewriterError> {
        if config.phrases.is_empty() {
            return Err(TypewriterError::NoPhrases);
        }
        Ok(Self {
            phrases: config.phrases.iter().map(|p| SharedStr::from(p.as_str())).collect(),
            state: TypewriterState::default(),
            start_delay_ms: config.start_delay_ms,
            type_delay_ms: config.type_delay_ms,
            delete_delay_ms: config.delete_delay_ms,
            read_pause_ms: config.read_pause_ms,
            next_phrase_pause_ms: config.next_phrase_pause_ms,
        })
    }

    /// Delay before the very first step.
    pub fn start_delay_ms(&self) -> u32 {
        self.start_delay_ms
    }

    pub fn state(&self) -> TypewriterState {
        self.state
    }

    pub fn current_phrase(&self) -> &SharedStr {
        &self.phrases[self.state.phrase_index]
    }

    /// Text currently on screen.
    pub fn visible_text(&self) -> &str {
        self.current_phrase().char_prefix(self.state.cursor)
    }

    pub fn step(&mut self) -> Tick {
        let len = self.current_phrase().char_len();
        let state = &mut self.state;
        match state.mode {
            TypeMode::Typing if state.cursor < len => {
                state.cursor += 1;
                self.render(self.type_delay_ms)
            }
            TypeMode::Typing => {
                state.mode = TypeMode::Deleting;
                Tick {
                    text: None,
                    delay_ms: self.read_pause_ms,
                }
            }
            TypeMode::Deleting if state.cursor > 0 => {
                state.cursor -= 1;
                self.render(self.delete_delay_ms)
            }
            TypeMode::Deleting => {
                state.mode = TypeMode::Typing;
                state.phrase_index = (state.phrase_index + 1) % self.phrases.len();
                tracing::trace!(phrase = state.phrase_index, "typewriter advanced");
                Tick {
                    text: None,
                    delay_ms: self.next_phrase_pause_ms,
                }
            }
        }
    }

    fn render(&self, delay_ms: u32) -> Tick {
        Tick {
            text: Some(SharedStr::from(self.visible_text())),
            delay_ms,
        }
    }
}
