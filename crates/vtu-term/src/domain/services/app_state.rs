#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use vtu_core::Session;

use super::interpreter::Interpreter;
use super::interpreter::StepOutput;
use crate::domain::models::ApiCall;
use crate::domain::models::Event;
use crate::domain::models::TranscriptLine;

const PAGE_SCROLL: i64 = 10;

/// Mutable state of one terminal session: the transcript, the interpreter,
/// the session store, and the single-line input buffer. While a backend call
/// is outstanding `waiting_for_backend` locks the input, so at most one
/// request is ever in flight.
pub struct AppState {
    pub transcript: Vec<TranscriptLine>,
    pub interpreter: Interpreter,
    pub session: Session,
    pub input: String,
    pub scroll_offset: usize,
    pub waiting_for_backend: bool,
    pub exit_requested: bool,
}

impl AppState {
    pub fn new() -> AppState {
        return AppState {
            transcript: Interpreter::banner(),
            interpreter: Interpreter::new(),
            session: Session::new(),
            input: String::new(),
            scroll_offset: 0,
            waiting_for_backend: false,
            exit_requested: false,
        };
    }

    /// Feeds one event through the session. Returns the backend call to
    /// dispatch, if this event completed a step that issues one.
    pub fn handle_event(&mut self, event: Event) -> Option<ApiCall> {
        match event {
            Event::KeyboardCharInput(c) => {
                if !self.waiting_for_backend {
                    self.input.push(c);
                }
                return None;
            }
            Event::KeyboardBackspace => {
                if !self.waiting_for_backend {
                    self.input.pop();
                }
                return None;
            }
            Event::KeyboardPaste(text) => {
                if !self.waiting_for_backend {
                    self.input
                        .extend(text.chars().filter(|c| !c.is_control()));
                }
                return None;
            }
            Event::KeyboardEnter => {
                if self.waiting_for_backend || self.input.trim().is_empty() {
                    return None;
                }
                let line = std::mem::take(&mut self.input);
                let step = self.interpreter.handle_line(&line, &self.session);
                return self.apply(step);
            }
            Event::BackendResponse(outcome) => {
                self.waiting_for_backend = false;
                let step = self.interpreter.handle_outcome(outcome, &mut self.session);
                return self.apply(step);
            }
            Event::KeyboardCTRLC => {
                self.exit_requested = true;
                return None;
            }
            Event::UIScrollUp => {
                self.scroll_by(1);
                return None;
            }
            Event::UIScrollDown => {
                self.scroll_by(-1);
                return None;
            }
            Event::UIScrollPageUp => {
                self.scroll_by(PAGE_SCROLL);
                return None;
            }
            Event::UIScrollPageDown => {
                self.scroll_by(-PAGE_SCROLL);
                return None;
            }
            Event::UITick => {
                return None;
            }
        }
    }

    fn apply(&mut self, step: StepOutput) -> Option<ApiCall> {
        self.transcript.extend(step.lines);
        if step.clear_transcript {
            self.transcript.clear();
        }
        if step.exit {
            self.exit_requested = true;
        }
        self.scroll_offset = 0;

        if let Some(call) = step.call {
            self.waiting_for_backend = true;
            return Some(call);
        }
        return None;
    }

    // Offset counts lines up from the bottom of the transcript.
    fn scroll_by(&mut self, delta: i64) {
        let next = self.scroll_offset as i64 + delta;
        self.scroll_offset = next.clamp(0, self.transcript.len() as i64) as usize;
    }
}

impl Default for AppState {
    fn default() -> AppState {
        return AppState::new();
    }
}
