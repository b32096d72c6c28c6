use super::ApiOutcome;

#[derive(Debug)]
pub enum Event {
    BackendResponse(ApiOutcome),
    KeyboardCharInput(char),
    KeyboardBackspace,
    KeyboardEnter,
    KeyboardPaste(String),
    KeyboardCTRLC,
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
