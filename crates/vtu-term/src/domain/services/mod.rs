//! Domain services driving a terminal session.

pub mod actions;
pub mod app_state;
pub mod events;
pub mod interpreter;

pub use actions::BackendService;
pub use app_state::AppState;
pub use events::EventsService;
pub use interpreter::Interpreter;
pub use interpreter::StepOutput;
