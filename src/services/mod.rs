pub mod debounce;
pub mod session;

pub use debounce::Debouncer;
pub use session::{ControllerState, PreviewMode, SessionService, SettingsUpdate, SourceInfo};
