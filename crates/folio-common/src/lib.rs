pub mod errors;
pub mod events;
pub mod types;

pub use errors::{ConfigError, ContactError, FolioError, RenderError};
pub use events::{Event, EventBus};
pub use types::{AccentColor, BackgroundEffect, Color, ThemeMode, ThemeState, Viewport};

pub type Result<T> = std::result::Result<T, FolioError>;
