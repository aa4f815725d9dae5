pub mod config;
pub mod context;
pub mod error;
pub mod layout;
pub mod style;
pub mod widget;

// Re-export the core UI pieces for ergonomic imports:
pub use config::LayoutConfig;
pub use context::{DrawCmd, FrameInput, Id, Region, UiContext};
pub use error::UiError;
pub use layout::{Alignment, Direction, FlowLayout, Placement};
pub use style::{RgbaColor, Theme, ThemeOverrides};
pub use widget::{Button, Label, TextInput, Toggle, UiResponse, Widget, WidgetHandle};
