use macroquad::prelude::*;

/// Spacing change per key press / toolbar click.
pub const SPACING_STEP: f32 = 5.0;

/// Everything the user can change about the demo layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AddItem,
    RemoveItem,
    ToggleDirection,
    CycleAlignment,
    WiderSpacing,
    NarrowerSpacing,
}

impl Control {
    pub const ALL: [Control; 6] = [
        Control::AddItem,
        Control::RemoveItem,
        Control::ToggleDirection,
        Control::CycleAlignment,
        Control::WiderSpacing,
        Control::NarrowerSpacing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::AddItem => "Add",
            Control::RemoveItem => "Remove",
            Control::ToggleDirection => "Direction",
            Control::CycleAlignment => "Align",
            Control::WiderSpacing => "Spacing +",
            Control::NarrowerSpacing => "Spacing -",
        }
    }

    fn key(self) -> KeyCode {
        match self {
            Control::AddItem => KeyCode::Insert,
            Control::RemoveItem => KeyCode::Delete,
            Control::ToggleDirection => KeyCode::F1,
            Control::CycleAlignment => KeyCode::F2,
            Control::WiderSpacing => KeyCode::PageUp,
            Control::NarrowerSpacing => KeyCode::PageDown,
        }
    }
}

/// Controls whose key went down this frame. None of these keys produce
/// characters, so they never reach a focused text input.
pub fn from_keys() -> Vec<Control> {
    Control::ALL
        .into_iter()
        .filter(|control| is_key_pressed(control.key()))
        .collect()
}
