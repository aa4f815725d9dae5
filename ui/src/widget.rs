use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::Rc;

use crate::context::{DrawCmd, Id, UiContext};
use crate::error::UiError;
use macroquad::math::{Rect, Vec2};

/// Response from widget interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiResponse {
    None,
    Clicked,
    Changed,
}

/// Trait every UI widget implements.
pub trait Widget {
    /// Size the widget would like to occupy. Called during layout, so keep it cheap.
    fn preferred_size(&self, ctx: &UiContext) -> Vec2;

    /// Handle input, update UI state, and record draw commands into `area`.
    fn ui(&mut self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError>;
}

/// Shared, non-owning-for-lifecycle handle to a widget.
///
/// Clones point at the same widget. Two handles are equal only when they
/// point at the same allocation, never because the widgets look alike.
#[derive(Clone)]
pub struct WidgetHandle {
    widget: Rc<RefCell<dyn Widget>>,
}

impl WidgetHandle {
    pub fn new<W: Widget + 'static>(widget: W) -> Self {
        WidgetHandle {
            widget: Rc::new(RefCell::new(widget)),
        }
    }

    /// Identity derived from the widget's address; stable for as long as the
    /// widget is alive, whichever handle it is read through.
    pub fn id(&self) -> Id {
        Id::from_addr(Rc::as_ptr(&self.widget).cast::<()>() as usize)
    }

    pub fn preferred_size(&self, ctx: &UiContext) -> Vec2 {
        self.widget.borrow().preferred_size(ctx)
    }

    pub fn ui(&self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError> {
        self.widget.borrow_mut().ui(ctx, area)
    }
}

impl<W: Widget + 'static> From<Rc<RefCell<W>>> for WidgetHandle {
    fn from(widget: Rc<RefCell<W>>) -> Self {
        WidgetHandle { widget }
    }
}

impl PartialEq for WidgetHandle {
    fn eq(&self, other: &Self) -> bool {
        ptr::addr_eq(Rc::as_ptr(&self.widget), Rc::as_ptr(&other.widget))
    }
}

impl Eq for WidgetHandle {}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetHandle").field(&self.id()).finish()
    }
}

/// Rough text width; widgets size themselves before any font is loaded.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}

/// Simple text label.
#[derive(Debug, Clone)]
pub struct Label {
    pub text: String,
}

impl Label {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Label { text: text.into() }
    }
}

impl Widget for Label {
    fn preferred_size(&self, ctx: &UiContext) -> Vec2 {
        Vec2::new(text_width(&self.text, ctx.font_size), ctx.font_size * 1.5)
    }

    fn ui(&mut self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError> {
        ctx.push_cmd(DrawCmd::Text {
            text: self.text.clone(),
            pos: Vec2::new(area.x, area.y + ctx.font_size),
            font_size: ctx.font_size,
            color: ctx.theme.text_color,
        });
        Ok(UiResponse::None)
    }
}

const BUTTON_PADDING: Vec2 = Vec2::new(12.0, 8.0);

/// A clickable button with a label and optional callback.
pub struct Button {
    pub label: String,
    pub on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new<T: Into<String>>(label: T) -> Self {
        Button {
            label: label.into(),
            on_click: None,
        }
    }

    pub fn with_callback<F: 'static + FnMut()>(mut self, cb: F) -> Self {
        self.on_click = Some(Box::new(cb));
        self
    }
}

// Custom Debug impl omits callback
impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .finish()
    }
}

impl Widget for Button {
    fn preferred_size(&self, ctx: &UiContext) -> Vec2 {
        Vec2::new(
            text_width(&self.label, ctx.font_size) + 2.0 * BUTTON_PADDING.x,
            ctx.font_size + 2.0 * BUTTON_PADDING.y,
        )
    }

    fn ui(&mut self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError> {
        let hovered = ctx.is_hovered(area);
        let bg = if hovered {
            ctx.theme.button_hover_bg
        } else {
            ctx.theme.button_bg
        };
        ctx.push_cmd(DrawCmd::Rect {
            rect: area,
            color: bg,
        });

        // center text within button
        let text_w = text_width(&self.label, ctx.font_size);
        let text_h = ctx.font_size;
        let pos = Vec2::new(
            area.x + (area.w - text_w) / 2.0,
            area.y + (area.h + text_h) / 2.0,
        );
        ctx.push_cmd(DrawCmd::Text {
            text: self.label.clone(),
            pos,
            font_size: ctx.font_size,
            color: ctx.theme.text_color,
        });

        if hovered && ctx.mouse_down {
            if let Some(cb) = &mut self.on_click {
                cb();
            }
            return Ok(UiResponse::Clicked);
        }
        Ok(UiResponse::None)
    }
}

const TOGGLE_WIDTH: f32 = 40.0;
const TOGGLE_HEIGHT: f32 = 20.0;
const TOGGLE_PADDING: f32 = 8.0;

/// A toggle switch that can be either on or off.
pub struct Toggle {
    pub is_on: bool,
    pub label: String,
    pub on_change: Option<Box<dyn FnMut(bool)>>,
}

impl Toggle {
    pub fn new<T: Into<String>>(label: T) -> Self {
        Toggle {
            label: label.into(),
            is_on: false,
            on_change: None,
        }
    }

    pub fn with_state(mut self, initial_state: bool) -> Self {
        self.is_on = initial_state;
        self
    }

    pub fn with_callback<F: 'static + FnMut(bool)>(mut self, cb: F) -> Self {
        self.on_change = Some(Box::new(cb));
        self
    }
}

// Custom Debug impl omits callback
impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("is_on", &self.is_on)
            .field("label", &self.label)
            .finish()
    }
}

impl Widget for Toggle {
    fn preferred_size(&self, ctx: &UiContext) -> Vec2 {
        Vec2::new(
            text_width(&self.label, ctx.font_size) + TOGGLE_PADDING + TOGGLE_WIDTH,
            ctx.font_size.max(TOGGLE_HEIGHT) + TOGGLE_PADDING,
        )
    }

    fn ui(&mut self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError> {
        ctx.push_cmd(DrawCmd::Text {
            text: self.label.clone(),
            pos: Vec2::new(area.x, area.y + ctx.font_size),
            font_size: ctx.font_size,
            color: ctx.theme.text_color,
        });

        // switch sits at the right edge of the area
        let switch = Rect::new(
            area.x + area.w - TOGGLE_WIDTH,
            area.y + (area.h - TOGGLE_HEIGHT) / 2.0,
            TOGGLE_WIDTH,
            TOGGLE_HEIGHT,
        );
        let bg_color = if self.is_on {
            ctx.theme.button_hover_bg
        } else {
            ctx.theme.button_bg
        };
        ctx.push_cmd(DrawCmd::Rect {
            rect: switch,
            color: bg_color,
        });

        let knob_size = TOGGLE_HEIGHT - TOGGLE_PADDING;
        let knob_x = if self.is_on {
            switch.x + TOGGLE_WIDTH - knob_size - TOGGLE_PADDING / 2.0
        } else {
            switch.x + TOGGLE_PADDING / 2.0
        };
        ctx.push_cmd(DrawCmd::Rect {
            rect: Rect::new(knob_x, switch.y + TOGGLE_PADDING / 2.0, knob_size, knob_size),
            color: ctx.theme.text_color,
        });

        if ctx.mouse_down && ctx.is_hovered(switch) {
            self.is_on = !self.is_on;
            if let Some(cb) = &mut self.on_change {
                cb(self.is_on);
            }
            return Ok(UiResponse::Clicked);
        }
        Ok(UiResponse::None)
    }
}

const INPUT_PADDING: f32 = 6.0;

/// Single-line text field. Click to focus, click elsewhere to blur.
#[derive(Debug, Clone)]
pub struct TextInput {
    pub text: String,
    pub placeholder: String,
    /// Width in characters.
    pub columns: usize,
    pub max_len: Option<usize>,
    pub focused: bool,
}

impl Default for TextInput {
    fn default() -> Self {
        TextInput {
            text: String::new(),
            placeholder: String::new(),
            columns: 16,
            max_len: None,
            focused: false,
        }
    }
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder<T: Into<String>>(mut self, placeholder: T) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    fn edit(&mut self, typed: &[char], backspace: bool) -> bool {
        let before = self.text.clone();
        if backspace {
            self.text.pop();
        }
        for &c in typed {
            if self
                .max_len
                .is_some_and(|max| self.text.chars().count() >= max)
            {
                break;
            }
            self.text.push(c);
        }
        self.text != before
    }
}

impl Widget for TextInput {
    fn preferred_size(&self, ctx: &UiContext) -> Vec2 {
        Vec2::new(
            self.columns as f32 * ctx.font_size * 0.5 + 2.0 * INPUT_PADDING,
            ctx.font_size + 2.0 * INPUT_PADDING,
        )
    }

    fn ui(&mut self, ctx: &mut UiContext, area: Rect) -> Result<UiResponse, UiError> {
        if ctx.mouse_down {
            self.focused = ctx.is_hovered(area);
        }
        let changed = self.focused && self.edit(&ctx.typed, ctx.backspace);

        ctx.push_cmd(DrawCmd::Rect {
            rect: area,
            color: ctx.theme.panel_bg,
        });
        let border = if self.focused {
            ctx.theme.focus_border
        } else {
            ctx.theme.panel_border
        };
        ctx.push_cmd(DrawCmd::RectLines {
            rect: area,
            thickness: 1.0,
            color: border,
        });

        let (text, color) = if self.text.is_empty() {
            let mut faded = ctx.theme.text_color;
            faded.a *= 0.5;
            (self.placeholder.clone(), faded)
        } else {
            (self.text.clone(), ctx.theme.text_color)
        };
        ctx.push_cmd(DrawCmd::Text {
            text,
            pos: Vec2::new(
                area.x + INPUT_PADDING,
                area.y + (area.h + ctx.font_size) / 2.0,
            ),
            font_size: ctx.font_size,
            color,
        });

        Ok(if changed {
            UiResponse::Changed
        } else {
            UiResponse::None
        })
    }
}
