use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use crate::style::Theme;
use macroquad::math::Vec2;
use macroquad::prelude::*;
use macroquad::window::get_internal_gl;

/// A drawing command recorded by the UI.  When executed, issues the actual draw calls.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Color,
    },
    RectLines {
        rect: Rect,
        thickness: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        color: Color,
    },
    /// Start clipping to `rect`, already intersected with the enclosing clip.
    PushClip {
        rect: Rect,
    },
    PopClip,
}

impl DrawCmd {
    /// Execute this draw command immediately using macroquad.
    /// `clips` is the stack of clip rects opened by earlier commands.
    pub fn execute(&self, clips: &mut Vec<Rect>) {
        match self {
            DrawCmd::Rect { rect, color } => {
                draw_rectangle(rect.x, rect.y, rect.w, rect.h, *color);
            }
            DrawCmd::RectLines {
                rect,
                thickness,
                color,
            } => {
                draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, *thickness, *color);
            }
            DrawCmd::Text {
                text,
                pos,
                font_size,
                color,
            } => {
                draw_text(text, pos.x, pos.y, *font_size, *color);
            }
            DrawCmd::PushClip { rect } => {
                clips.push(*rect);
                set_scissor(Some(*rect));
            }
            DrawCmd::PopClip => {
                clips.pop();
                set_scissor(clips.last().copied());
            }
        }
    }
}

fn set_scissor(clip: Option<Rect>) {
    let clip = clip.map(|r| (r.x as i32, r.y as i32, r.w as i32, r.h as i32));
    // SAFETY: only reached from `end_frame`, which runs on the main thread
    // inside the macroquad event loop.
    let mut gl = unsafe { get_internal_gl() };
    gl.quad_gl.scissor(clip);
}

/// Opaque identity of a child region.
///
/// Widget handles derive theirs from the widget's address so the same
/// widget keeps the same region across frames; named regions hash a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

impl Id {
    pub fn from_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Id(hasher.finish())
    }

    pub(crate) fn from_addr(addr: usize) -> Self {
        Id(addr as u64)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Input sampled once at the start of a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub mouse_pos: Vec2,
    pub mouse_down: bool,
    pub typed: Vec<char>,
    pub backspace: bool,
}

impl FrameInput {
    /// Sample mouse, keyboard and text input from macroquad.
    pub fn capture() -> Self {
        let (x, y) = mouse_position();
        let mut typed = Vec::new();
        while let Some(c) = get_char_pressed() {
            if !c.is_control() {
                typed.push(c);
            }
        }
        Self {
            mouse_pos: Vec2::new(x, y),
            mouse_down: is_mouse_button_pressed(MouseButton::Left),
            typed,
            backspace: is_key_pressed(KeyCode::Backspace),
        }
    }
}

/// A child region opened during a frame, in absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub id: Id,
    pub rect: Rect,
    /// `rect` intersected with every enclosing region.
    pub clip: Rect,
    pub depth: usize,
}

struct OpenRegion {
    id: Id,
    origin: Vec2,
    clip: Rect,
}

/// The UI context drives all immediate‐mode drawing, input capture, and region bracketing.
pub struct UiContext {
    pub mouse_pos: Vec2,
    pub mouse_down: bool,
    pub typed: Vec<char>,
    pub backspace: bool,
    pub font_size: f32,
    pub theme: Theme,
    draw_commands: Vec<DrawCmd>,
    regions: Vec<Region>,
    previous_regions: Vec<Region>,
    open: Vec<OpenRegion>,
    groups: Vec<usize>,
    last_group_rect: Option<Rect>,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext {
    /// Create a new UI context with default theme, font size, and empty draw list.
    pub fn new() -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            mouse_down: false,
            typed: Vec::new(),
            backspace: false,
            font_size: 16.0,
            theme: Theme::default(),
            draw_commands: Vec::new(),
            regions: Vec::new(),
            previous_regions: Vec::new(),
            open: Vec::new(),
            groups: Vec::new(),
            last_group_rect: None,
        }
    }

    /// Begin a new frame: sample input and clear pending draw commands
    pub fn begin_frame(&mut self) {
        self.begin_frame_with(FrameInput::capture());
    }

    /// Begin a new frame with input sampled by the caller.
    pub fn begin_frame_with(&mut self, input: FrameInput) {
        let FrameInput {
            mouse_pos,
            mouse_down,
            typed,
            backspace,
        } = input;
        self.mouse_pos = mouse_pos;
        self.mouse_down = mouse_down;
        self.typed = typed;
        self.backspace = backspace;

        self.draw_commands.clear();
        self.previous_regions = std::mem::take(&mut self.regions);
        self.open.clear();
        self.groups.clear();
        self.last_group_rect = None;
    }

    /// Record a drawing command (rectangle, text, etc.)
    pub fn push_cmd(&mut self, cmd: DrawCmd) {
        self.draw_commands.push(cmd);
    }

    pub fn draw_commands(&self) -> &[DrawCmd] {
        &self.draw_commands
    }

    /// Flush all recorded draw commands to the screen
    pub fn end_frame(&mut self) {
        let mut clips = Vec::new();
        for cmd in &self.draw_commands {
            cmd.execute(&mut clips);
        }
        if !clips.is_empty() {
            tracing::warn!(open = clips.len(), "frame ended with unbalanced clip regions");
        }
        set_scissor(None);
    }

    /// Absolute origin of the innermost open region.
    pub fn origin(&self) -> Vec2 {
        self.open.last().map_or(Vec2::ZERO, |r| r.origin)
    }

    pub fn current_region(&self) -> Option<Id> {
        self.open.last().map(|r| r.id)
    }

    /// Number of regions currently open.
    pub fn open_regions(&self) -> usize {
        self.open.len()
    }

    /// Open a child region at `rect`, relative to the current origin.
    ///
    /// Drawing inside is clipped to the region; the region closes when the
    /// returned scope is dropped.
    pub fn child_region(&mut self, id: Id, rect: Rect) -> RegionScope<'_> {
        let origin = self.origin();
        let area = Rect::new(origin.x + rect.x, origin.y + rect.y, rect.w, rect.h);
        let clip = match self.open.last() {
            Some(parent) => intersect(parent.clip, area),
            None => area,
        };
        self.regions.push(Region {
            id,
            rect: area,
            clip,
            depth: self.open.len(),
        });
        self.open.push(OpenRegion {
            id,
            origin: Vec2::new(area.x, area.y),
            clip,
        });
        self.push_cmd(DrawCmd::PushClip { rect: clip });
        RegionScope { ctx: self, area }
    }

    fn close_region(&mut self) {
        if self.open.pop().is_some() {
            self.push_cmd(DrawCmd::PopClip);
        }
    }

    /// Open a group; when the scope drops, the bounding box of every region
    /// opened inside it becomes `last_group_rect`.
    pub fn group(&mut self) -> GroupScope<'_> {
        self.groups.push(self.regions.len());
        GroupScope { ctx: self }
    }

    fn close_group(&mut self) {
        if let Some(start) = self.groups.pop() {
            self.last_group_rect = self.regions[start..]
                .iter()
                .map(|r| r.rect)
                .reduce(union);
        }
    }

    pub fn last_group_rect(&self) -> Option<Rect> {
        self.last_group_rect
    }

    /// Regions opened so far this frame, in opening order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Absolute rect of the region `id` opened this frame.
    pub fn region(&self, id: Id) -> Option<Rect> {
        self.regions.iter().find(|r| r.id == id).map(|r| r.rect)
    }

    /// Topmost region of the previous frame whose visible part contains `pos`.
    pub fn hit_test(&self, pos: Vec2) -> Option<Id> {
        self.previous_regions
            .iter()
            .rev()
            .find(|r| r.clip.contains(pos))
            .map(|r| r.id)
    }

    /// Whether the mouse is over `area` and not covered by another region.
    pub fn is_hovered(&self, area: Rect) -> bool {
        if !area.contains(self.mouse_pos) {
            return false;
        }
        match (self.current_region(), self.hit_test(self.mouse_pos)) {
            (Some(current), Some(hit)) => current == hit,
            _ => true,
        }
    }
}

fn intersect(a: Rect, b: Rect) -> Rect {
    let x = a.x.max(b.x);
    let y = a.y.max(b.y);
    let right = (a.x + a.w).min(b.x + b.w);
    let bottom = (a.y + a.h).min(b.y + b.h);
    Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
}

fn union(a: Rect, b: Rect) -> Rect {
    let x = a.x.min(b.x);
    let y = a.y.min(b.y);
    let right = (a.x + a.w).max(b.x + b.w);
    let bottom = (a.y + a.h).max(b.y + b.h);
    Rect::new(x, y, right - x, bottom - y)
}

/// An open child region. Derefs to the context; closes the region on drop.
pub struct RegionScope<'a> {
    ctx: &'a mut UiContext,
    area: Rect,
}

impl RegionScope<'_> {
    /// Absolute rect of this region.
    pub fn area(&self) -> Rect {
        self.area
    }
}

impl Deref for RegionScope<'_> {
    type Target = UiContext;

    fn deref(&self) -> &UiContext {
        self.ctx
    }
}

impl DerefMut for RegionScope<'_> {
    fn deref_mut(&mut self) -> &mut UiContext {
        self.ctx
    }
}

impl Drop for RegionScope<'_> {
    fn drop(&mut self) {
        self.ctx.close_region();
    }
}

/// An open group. Derefs to the context; closes the group on drop.
pub struct GroupScope<'a> {
    ctx: &'a mut UiContext,
}

impl Deref for GroupScope<'_> {
    type Target = UiContext;

    fn deref(&self) -> &UiContext {
        self.ctx
    }
}

impl DerefMut for GroupScope<'_> {
    fn deref_mut(&mut self) -> &mut UiContext {
        self.ctx
    }
}

impl Drop for GroupScope<'_> {
    fn drop(&mut self) {
        self.ctx.close_group();
    }
}
