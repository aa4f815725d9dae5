use crate::context::{Id, UiContext};
use crate::error::UiError;
use crate::widget::{UiResponse, WidgetHandle};
use macroquad::math::{Rect, Vec2};
use serde::Deserialize;

/// Axis along which widgets are placed before wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left-to-right, wrapping into rows stacked downwards
    #[default]
    Horizontal,
    /// Top-to-bottom, wrapping into columns stacked rightwards
    Vertical,
}

impl Direction {
    pub fn toggled(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Extent along the flow axis.
    fn main(self, size: Vec2) -> f32 {
        match self {
            Direction::Horizontal => size.x,
            Direction::Vertical => size.y,
        }
    }

    /// Extent along the wrap axis.
    fn cross(self, size: Vec2) -> f32 {
        match self {
            Direction::Horizontal => size.y,
            Direction::Vertical => size.x,
        }
    }

    fn compose(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Direction::Horizontal => Vec2::new(main, cross),
            Direction::Vertical => Vec2::new(cross, main),
        }
    }
}

/// Placement of a completed row/column within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    pub fn next(self) -> Self {
        match self {
            Alignment::Start => Alignment::Center,
            Alignment::Center => Alignment::End,
            Alignment::End => Alignment::Start,
        }
    }

    /// Starting coordinate of a line whose content spans `content` inside `extent`.
    /// Negative when the content overflows and the alignment is not `Start`.
    pub fn offset(self, extent: f32, content: f32) -> f32 {
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => (extent - content) / 2.0,
            Alignment::End => extent - content,
        }
    }
}

/// Where one widget ended up after a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub widget: Id,
    /// Relative to the origin that was current when the layout ran.
    pub rect: Rect,
    /// Index of the row (horizontal) or column (vertical).
    pub line: usize,
    pub response: UiResponse,
}

/// Flow layout: places widgets one after another along `direction`, wrapping
/// to a new row/column when the container is exhausted.
///
/// Widgets in one row share the row's height (one column shares the
/// column's width). The first widget of a line never wraps, so a widget
/// larger than the container still gets placed and overflows.
#[derive(Debug, Clone)]
pub struct FlowLayout {
    direction: Direction,
    spacing: f32,
    alignment: Alignment,
    widgets: Vec<WidgetHandle>,
}

impl Default for FlowLayout {
    fn default() -> Self {
        FlowLayout::new(Direction::Horizontal, 5.0, Alignment::Start)
    }
}

/// A row/column under construction.
struct Line<'a> {
    items: Vec<(&'a WidgetHandle, Vec2)>,
    /// Next free coordinate on the main axis, including trailing spacing.
    cursor: f32,
    /// Largest cross-axis size seen so far.
    cross: f32,
}

impl<'a> Line<'a> {
    fn new() -> Self {
        Line {
            items: Vec::new(),
            cursor: 0.0,
            cross: 0.0,
        }
    }

    fn push(&mut self, widget: &'a WidgetHandle, size: Vec2, direction: Direction, spacing: f32) {
        self.cursor += direction.main(size) + spacing;
        self.cross = self.cross.max(direction.cross(size));
        self.items.push((widget, size));
    }

    /// Start over with `widget` as the only item.
    fn restart(
        &mut self,
        widget: &'a WidgetHandle,
        size: Vec2,
        direction: Direction,
        spacing: f32,
    ) {
        self.items.clear();
        self.cursor = direction.main(size) + spacing;
        self.cross = direction.cross(size);
        self.items.push((widget, size));
    }
}

impl FlowLayout {
    /// Create a flow layout; negative spacing is clamped to zero.
    pub fn new(direction: Direction, spacing: f32, alignment: Alignment) -> Self {
        Self {
            direction,
            spacing: clamp_spacing(spacing),
            alignment,
            widgets: Vec::new(),
        }
    }

    /// Append a widget. `None` is ignored.
    pub fn add_widget(&mut self, widget: impl Into<Option<WidgetHandle>>) {
        if let Some(widget) = widget.into() {
            self.widgets.push(widget);
        }
    }

    /// Remove the first occurrence of `widget` (by identity).
    /// Returns whether anything was removed.
    pub fn remove_widget(&mut self, widget: &WidgetHandle) -> bool {
        match self.widgets.iter().position(|w| w == widget) {
            Some(index) => {
                self.widgets.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = clamp_spacing(spacing);
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn widgets(&self) -> &[WidgetHandle] {
        &self.widgets
    }

    /// Measure, place and render every widget inside a container of the
    /// given size, positioned at the context's current origin.
    ///
    /// Each widget is rendered in its own child region, all of them inside
    /// one group. A widget render error aborts the pass and is returned; the
    /// region and group are closed regardless.
    pub fn update_layout(
        &self,
        ctx: &mut UiContext,
        container_width: f32,
        container_height: f32,
    ) -> Result<Vec<Placement>, UiError> {
        if self.widgets.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            direction = ?self.direction,
            alignment = ?self.alignment,
            widgets = self.widgets.len(),
            container_width,
            container_height,
            "updating flow layout"
        );

        let direction = self.direction;
        let extent = direction.main(Vec2::new(container_width, container_height));
        let mut group = ctx.group();
        let mut placements = Vec::with_capacity(self.widgets.len());
        let mut line = Line::new();
        let mut line_start = 0.0;

        for widget in &self.widgets {
            let size = widget.preferred_size(&group);
            if line.cursor + direction.main(size) > extent && !line.items.is_empty() {
                self.place_line(&mut group, &line, extent, line_start, &mut placements)?;
                line_start += line.cross + self.spacing;
                line.restart(widget, size, direction, self.spacing);
            } else {
                line.push(widget, size, direction, self.spacing);
            }
        }
        if !line.items.is_empty() {
            self.place_line(&mut group, &line, extent, line_start, &mut placements)?;
        }

        Ok(placements)
    }

    /// Align a completed line along the main axis and render its widgets at
    /// `line_start` on the cross axis.
    fn place_line(
        &self,
        ctx: &mut UiContext,
        line: &Line<'_>,
        extent: f32,
        line_start: f32,
        placements: &mut Vec<Placement>,
    ) -> Result<(), UiError> {
        let direction = self.direction;
        let index = placements.last().map_or(0, |p: &Placement| p.line + 1);
        let content = line.cursor - self.spacing;
        let offset = self.alignment.offset(extent, content);
        tracing::trace!(
            line = index,
            items = line.items.len(),
            content,
            offset,
            cross = line.cross,
            "placing flow line"
        );

        let mut main = offset;
        for &(widget, size) in &line.items {
            let pos = direction.compose(main, line_start);
            let stretched = direction.compose(direction.main(size), line.cross);
            let rect = Rect::new(pos.x, pos.y, stretched.x, stretched.y);

            let id = widget.id();
            let mut region = ctx.child_region(id, rect);
            let area = region.area();
            let response = widget.ui(&mut region, area).inspect_err(|err| {
                tracing::debug!(widget = %id, error = %err, "widget render failed");
            })?;

            placements.push(Placement {
                widget: id,
                rect,
                line: index,
                response,
            });
            main += direction.main(size) + self.spacing;
        }
        Ok(())
    }
}

fn clamp_spacing(spacing: f32) -> f32 {
    // f32::max returns the non-NaN operand
    spacing.max(0.0)
}
