use macroquad::math::{Rect, Vec2};
use ui::{
    Alignment, Button, Direction, FlowLayout, Placement, TextInput, UiContext, UiError,
    UiResponse, Widget, WidgetHandle,
};

/// Widget with a fixed preferred size that draws nothing.
struct Block(Vec2);

impl Widget for Block {
    fn preferred_size(&self, _ctx: &UiContext) -> Vec2 {
        self.0
    }

    fn ui(&mut self, _ctx: &mut UiContext, _area: Rect) -> Result<UiResponse, UiError> {
        Ok(UiResponse::None)
    }
}

fn blocks(layout: &mut FlowLayout, sizes: &[(f32, f32)]) -> Vec<WidgetHandle> {
    sizes
        .iter()
        .map(|&(w, h)| {
            let handle = WidgetHandle::new(Block(Vec2::new(w, h)));
            layout.add_widget(handle.clone());
            handle
        })
        .collect()
}

fn rects(placements: &[Placement]) -> Vec<Rect> {
    placements.iter().map(|p| p.rect).collect()
}

fn transpose(r: Rect) -> Rect {
    Rect::new(r.y, r.x, r.h, r.w)
}

#[test]
fn test_constructor_defaults() {
    let layout = FlowLayout::default();
    assert_eq!(layout.direction(), Direction::Horizontal);
    assert_eq!(layout.spacing(), 5.0);
    assert_eq!(layout.alignment(), Alignment::Start);
    assert!(layout.widgets().is_empty());

    let custom = FlowLayout::new(Direction::Vertical, 10.0, Alignment::Center);
    assert_eq!(custom.direction(), Direction::Vertical);
    assert_eq!(custom.spacing(), 10.0);
    assert_eq!(custom.alignment(), Alignment::Center);
}

#[test]
fn test_add_and_remove_widgets() {
    let mut layout = FlowLayout::default();
    let b1 = WidgetHandle::new(Button::new("B1"));
    let b2 = WidgetHandle::new(Button::new("B2"));

    layout.add_widget(b1.clone());
    assert_eq!(layout.widgets().len(), 1);
    layout.add_widget(b2.clone());
    assert_eq!(layout.widgets().len(), 2);

    assert!(layout.remove_widget(&b1));
    assert_eq!(layout.widgets().len(), 1);
    assert!(!layout.remove_widget(&b1));
    assert_eq!(layout.widgets().len(), 1);
}

#[test]
fn test_removed_widget_outlives_layout() {
    let mut layout = FlowLayout::default();
    let input = WidgetHandle::new(TextInput::new());
    layout.add_widget(input.clone());
    assert!(layout.remove_widget(&input));
    drop(layout);

    let ctx = UiContext::new();
    assert!(input.preferred_size(&ctx).x > 0.0);
}

#[test]
fn test_horizontal_wrap() {
    let mut layout = FlowLayout::new(Direction::Horizontal, 0.0, Alignment::Start);
    let handles = blocks(&mut layout, &[(100.0, 50.0); 3]);

    let mut ctx = UiContext::new();
    let placements = layout.update_layout(&mut ctx, 250.0, 300.0).unwrap();

    assert_eq!(
        rects(&placements),
        vec![
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(100.0, 0.0, 100.0, 50.0),
            Rect::new(0.0, 50.0, 100.0, 50.0),
        ]
    );
    let ids: Vec<_> = placements.iter().map(|p| p.widget).collect();
    assert_eq!(ids, handles.iter().map(|h| h.id()).collect::<Vec<_>>());
}

#[test]
fn test_center_alignment() {
    let mut layout = FlowLayout::new(Direction::Horizontal, 0.0, Alignment::Center);
    blocks(&mut layout, &[(100.0, 20.0), (100.0, 20.0)]);

    let mut ctx = UiContext::new();
    let placements = layout.update_layout(&mut ctx, 300.0, 100.0).unwrap();

    assert_eq!(placements[0].rect.x, 50.0);
    assert_eq!(placements[1].rect.x, 150.0);
}

#[test]
fn test_end_alignment_per_row() {
    let mut layout = FlowLayout::new(Direction::Horizontal, 10.0, Alignment::End);
    blocks(&mut layout, &[(100.0, 20.0), (100.0, 20.0), (60.0, 20.0)]);

    let mut ctx = UiContext::new();
    let placements = layout.update_layout(&mut ctx, 250.0, 100.0).unwrap();

    // row 1 spans 210, row 2 spans 60
    assert_eq!(placements[0].rect.x, 40.0);
    assert_eq!(placements[1].rect.x, 150.0);
    assert_eq!(placements[2].rect, Rect::new(190.0, 30.0, 60.0, 20.0));
}

#[test]
fn test_vertical_is_transpose_of_horizontal() {
    let sizes = [(100.0, 50.0), (80.0, 30.0), (120.0, 60.0), (40.0, 70.0)];
    let swapped: Vec<(f32, f32)> = sizes.iter().map(|&(w, h)| (h, w)).collect();

    for alignment in [Alignment::Start, Alignment::Center, Alignment::End] {
        let mut horizontal = FlowLayout::new(Direction::Horizontal, 7.0, alignment);
        blocks(&mut horizontal, &sizes);
        let mut vertical = FlowLayout::new(Direction::Vertical, 7.0, alignment);
        blocks(&mut vertical, &swapped);

        let mut ctx = UiContext::new();
        let h = layout_rects(&horizontal, &mut ctx, 250.0, 300.0);
        let v = layout_rects(&vertical, &mut ctx, 300.0, 250.0);

        assert_eq!(v, h.into_iter().map(transpose).collect::<Vec<_>>());
    }
}

fn layout_rects(layout: &FlowLayout, ctx: &mut UiContext, w: f32, h: f32) -> Vec<Rect> {
    rects(&layout.update_layout(ctx, w, h).unwrap())
}

#[test]
fn test_oversized_widget_is_placed_not_dropped() {
    let mut layout = FlowLayout::new(Direction::Horizontal, 5.0, Alignment::Start);
    blocks(&mut layout, &[(400.0, 30.0), (50.0, 30.0)]);

    let mut ctx = UiContext::new();
    let placements = layout.update_layout(&mut ctx, 250.0, 300.0).unwrap();

    assert_eq!(placements.len(), 2);
    assert_eq!(placements[0].rect, Rect::new(0.0, 0.0, 400.0, 30.0));
    assert_eq!(placements[1].rect, Rect::new(0.0, 35.0, 50.0, 30.0));
}

#[test]
fn test_settings_changes_leave_no_residual_state() {
    let mut layout = FlowLayout::new(Direction::Horizontal, 5.0, Alignment::Start);
    blocks(&mut layout, &[(60.0, 20.0), (80.0, 40.0), (30.0, 10.0), (90.0, 25.0)]);
    let mut ctx = UiContext::new();

    let first = layout_rects(&layout, &mut ctx, 160.0, 120.0);
    assert_eq!(first, layout_rects(&layout, &mut ctx, 160.0, 120.0));

    layout.set_direction(Direction::Vertical);
    layout.set_alignment(Alignment::End);
    let vertical = layout_rects(&layout, &mut ctx, 160.0, 120.0);
    assert_ne!(first, vertical);

    let mut fresh = FlowLayout::new(Direction::Vertical, 5.0, Alignment::End);
    for handle in layout.widgets() {
        fresh.add_widget(handle.clone());
    }
    assert_eq!(vertical, layout_rects(&fresh, &mut ctx, 160.0, 120.0));

    layout.set_direction(Direction::Horizontal);
    layout.set_alignment(Alignment::Start);
    assert_eq!(first, layout_rects(&layout, &mut ctx, 160.0, 120.0));
}

#[test]
fn test_degenerate_inputs_do_not_fail() {
    let mut layout = FlowLayout::default();
    let mut ctx = UiContext::new();
    assert!(layout.update_layout(&mut ctx, 0.0, 0.0).unwrap().is_empty());

    blocks(&mut layout, &[(10.0, 10.0), (0.0, 0.0), (20.0, 5.0)]);
    for (w, h) in [(0.0, 0.0), (-50.0, -50.0), (f32::MAX, f32::MAX)] {
        for direction in [Direction::Horizontal, Direction::Vertical] {
            layout.set_direction(direction);
            let placements = layout.update_layout(&mut ctx, w, h).unwrap();
            assert_eq!(placements.len(), 3);
        }
    }
}

#[test]
fn test_mixed_widget_types() {
    let mut layout = FlowLayout::default();
    layout.add_widget(WidgetHandle::new(Button::new("Button")));
    layout.add_widget(WidgetHandle::new(TextInput::new().with_placeholder("name")));

    let mut ctx = UiContext::new();
    let placements = layout.update_layout(&mut ctx, 400.0, 300.0).unwrap();
    assert_eq!(placements.len(), 2);
    assert!(placements.iter().all(|p| p.line == 0));
    assert!(!ctx.draw_commands().is_empty());
}
