use macroquad::math::{Rect, Vec2};
use ui::{
    Alignment, Button, DrawCmd, FlowLayout, Id, Label, LayoutConfig, TextInput, Toggle,
    UiContext, UiError, UiResponse, WidgetHandle,
};

use crate::controls::{Control, SPACING_STEP};

const MARGIN: f32 = 12.0;
const TOOLBAR_HEIGHT: f32 = 44.0;
const STATUS_HEIGHT: f32 = 28.0;

/// Both flow layouts of the demo plus the widgets the user added.
pub struct DemoState {
    pub content: FlowLayout,
    pub toolbar: FlowLayout,
    tools: Vec<(Id, Control)>,
    items: Vec<WidgetHandle>,
    next_item: usize,
}

impl DemoState {
    pub fn new(config: &LayoutConfig) -> Self {
        let mut content = config.build_layout();
        content.add_widget(WidgetHandle::new(Label::new("Flow layout")));
        content.add_widget(WidgetHandle::new(Button::new("Start")));
        content.add_widget(WidgetHandle::new(Button::new("Settings")));
        content.add_widget(WidgetHandle::new(Toggle::new("Sound").with_state(true)));
        content.add_widget(WidgetHandle::new(
            TextInput::new().with_placeholder("Player name").with_max_len(24),
        ));
        content.add_widget(WidgetHandle::new(Button::new("Quit")));

        let mut toolbar = FlowLayout::new(content.direction(), 6.0, Alignment::End);
        let mut tools = Vec::new();
        for control in Control::ALL {
            let button = WidgetHandle::new(Button::new(control.label()));
            tools.push((button.id(), control));
            toolbar.add_widget(button);
        }

        DemoState {
            content,
            toolbar,
            tools,
            items: Vec::new(),
            next_item: 1,
        }
    }

    pub fn apply(&mut self, control: Control) {
        match control {
            Control::AddItem => {
                let item = WidgetHandle::new(Button::new(format!("Item {}", self.next_item)));
                self.next_item += 1;
                self.content.add_widget(item.clone());
                self.items.push(item);
            }
            Control::RemoveItem => {
                let removed = self
                    .items
                    .pop()
                    .is_some_and(|item| self.content.remove_widget(&item));
                if !removed {
                    tracing::info!("no added items left to remove");
                }
            }
            Control::ToggleDirection => {
                self.content.set_direction(self.content.direction().toggled());
            }
            Control::CycleAlignment => {
                self.content.set_alignment(self.content.alignment().next());
            }
            Control::WiderSpacing => {
                self.content.set_spacing(self.content.spacing() + SPACING_STEP);
            }
            Control::NarrowerSpacing => {
                self.content.set_spacing(self.content.spacing() - SPACING_STEP);
            }
        }
        tracing::info!(
            ?control,
            direction = ?self.content.direction(),
            alignment = ?self.content.alignment(),
            spacing = self.content.spacing(),
            widgets = self.content.widgets().len(),
            "applied control"
        );
    }

    fn control_for(&self, id: Id) -> Option<Control> {
        self.tools
            .iter()
            .find(|(tool, _)| *tool == id)
            .map(|&(_, control)| control)
    }

    fn status(&self) -> String {
        format!(
            "{:?} / {:?} / spacing {}  -  {} widgets",
            self.content.direction(),
            self.content.alignment(),
            self.content.spacing(),
            self.content.widgets().len(),
        )
    }
}

/// Demo screen: toolbar on top, content panel below, status line at the bottom.
/// Returns the controls clicked on the toolbar this frame.
pub fn draw(
    ctx: &mut UiContext,
    state: &DemoState,
    width: f32,
    height: f32,
) -> Result<Vec<Control>, UiError> {
    let inner_width = (width - 2.0 * MARGIN).max(0.0);

    let toolbar_area = Rect::new(MARGIN, MARGIN, inner_width, TOOLBAR_HEIGHT);
    let mut toolbar = ctx.child_region(Id::from_name("toolbar"), toolbar_area);
    let clicked = state
        .toolbar
        .update_layout(&mut toolbar, toolbar_area.w, toolbar_area.h)?;
    drop(toolbar);
    let controls = clicked
        .iter()
        .filter(|p| p.response == UiResponse::Clicked)
        .filter_map(|p| state.control_for(p.widget))
        .collect();

    let panel = Rect::new(
        MARGIN,
        toolbar_area.y + TOOLBAR_HEIGHT + MARGIN,
        inner_width,
        (height - TOOLBAR_HEIGHT - STATUS_HEIGHT - 3.0 * MARGIN).max(0.0),
    );
    ctx.push_cmd(DrawCmd::Rect {
        rect: panel,
        color: ctx.theme.panel_bg,
    });
    ctx.push_cmd(DrawCmd::RectLines {
        rect: panel,
        thickness: 1.0,
        color: ctx.theme.panel_border,
    });
    {
        let mut content = ctx.child_region(Id::from_name("content"), panel);
        for placement in state.content.update_layout(&mut content, panel.w, panel.h)? {
            if placement.response != UiResponse::None {
                tracing::info!(
                    widget = %placement.widget,
                    response = ?placement.response,
                    "widget interaction"
                );
            }
        }
    }

    ctx.push_cmd(DrawCmd::Text {
        text: state.status(),
        pos: Vec2::new(MARGIN, height - MARGIN),
        font_size: ctx.font_size,
        color: ctx.theme.text_color,
    });

    Ok(controls)
}
