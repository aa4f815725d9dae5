mod controls;
mod demo;

use macroquad::window::{Conf, clear_background, next_frame, screen_height, screen_width};
use tracing_subscriber::EnvFilter;
use ui::{LayoutConfig, UiContext};

use crate::demo::DemoState;

const SCREEN_WIDTH: f32 = 640.0;
const SCREEN_HEIGHT: f32 = 360.0;
const LAYOUT_NAME: &str = "showcase";

const SCALE: f32 = 1.0;
const FULLSCREEN: bool = false;

fn window_conf() -> Conf {
    Conf {
        window_title: "Flow layout".to_owned(),
        window_width: (SCREEN_WIDTH * SCALE) as i32,
        window_height: (SCREEN_HEIGHT * SCALE) as i32,
        high_dpi: false,
        fullscreen: FULLSCREEN,
        sample_count: 1,
        window_resizable: true,
        icon: None,
        platform: Default::default(),
    }
}

fn load_config() -> LayoutConfig {
    let project_root = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/layouts/{}.json", project_root, LAYOUT_NAME);
    LayoutConfig::load(&path).unwrap_or_else(|err| {
        tracing::warn!(%err, "using default layout config");
        LayoutConfig::default()
    })
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    tracing::info!("Starting flow layout demo");

    let config = load_config();
    let mut ui = UiContext::new();
    config.apply(&mut ui);
    let mut state = DemoState::new(&config);

    loop {
        for control in controls::from_keys() {
            state.apply(control);
        }

        clear_background(ui.theme.window_bg);

        ui.begin_frame();
        match demo::draw(&mut ui, &state, screen_width(), screen_height()) {
            Ok(clicked) => {
                for control in clicked {
                    state.apply(control);
                }
            }
            Err(err) => tracing::error!(%err, "layout pass failed"),
        }
        ui.end_frame();

        next_frame().await;
    }
}
