//! Minipanel demo - the mini panel on an empty 800x600 screen
//!
//! Main entry point: app setup and a stand-in for the game panels the
//! buttons would open.

use bevy::prelude::*;
use minipanel::{
    DebugLogConfig, HudSettings, MiniPanel, MiniPanelCommand, MiniPanelPlugin, MiniPanelSet, PanelKind,
    PanelSide, PanelStateChanged, PanelStatus, PanelToggleRequest, PointerOverMiniPanel, SETTINGS_FILE,
    SCREEN_HEIGHT, SCREEN_WIDTH, SidePanelChanged,
};
use std::collections::HashSet;
use std::path::Path;

/// Panels the demo pretends are open
#[derive(Resource, Default)]
struct OpenPanels(HashSet<PanelKind>);

impl OpenPanels {
    fn side_open(&self, side: PanelSide) -> bool {
        self.0.iter().any(|p| p.side() == Some(side))
    }
}

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_log = DebugLogConfig::load_with_args(&args);

    // Load persistent settings (uses defaults if file doesn't exist)
    let mut settings = HudSettings::load();

    // Save settings on first run to ensure file exists
    if !Path::new(SETTINGS_FILE).exists()
        && let Err(e) = settings.save()
    {
        eprintln!("Failed to save initial settings: {}", e);
    }
    settings.apply_args(&args);

    let scale = settings.window_scale;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        // Set scale_factor_override to 1.0 so UiScale alone maps the virtual screen
                        resolution: bevy::window::WindowResolution::new(
                            (SCREEN_WIDTH as f32 * scale) as u32,
                            (SCREEN_HEIGHT as f32 * scale) as u32,
                        )
                        .with_scale_factor_override(1.0),
                        title: "Minipanel".into(),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(debug_log.log_plugin()),
        )
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.05)))
        .insert_resource(UiScale(scale))
        .insert_resource(debug_log)
        .insert_resource(settings)
        .add_plugins(MiniPanelPlugin::default())
        .init_resource::<OpenPanels>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (open_when_ready, toggle_demo_panels, log_pointer)
                .chain()
                .after(MiniPanelSet::State),
        )
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Show the panel once its widgets exist
fn open_when_ready(
    mini_panel: Res<MiniPanel>,
    mut opened: Local<bool>,
    mut commands: MessageWriter<MiniPanelCommand>,
) {
    if !*opened && mini_panel.status == PanelStatus::Ready {
        commands.write(MiniPanelCommand::Open);
        *opened = true;
    }
}

/// Pretend to open/close game panels and report back to the mini panel
fn toggle_demo_panels(
    mut requests: MessageReader<PanelToggleRequest>,
    mut open_panels: ResMut<OpenPanels>,
    mut states: MessageWriter<PanelStateChanged>,
    mut sides: MessageWriter<SidePanelChanged>,
) {
    for request in requests.read() {
        let target = request.target;
        let left_before = open_panels.side_open(PanelSide::Left);
        let right_before = open_panels.side_open(PanelSide::Right);

        let open = if open_panels.0.remove(&target) {
            false
        } else {
            // Only one panel per side at a time
            if let Some(side) = target.side() {
                open_panels.0.retain(|p| p.side() != Some(side));
            }
            open_panels.0.insert(target);
            true
        };
        info!("{:?} panel {}", target, if open { "opened" } else { "closed" });

        for kind in PanelKind::ALL {
            states.write(PanelStateChanged {
                target: kind,
                open: open_panels.0.contains(&kind),
            });
        }

        let left_after = open_panels.side_open(PanelSide::Left);
        let right_after = open_panels.side_open(PanelSide::Right);
        if left_before != left_after {
            sides.write(SidePanelChanged {
                side: PanelSide::Left,
                open: left_after,
            });
        }
        if right_before != right_after {
            sides.write(SidePanelChanged {
                side: PanelSide::Right,
                open: right_after,
            });
        }
    }
}

fn log_pointer(over: Res<PointerOverMiniPanel>) {
    if over.is_changed() && !over.is_added() {
        debug!("Pointer over mini panel: {}", over.0);
    }
}
