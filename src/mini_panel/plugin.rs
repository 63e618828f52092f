//! Mini panel plugin: resources, messages and system ordering

use bevy::prelude::*;

use super::actions::{
    MiniPanelCommand, PanelStateChanged, PanelToggleRequest, SidePanelChanged, apply_panel_commands,
    apply_panel_state, apply_side_panel_changes, forward_button_activations,
};
use super::layout::SheetMetrics;
use super::spawn::{MiniPanelAssets, create_widgets, default_metrics, load_mini_panel_assets, resolve_sheet_metrics};
use super::state::{MiniPanel, PanelStatus};
use crate::config_watcher::{ConfigWatcher, check_config_changes};
use crate::input::{MiniPanelHotkeys, PointerOverMiniPanel, panel_hotkeys, track_pointer};
use crate::settings::HudSettings;
use crate::strings::StringTable;
use crate::widgets::{
    ButtonActivated, button_interaction, reset_hidden_buttons, position_tooltips, refresh_tooltip_text,
    sync_group_visibility, sync_widget_positions, update_button_frames,
};

/// Update-schedule phases of the mini panel
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MiniPanelSet {
    /// Mouse and keyboard become messages
    Input,
    /// Messages change panel state
    State,
    /// State is mirrored into bevy_ui nodes
    Sync,
}

/// Adds the mini panel to an app.
///
/// Reads `HudSettings` if it was inserted before the plugin, defaults otherwise.
pub struct MiniPanelPlugin {
    /// Load sprites through the asset server; without it the configured
    /// default metrics are used and no images are drawn
    pub load_assets: bool,
}

impl Default for MiniPanelPlugin {
    fn default() -> Self {
        Self { load_assets: true }
    }
}

impl MiniPanelPlugin {
    pub fn headless() -> Self {
        Self { load_assets: false }
    }
}

fn panel_loading(mini_panel: Res<MiniPanel>) -> bool {
    mini_panel.status == PanelStatus::Loading
}

fn panel_ready(mini_panel: Res<MiniPanel>) -> bool {
    mini_panel.status == PanelStatus::Ready
}

/// Startup without the asset server: default handles and configured metrics
fn use_default_metrics(mut commands: Commands, settings: Res<HudSettings>, mut mini_panel: ResMut<MiniPanel>) {
    commands.insert_resource(MiniPanelAssets::default());
    commands.insert_resource(default_metrics(&settings));
    mini_panel.status = PanelStatus::Loading;
}

impl Plugin for MiniPanelPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<HudSettings>()
            .cloned()
            .unwrap_or_default();
        let strings = StringTable::load_from_file(&settings.strings_file);

        app.insert_resource(MiniPanel::new(settings.single_player))
            .insert_resource(MiniPanelHotkeys::from_settings(&settings))
            .insert_resource(ConfigWatcher::from_settings(&settings))
            .insert_resource(strings)
            .insert_resource(settings)
            .init_resource::<PointerOverMiniPanel>()
            .add_message::<ButtonActivated>()
            .add_message::<PanelToggleRequest>()
            .add_message::<MiniPanelCommand>()
            .add_message::<SidePanelChanged>()
            .add_message::<PanelStateChanged>()
            .configure_sets(
                Update,
                (MiniPanelSet::Input, MiniPanelSet::State, MiniPanelSet::Sync).chain(),
            );

        if self.load_assets {
            app.add_systems(Startup, load_mini_panel_assets).add_systems(
                Update,
                resolve_sheet_metrics
                    .run_if(panel_loading.and(not(resource_exists::<SheetMetrics>)))
                    .before(MiniPanelSet::State),
            );
        } else {
            app.add_systems(Startup, use_default_metrics);
        }

        app.add_systems(
            Update,
            (
                button_interaction,
                panel_hotkeys.run_if(resource_exists::<ButtonInput<KeyCode>>),
                track_pointer,
            )
                .in_set(MiniPanelSet::Input),
        )
        .add_systems(
            Update,
            (
                create_widgets.run_if(panel_loading.and(resource_exists::<SheetMetrics>)),
                check_config_changes,
                forward_button_activations,
                apply_panel_commands,
                apply_side_panel_changes,
                apply_panel_state,
                reset_hidden_buttons.run_if(panel_ready),
                refresh_tooltip_text,
            )
                .chain()
                .in_set(MiniPanelSet::State),
        )
        .add_systems(
            Update,
            (
                sync_widget_positions,
                sync_group_visibility,
                position_tooltips,
                update_button_frames,
            )
                .in_set(MiniPanelSet::Sync),
        );
    }
}
