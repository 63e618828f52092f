//! Loading the mini panel sprites and building its widgets

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::layout::{MiniPanelLayout, SheetMetrics};
use super::state::{MiniPanel, PanelStatus};
use crate::constants::*;
use crate::debug_logging::DebugLogConfig;
use crate::error::MiniPanelError;
use crate::settings::HudSettings;
use crate::strings::StringTable;
use crate::widgets::{
    GroupMember, HudButton, RenderPriority, Tooltip, TooltipXAlign, TooltipYAlign, UiPosition,
    WidgetGroup, WidgetRect, WidgetVisible,
};

/// Handles of everything the mini panel draws with
#[derive(Resource, Debug, Clone, Default)]
pub struct MiniPanelAssets {
    pub button_sheet: Handle<Image>,
    pub button_atlas: Handle<TextureAtlasLayout>,
    /// Container variant for the current mode
    pub container: Handle<Image>,
    pub font: Handle<Font>,
}

/// Marker for the container sprite
#[derive(Component)]
pub struct MiniPanelContainer;

/// Request the panel sprites and font
pub fn load_mini_panel_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<HudSettings>,
    mut mini_panel: ResMut<MiniPanel>,
) {
    let assets = MiniPanelAssets {
        button_sheet: asset_server.load(&settings.button_sheet),
        button_atlas: Handle::default(),
        container: asset_server.load(settings.container_path().to_owned()),
        font: asset_server.load(&settings.font),
    };
    info!(
        "Loading mini panel sprites: {} and {}",
        settings.button_sheet,
        settings.container_path()
    );
    commands.insert_resource(assets);
    mini_panel.status = PanelStatus::Loading;
}

/// Metrics from configured defaults, for runs without image assets
pub fn default_metrics(settings: &HudSettings) -> SheetMetrics {
    let defaults = &settings.default_metrics;
    let container = if settings.single_player {
        defaults.container_small
    } else {
        defaults.container
    };
    SheetMetrics {
        button_frame: UVec2::from_array(defaults.button_frame),
        container: UVec2::from_array(container),
        button_frames: (settings.button_sheet_columns * settings.button_sheet_rows) as usize,
    }
}

/// Frame metrics of a loaded button sheet and container
pub fn metrics_from_images(
    sheet: UVec2,
    container: UVec2,
    columns: u32,
    rows: u32,
) -> Result<SheetMetrics, MiniPanelError> {
    if columns == 0 || rows == 0 || sheet.x < columns || sheet.y < rows {
        return Err(MiniPanelError::InvalidFrame {
            sprite: "button sheet".to_string(),
            width: sheet.x / columns.max(1),
            height: sheet.y / rows.max(1),
        });
    }
    Ok(SheetMetrics {
        button_frame: UVec2::new(sheet.x / columns, sheet.y / rows),
        container,
        button_frames: (columns * rows) as usize,
    })
}

fn load_failure(asset_server: &AssetServer, id: impl Into<bevy::asset::UntypedAssetId>, path: &str) -> Option<MiniPanelError> {
    match asset_server.load_state(id) {
        LoadState::Failed(err) => Some(MiniPanelError::AssetLoad {
            path: path.to_string(),
            reason: err.to_string(),
        }),
        _ => None,
    }
}

/// Once both sprites are in memory, derive frame sizes and the button atlas
pub fn resolve_sheet_metrics(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<HudSettings>,
    images: Res<Assets<Image>>,
    mut atlases: ResMut<Assets<TextureAtlasLayout>>,
    mut assets: ResMut<MiniPanelAssets>,
    mut mini_panel: ResMut<MiniPanel>,
) {
    let failure = load_failure(&asset_server, assets.button_sheet.id(), &settings.button_sheet)
        .or_else(|| load_failure(&asset_server, assets.container.id(), settings.container_path()));
    if let Some(err) = failure {
        error!("Mini panel unavailable: {}", err);
        mini_panel.status = PanelStatus::Failed;
        return;
    }

    let (Some(sheet), Some(container)) = (images.get(&assets.button_sheet), images.get(&assets.container)) else {
        return;
    };

    let metrics = match metrics_from_images(
        sheet.size(),
        container.size(),
        settings.button_sheet_columns,
        settings.button_sheet_rows,
    ) {
        Ok(metrics) => metrics,
        Err(err) => {
            error!("Mini panel unavailable: {}", err);
            mini_panel.status = PanelStatus::Failed;
            return;
        }
    };

    assets.button_atlas = atlases.add(TextureAtlasLayout::from_grid(
        metrics.button_frame,
        settings.button_sheet_columns,
        settings.button_sheet_rows,
        None,
        None,
    ));
    debug!(
        "Mini panel metrics: button {}x{}, container {}x{}",
        metrics.button_frame.x, metrics.button_frame.y, metrics.container.x, metrics.container.y
    );
    commands.insert_resource(metrics);
}

fn absolute_node(rect: &WidgetRect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.x as f32),
        top: Val::Px(rect.y as f32),
        width: Val::Px(rect.width as f32),
        height: Val::Px(rect.height as f32),
        ..default()
    }
}

/// Build the container, buttons and tooltips; the panel starts hidden
pub fn create_widgets(
    mut commands: Commands,
    mut mini_panel: ResMut<MiniPanel>,
    metrics: Res<SheetMetrics>,
    assets: Res<MiniPanelAssets>,
    strings: Res<StringTable>,
    debug_log: Option<Res<DebugLogConfig>>,
) {
    let screen = IVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let layout = match MiniPanelLayout::compute(screen, &metrics, mini_panel.is_single_player()) {
        Ok(layout) => layout,
        Err(err) => {
            error!("Mini panel unavailable: {}", err);
            mini_panel.status = PanelStatus::Failed;
            return;
        }
    };
    let log_layout = debug_log.is_some_and(|c| c.log_layout);

    let panel_entity = commands.spawn_empty().id();
    let tooltip_entity = commands.spawn_empty().id();

    let mut panel_group = WidgetGroup::new(RenderPriority::Minipanel);
    panel_group.set_position(MINI_PANEL_X, MINI_PANEL_Y);
    let mut tooltip_group = WidgetGroup::new(RenderPriority::Foreground);

    let panel_z = GlobalZIndex(panel_group.priority().z_index());
    let tooltip_z = GlobalZIndex(tooltip_group.priority().z_index());

    let container = commands
        .spawn((
            Name::new("MiniPanelContainer"),
            MiniPanelContainer,
            ImageNode::new(assets.container.clone()),
            absolute_node(&layout.container),
            UiPosition::new(layout.container.x, layout.container.y),
            GroupMember(panel_entity),
            panel_z,
            Visibility::Hidden,
        ))
        .id();
    panel_group.add_widget(container, layout.container);

    for slot in &layout.buttons {
        let kind = slot.content.kind;
        let text = strings.translate(slot.content.tooltip_key).to_string();
        if log_layout {
            debug!(
                "{:?} at slot {} ({}, {}), tooltip at ({}, {}): {}",
                kind, slot.slot, slot.rect.x, slot.rect.y, slot.tooltip_origin.x, slot.tooltip_origin.y, text
            );
        }

        let tooltip = commands
            .spawn((
                Name::new(format!("{:?}Tooltip", kind)),
                Text::new(text),
                TextFont {
                    font: assets.font.clone(),
                    font_size: TOOLTIP_FONT_SIZE,
                    ..default()
                },
                TextColor(TOOLTIP_TEXT),
                BackgroundColor(TOOLTIP_BACKGROUND),
                Node {
                    position_type: PositionType::Absolute,
                    padding: UiRect::all(Val::Px(TOOLTIP_PADDING)),
                    ..default()
                },
                Tooltip::new(slot.content.tooltip_key, TooltipXAlign::Center, TooltipYAlign::Top)
                    .at(slot.tooltip_origin.x, slot.tooltip_origin.y),
                WidgetVisible(false),
                GroupMember(tooltip_entity),
                tooltip_z,
                Visibility::Hidden,
            ))
            .id();
        tooltip_group.add_widget(
            tooltip,
            WidgetRect::new(slot.tooltip_origin.x, slot.tooltip_origin.y, 0, 0),
        );

        let button = commands
            .spawn((
                Name::new(format!("{:?}", kind)),
                Button,
                ImageNode::from_atlas_image(
                    assets.button_sheet.clone(),
                    TextureAtlas {
                        layout: assets.button_atlas.clone(),
                        index: kind.layout().base_frame,
                    },
                ),
                absolute_node(&slot.rect),
                UiPosition::new(slot.rect.x, slot.rect.y),
                HudButton::new(kind).with_tooltip(tooltip),
                GroupMember(panel_entity),
                panel_z,
                Visibility::Hidden,
            ))
            .id();
        panel_group.add_widget(button, slot.rect);
    }

    panel_group.set_visible(false);

    commands
        .entity(panel_entity)
        .insert((Name::new("MiniPanelGroup"), panel_group));
    commands
        .entity(tooltip_entity)
        .insert((Name::new("MiniPanelTooltips"), tooltip_group));

    mini_panel.panel_group = Some(panel_entity);
    mini_panel.tooltip_group = Some(tooltip_entity);
    mini_panel.status = PanelStatus::Ready;
    info!(
        "Mini panel ready: {} buttons ({})",
        layout.buttons.len(),
        if mini_panel.is_single_player() { "single player" } else { "multiplayer" }
    );
}
