//! Headless App Builder
//!
//! Builds a windowless Bevy app with the mini panel plugin, for tests and
//! for exercising the panel without a GPU.

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use std::time::Duration;

use crate::mini_panel::MiniPanelPlugin;
use crate::settings::HudSettings;

/// Builder for creating headless Bevy apps
pub struct HeadlessAppBuilder {
    settings: HudSettings,
    fps: f32,
}

impl Default for HeadlessAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAppBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            settings: HudSettings::default(),
            fps: 60.0,
        }
    }

    pub fn single_player(mut self, single_player: bool) -> Self {
        self.settings.single_player = single_player;
        self
    }

    pub fn with_settings(mut self, settings: HudSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the target FPS (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Build the app with minimal plugins, keyboard input and the mini panel
    pub fn build(self) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(
            Duration::from_secs_f32(1.0 / self.fps),
        )));
        app.init_resource::<ButtonInput<KeyCode>>();
        app.insert_resource(self.settings);
        app.add_plugins(MiniPanelPlugin::headless());
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use crate::constants::PANEL_OFFSET_LEFT;
    use crate::mini_panel::{
        MiniPanel, MiniPanelCommand, PanelKind, PanelSide, PanelStateChanged, PanelStatus, PanelToggleRequest,
        SidePanelChanged,
    };
    use crate::widgets::{ButtonType, HudButton, UiPosition, WidgetGroup, WidgetVisible};

    #[derive(Resource, Default)]
    struct SeenRequests(Vec<PanelKind>);

    fn collect_requests(mut reader: MessageReader<PanelToggleRequest>, mut seen: ResMut<SeenRequests>) {
        seen.0.extend(reader.read().map(|r| r.target));
    }

    fn ready_app(single_player: bool) -> App {
        let mut app = HeadlessAppBuilder::new().single_player(single_player).build();
        app.init_resource::<SeenRequests>();
        app.add_systems(PostUpdate, collect_requests);
        app.update();
        app.update();
        app
    }

    fn send<M: Message>(app: &mut App, message: M) {
        app.world_mut().resource_mut::<Messages<M>>().write(message);
    }

    fn button(app: &mut App, kind: ButtonType) -> Entity {
        let mut query = app.world_mut().query::<(Entity, &HudButton)>();
        query
            .iter(app.world())
            .find(|(_, b)| b.kind == kind)
            .map(|(e, _)| e)
            .unwrap()
    }

    fn panel_group(app: &App) -> &WidgetGroup {
        let entity = app.world().resource::<MiniPanel>().panel_group.unwrap();
        app.world().get::<WidgetGroup>(entity).unwrap()
    }

    fn set_interaction(app: &mut App, entity: Entity, interaction: Interaction) {
        *app.world_mut().get_mut::<Interaction>(entity).unwrap() = interaction;
        app.update();
    }

    #[test]
    fn test_single_player_panel_builds_hidden() {
        let mut app = ready_app(true);
        assert_eq!(app.world().resource::<MiniPanel>().status, PanelStatus::Ready);

        // Container plus seven buttons
        assert_eq!(panel_group(&app).entries().len(), 8);
        assert!(!panel_group(&app).is_visible());

        let mut buttons = app.world_mut().query::<&HudButton>();
        let kinds: Vec<ButtonType> = buttons.iter(app.world()).map(|b| b.kind).collect();
        assert_eq!(kinds.len(), 7);
        assert!(!kinds.contains(&ButtonType::MinipanelParty));

        let character = button(&mut app, ButtonType::MinipanelCharacter);
        assert_eq!(app.world().get::<Visibility>(character), Some(&Visibility::Hidden));
    }

    #[test]
    fn test_multiplayer_panel_has_party_button() {
        let mut app = ready_app(false);
        let party = button(&mut app, ButtonType::MinipanelParty);
        assert_eq!(app.world().get::<UiPosition>(party), Some(&UiPosition::new(391, 528)));
        assert_eq!(panel_group(&app).entries().len(), 9);
    }

    #[test]
    fn test_open_command_shows_buttons() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        app.update();

        assert!(app.world().resource::<MiniPanel>().is_open());
        let menu = button(&mut app, ButtonType::MinipanelMenu);
        assert_eq!(app.world().get::<Visibility>(menu), Some(&Visibility::Inherited));
    }

    fn tap(app: &mut App, key: KeyCode) {
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
        app.update();
        let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keyboard.release(key);
        keyboard.clear();
        app.update();
    }

    #[test]
    fn test_toggle_hotkey_opens_then_closes() {
        let mut app = ready_app(true);
        tap(&mut app, KeyCode::Backquote);
        assert!(app.world().resource::<MiniPanel>().is_open());
        assert!(panel_group(&app).is_visible());

        tap(&mut app, KeyCode::Backquote);
        assert!(!app.world().resource::<MiniPanel>().is_open());
        assert!(!panel_group(&app).is_visible());
    }

    #[test]
    fn test_panel_hotkey_writes_request() {
        let mut app = ready_app(true);
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::KeyI);
        app.update();
        assert_eq!(app.world().resource::<SeenRequests>().0, vec![PanelKind::Inventory]);
    }

    #[test]
    fn test_right_side_panel_moves_buttons_left() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        send(
            &mut app,
            SidePanelChanged {
                side: PanelSide::Right,
                open: true,
            },
        );
        app.update();

        let character = button(&mut app, ButtonType::MinipanelCharacter);
        let node = app.world().get::<Node>(character).unwrap();
        assert_eq!(node.left, Val::Px((328 - PANEL_OFFSET_LEFT) as f32));
        assert!(app.world().resource::<MiniPanel>().moved_left());
    }

    #[test]
    fn test_both_side_panels_hide_open_panel() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        app.update();
        send(
            &mut app,
            SidePanelChanged {
                side: PanelSide::Left,
                open: true,
            },
        );
        send(
            &mut app,
            SidePanelChanged {
                side: PanelSide::Right,
                open: true,
            },
        );
        app.update();

        assert!(!panel_group(&app).is_visible());
        assert_eq!(panel_group(&app).offset().x, 0);
    }

    #[test]
    fn test_click_writes_toggle_request() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        app.update();

        let quest = button(&mut app, ButtonType::MinipanelQuest);
        set_interaction(&mut app, quest, Interaction::Pressed);
        assert!(app.world().resource::<SeenRequests>().0.is_empty());

        set_interaction(&mut app, quest, Interaction::Hovered);
        assert_eq!(app.world().resource::<SeenRequests>().0, vec![PanelKind::QuestLog]);
    }

    #[test]
    fn test_click_on_closed_panel_is_ignored() {
        let mut app = ready_app(true);
        let quest = button(&mut app, ButtonType::MinipanelQuest);
        set_interaction(&mut app, quest, Interaction::Pressed);
        set_interaction(&mut app, quest, Interaction::Hovered);
        assert!(app.world().resource::<SeenRequests>().0.is_empty());
    }

    #[test]
    fn test_press_held_across_close_is_not_a_click() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        app.update();

        let quest = button(&mut app, ButtonType::MinipanelQuest);
        set_interaction(&mut app, quest, Interaction::Pressed);

        send(&mut app, MiniPanelCommand::Close);
        app.update();
        assert!(!app.world().get::<HudButton>(quest).unwrap().pressed);

        send(&mut app, MiniPanelCommand::Open);
        app.update();
        set_interaction(&mut app, quest, Interaction::Hovered);
        assert!(app.world().resource::<SeenRequests>().0.is_empty());
    }

    #[test]
    fn test_commands_ignored_when_layout_fails() {
        // No frames on the sheet, so the layout cannot place any button
        let settings = HudSettings {
            button_sheet_columns: 0,
            ..HudSettings::default()
        };
        let mut app = HeadlessAppBuilder::new().with_settings(settings).build();
        app.update();
        assert_eq!(app.world().resource::<MiniPanel>().status, PanelStatus::Failed);

        send(&mut app, MiniPanelCommand::Open);
        send(
            &mut app,
            SidePanelChanged {
                side: PanelSide::Right,
                open: true,
            },
        );
        app.update();

        let mini_panel = app.world().resource::<MiniPanel>();
        assert!(!mini_panel.is_open());
        assert!(!mini_panel.moved_left());
        let mut buttons = app.world_mut().query::<&HudButton>();
        assert_eq!(buttons.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_hover_shows_tooltip() {
        let mut app = ready_app(true);
        send(&mut app, MiniPanelCommand::Open);
        app.update();

        let automap = button(&mut app, ButtonType::MinipanelAutomap);
        let tooltip = app.world().get::<HudButton>(automap).unwrap().tooltip.unwrap();

        set_interaction(&mut app, automap, Interaction::Hovered);
        assert_eq!(app.world().get::<WidgetVisible>(tooltip), Some(&WidgetVisible(true)));
        assert_eq!(app.world().get::<Visibility>(tooltip), Some(&Visibility::Inherited));
        assert_eq!(app.world().get::<Text>(tooltip).unwrap().0, "Automap (Tab)");

        set_interaction(&mut app, automap, Interaction::None);
        assert_eq!(app.world().get::<Visibility>(tooltip), Some(&Visibility::Hidden));
    }

    #[test]
    fn test_panel_state_holds_button_down() {
        let mut app = ready_app(true);
        send(
            &mut app,
            PanelStateChanged {
                target: PanelKind::Inventory,
                open: true,
            },
        );
        app.update();

        let inventory = button(&mut app, ButtonType::MinipanelInventory);
        assert!(app.world().get::<HudButton>(inventory).unwrap().toggled);
        let image = app.world().get::<ImageNode>(inventory).unwrap();
        assert_eq!(image.texture_atlas.as_ref().map(|a| a.index), Some(3));
    }

    #[test]
    fn test_custom_toggle_key_from_settings() {
        let settings = HudSettings {
            toggle_key: "F2".to_string(),
            ..HudSettings::default()
        };
        let mut app = HeadlessAppBuilder::new().with_settings(settings).with_fps(30.0).build();
        app.update();
        app.update();

        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::F2);
        app.update();
        assert!(app.world().resource::<MiniPanel>().is_open());
    }
}
