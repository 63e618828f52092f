//! Widget groups: a screen region plus a shared visibility/offset for its members

use bevy::prelude::*;

/// Draw order of a widget group (higher draws on top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderPriority {
    Background,
    Minipanel,
    Foreground,
}

impl RenderPriority {
    pub fn z_index(self) -> i32 {
        match self {
            RenderPriority::Background => 0,
            RenderPriority::Minipanel => 10,
            RenderPriority::Foreground => 100,
        }
    }
}

/// Axis-aligned rectangle in virtual-screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WidgetRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Edges count as inside
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &WidgetRect) -> WidgetRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        WidgetRect::new(x, y, right - x, bottom - y)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> WidgetRect {
        WidgetRect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A set of widgets sharing a region, a draw priority, a visibility flag and
/// a displacement.
///
/// Members keep their own base position (`UiPosition` or `Tooltip` origin);
/// the group's accumulated `offset` is added on top when nodes are synced.
#[derive(Component, Debug, Clone)]
pub struct WidgetGroup {
    priority: RenderPriority,
    bounds: Option<WidgetRect>,
    entries: Vec<Entity>,
    visible: bool,
    offset: IVec2,
}

impl WidgetGroup {
    pub fn new(priority: RenderPriority) -> Self {
        Self {
            priority,
            bounds: None,
            entries: Vec::new(),
            visible: true,
            offset: IVec2::ZERO,
        }
    }

    pub fn priority(&self) -> RenderPriority {
        self.priority
    }

    pub fn bounds(&self) -> Option<WidgetRect> {
        self.bounds
    }

    pub fn entries(&self) -> &[Entity] {
        &self.entries
    }

    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// Anchor the group at a point. Later widgets grow the bounds from here.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.bounds = Some(match self.bounds {
            Some(rect) => WidgetRect::new(x, y, rect.width, rect.height),
            None => WidgetRect::new(x, y, 0, 0),
        });
    }

    pub fn add_widget(&mut self, entity: Entity, rect: WidgetRect) {
        self.entries.push(entity);
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(&rect),
            None => rect,
        });
    }

    /// Move the whole group, members included
    pub fn offset_position(&mut self, dx: i32, dy: i32) {
        self.offset += IVec2::new(dx, dy);
        if let Some(bounds) = self.bounds {
            self.bounds = Some(bounds.offset(dx, dy));
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        self.bounds.is_some_and(|b| b.contains(px, py))
    }
}

/// Links a widget entity to the group entity that owns it
#[derive(Component, Debug, Clone, Copy)]
pub struct GroupMember(pub Entity);

/// Virtual-screen top-left position of a widget, before group offset
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiPosition {
    pub x: i32,
    pub y: i32,
}

impl UiPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Per-widget visibility, combined with the group's flag
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetVisible(pub bool);

impl Default for WidgetVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Resolve the effective visibility of a member widget
pub fn member_visibility(group: &WidgetGroup, own: Option<&WidgetVisible>) -> Visibility {
    let own_visible = own.is_none_or(|v| v.0);
    if group.is_visible() && own_visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

/// Mirror group visibility into member `Visibility`
pub fn sync_group_visibility(
    groups: Query<&WidgetGroup>,
    mut members: Query<(&GroupMember, Option<&WidgetVisible>, &mut Visibility)>,
) {
    for (member, own, mut visibility) in &mut members {
        let Ok(group) = groups.get(member.0) else {
            continue;
        };
        let desired = member_visibility(group, own);
        if *visibility != desired {
            *visibility = desired;
        }
    }
}

/// Mirror `UiPosition` plus group offset into `Node.left/top`
pub fn sync_widget_positions(
    groups: Query<&WidgetGroup>,
    mut widgets: Query<(&UiPosition, Option<&GroupMember>, &mut Node)>,
) {
    for (position, member, mut node) in &mut widgets {
        let offset = member
            .and_then(|m| groups.get(m.0).ok())
            .map(|g| g.offset())
            .unwrap_or(IVec2::ZERO);
        let left = Val::Px((position.x + offset.x) as f32);
        let top = Val::Px((position.y + offset.y) as f32);
        if node.left != left || node.top != top {
            node.left = left;
            node.top = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_rect_contains_edges() {
        let rect = WidgetRect::new(10, 20, 5, 5);
        assert!(rect.contains(10, 20));
        assert!(rect.contains(15, 25));
        assert!(!rect.contains(16, 25));
        assert!(!rect.contains(9, 22));
    }

    #[test]
    fn test_group_bounds_grow_from_position() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut group = WidgetGroup::new(RenderPriority::Minipanel);
        assert!(!group.contains(0, 0));

        group.set_position(100, 100);
        assert!(group.contains(100, 100));

        group.add_widget(a, WidgetRect::new(90, 110, 20, 10));
        group.add_widget(b, WidgetRect::new(120, 95, 10, 10));
        assert_eq!(group.bounds(), Some(WidgetRect::new(90, 95, 40, 25)));
        assert_eq!(group.entries(), &[a, b]);
    }

    #[test]
    fn test_offset_moves_bounds_and_accumulates() {
        let mut world = World::new();
        let a = world.spawn_empty().id();

        let mut group = WidgetGroup::new(RenderPriority::Foreground);
        group.add_widget(a, WidgetRect::new(0, 0, 10, 10));
        group.offset_position(130, 0);
        group.offset_position(-30, 5);

        assert_eq!(group.offset(), IVec2::new(100, 5));
        assert!(group.contains(105, 10));
        assert!(!group.contains(5, 5));
    }

    #[test]
    fn test_member_visibility_combines_flags() {
        let mut group = WidgetGroup::new(RenderPriority::Minipanel);
        assert_eq!(member_visibility(&group, None), Visibility::Inherited);
        assert_eq!(
            member_visibility(&group, Some(&WidgetVisible(false))),
            Visibility::Hidden
        );

        group.set_visible(false);
        assert_eq!(
            member_visibility(&group, Some(&WidgetVisible(true))),
            Visibility::Hidden
        );
    }

    #[test]
    fn test_sync_systems_apply_offset_and_visibility() {
        let mut world = World::new();
        let mut group = WidgetGroup::new(RenderPriority::Minipanel);
        group.offset_position(-130, 0);
        group.set_visible(false);
        let group_entity = world.spawn(group).id();

        let widget = world
            .spawn((
                Node::default(),
                Visibility::Inherited,
                UiPosition::new(400, 500),
                GroupMember(group_entity),
            ))
            .id();

        world.run_system_once(sync_widget_positions).unwrap();
        world.run_system_once(sync_group_visibility).unwrap();

        let node = world.get::<Node>(widget).unwrap();
        assert_eq!(node.left, Val::Px(270.0));
        assert_eq!(node.top, Val::Px(500.0));
        assert_eq!(world.get::<Visibility>(widget), Some(&Visibility::Hidden));
    }
}
