//! Pairwise collision detection and tag-based classification.
//!
//! Every unordered pair of distinct, active, collider-bearing entities is
//! tested for strict AABB overlap. An overlapping pair is classified by the
//! first matching rule in [`RULES`]; tag order within a pair does not
//! matter. The scan stops at the first classified pair, so a frame reports
//! at most one collision event, the first one found in creation order.
//!
//! Cost is O(n²) in the number of colliders, which is fine for a single
//! small level.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::components::Collider;
use crate::entity::{Entity, EntityId};

// ---------------------------------------------------------------------------
// ColliderTag
// ---------------------------------------------------------------------------

/// Gameplay role of a collider. Entities without a collider take no part
/// in collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColliderTag {
    Player,
    Enemy,
    /// Fired by enemies; hurts the player.
    Projectile,
    /// Fired by the player; hurts enemies.
    FriendlyProjectile,
    LevelComplete,
}

// ---------------------------------------------------------------------------
// CollisionKind / CollisionOutcome
// ---------------------------------------------------------------------------

/// Classified result of a collision scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionKind {
    #[default]
    None,
    PlayerEnemy,
    PlayerProjectile,
    EnemyProjectile,
    PlayerLevelComplete,
}

/// Classification rules in priority order: `(first, second, kind)`.
pub const RULES: [(ColliderTag, ColliderTag, CollisionKind); 4] = [
    (ColliderTag::Player, ColliderTag::Enemy, CollisionKind::PlayerEnemy),
    (ColliderTag::Player, ColliderTag::Projectile, CollisionKind::PlayerProjectile),
    (ColliderTag::Enemy, ColliderTag::FriendlyProjectile, CollisionKind::EnemyProjectile),
    (ColliderTag::Player, ColliderTag::LevelComplete, CollisionKind::PlayerLevelComplete),
];

/// What a scan found.
///
/// `pair` is ordered like the matching rule: for
/// [`CollisionKind::PlayerEnemy`] it is `(player, enemy)`, for
/// [`CollisionKind::EnemyProjectile`] `(enemy, projectile)`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionOutcome {
    pub kind: CollisionKind,
    pub pair: Option<(EntityId, EntityId)>,
}

impl CollisionOutcome {
    pub const NONE: CollisionOutcome = CollisionOutcome {
        kind: CollisionKind::None,
        pair: None,
    };

    pub fn is_collision(&self) -> bool {
        self.kind != CollisionKind::None
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// First rule matching `{a, b}` in either order, and whether the tags had to
/// be swapped to match it.
fn match_rule(a: ColliderTag, b: ColliderTag) -> Option<(CollisionKind, bool)> {
    RULES.iter().find_map(|&(first, second, kind)| {
        if a == first && b == second {
            Some((kind, false))
        } else if a == second && b == first {
            Some((kind, true))
        } else {
            None
        }
    })
}

/// Classify a pair of tags. Symmetric: `classify(a, b) == classify(b, a)`.
pub fn classify(a: ColliderTag, b: ColliderTag) -> CollisionKind {
    match_rule(a, b).map_or(CollisionKind::None, |(kind, _)| kind)
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// Find the first classified collision among `entities`, in slice order.
///
/// Inactive entities and entities without a [`Collider`] are ignored. Pair
/// members are distinguished by position in the slice, never by name, so an
/// entity cannot collide with itself.
pub fn scan(entities: &[Entity]) -> CollisionOutcome {
    let colliders: Vec<(EntityId, &Collider)> = entities
        .iter()
        .filter(|e| e.is_active())
        .filter_map(|e| e.component::<Collider>().map(|c| (e.id(), c)))
        .collect();

    for (i, &(a_id, a)) in colliders.iter().enumerate() {
        for &(b_id, b) in &colliders[i + 1..] {
            if !a.bounds().intersects(&b.bounds()) {
                continue;
            }
            let Some((kind, swapped)) = match_rule(a.tag(), b.tag()) else {
                trace!(a = %a_id, b = %b_id, "unclassified overlap");
                continue;
            };
            let pair = if swapped { (b_id, a_id) } else { (a_id, b_id) };
            trace!(?kind, first = %pair.0, second = %pair.1, "collision");
            return CollisionOutcome {
                kind,
                pair: Some(pair),
            };
        }
    }
    CollisionOutcome::NONE
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Transform;
    use crate::layer::Layer;
    use crate::registry::EntityRegistry;

    fn spawn(
        registry: &mut EntityRegistry,
        name: &str,
        tag: ColliderTag,
        x: f32,
        y: f32,
    ) -> EntityId {
        let e = registry.create_entity(name, Layer::Enemy);
        e.add_component(Transform::at(x, y, 32.0, 32.0)).unwrap();
        e.add_component(Collider::new(tag)).unwrap();
        e.id()
    }

    #[test]
    fn classify_follows_rule_table() {
        use ColliderTag::*;
        assert_eq!(classify(Player, Enemy), CollisionKind::PlayerEnemy);
        assert_eq!(classify(Player, Projectile), CollisionKind::PlayerProjectile);
        assert_eq!(classify(Enemy, FriendlyProjectile), CollisionKind::EnemyProjectile);
        assert_eq!(classify(Player, LevelComplete), CollisionKind::PlayerLevelComplete);
        assert_eq!(classify(Player, FriendlyProjectile), CollisionKind::None);
        assert_eq!(classify(Enemy, Projectile), CollisionKind::None);
        assert_eq!(classify(Enemy, Enemy), CollisionKind::None);
    }

    #[test]
    fn classify_is_order_independent() {
        use ColliderTag::*;
        let tags = [Player, Enemy, Projectile, FriendlyProjectile, LevelComplete];
        for a in tags {
            for b in tags {
                assert_eq!(classify(a, b), classify(b, a), "{a:?} x {b:?}");
            }
        }
    }

    #[test]
    fn overlapping_player_and_enemy() {
        let mut registry = EntityRegistry::new();
        let player = spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        let enemy = spawn(&mut registry, "tank", ColliderTag::Enemy, 16.0, 16.0);
        let outcome = registry.check_collisions();
        assert_eq!(outcome.kind, CollisionKind::PlayerEnemy);
        assert_eq!(outcome.pair, Some((player, enemy)));
    }

    #[test]
    fn pair_is_ordered_by_rule_not_by_creation() {
        let mut registry = EntityRegistry::new();
        let enemy = spawn(&mut registry, "tank", ColliderTag::Enemy, 16.0, 16.0);
        let player = spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        let outcome = registry.check_collisions();
        assert_eq!(outcome.kind, CollisionKind::PlayerEnemy);
        assert_eq!(outcome.pair, Some((player, enemy)));
    }

    #[test]
    fn distant_player_and_enemy() {
        let mut registry = EntityRegistry::new();
        spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        spawn(&mut registry, "tank", ColliderTag::Enemy, 100.0, 100.0);
        assert_eq!(registry.check_collisions(), CollisionOutcome::NONE);
    }

    #[test]
    fn no_colliders_means_no_collision() {
        let mut registry = EntityRegistry::new();
        let e = registry.create_entity("radar", Layer::Ui);
        e.add_component(Transform::at(0.0, 0.0, 64.0, 64.0)).unwrap();
        assert_eq!(registry.check_collisions(), CollisionOutcome::NONE);
        assert_eq!(scan(&[]), CollisionOutcome::NONE);
    }

    #[test]
    fn same_name_entities_still_collide() {
        let mut registry = EntityRegistry::new();
        spawn(&mut registry, "unit", ColliderTag::Player, 0.0, 0.0);
        spawn(&mut registry, "unit", ColliderTag::Enemy, 8.0, 8.0);
        assert_eq!(registry.check_collisions().kind, CollisionKind::PlayerEnemy);
    }

    #[test]
    fn unclassified_overlap_does_not_stop_scan() {
        let mut registry = EntityRegistry::new();
        // Two overlapping enemies first: no rule, scanning continues.
        spawn(&mut registry, "tank-a", ColliderTag::Enemy, 500.0, 500.0);
        spawn(&mut registry, "tank-b", ColliderTag::Enemy, 510.0, 510.0);
        spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        spawn(&mut registry, "heliport", ColliderTag::LevelComplete, 10.0, 10.0);
        assert_eq!(
            registry.check_collisions().kind,
            CollisionKind::PlayerLevelComplete
        );
    }

    #[test]
    fn first_pair_in_creation_order_wins() {
        let mut registry = EntityRegistry::new();
        let player = spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        let goal = spawn(&mut registry, "heliport", ColliderTag::LevelComplete, 4.0, 4.0);
        spawn(&mut registry, "tank", ColliderTag::Enemy, 8.0, 8.0);
        // Player x heliport is discovered before player x tank.
        let outcome = registry.check_collisions();
        assert_eq!(outcome.kind, CollisionKind::PlayerLevelComplete);
        assert_eq!(outcome.pair, Some((player, goal)));
    }

    #[test]
    fn destroyed_entities_are_ignored() {
        let mut registry = EntityRegistry::new();
        spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        let enemy = spawn(&mut registry, "tank", ColliderTag::Enemy, 16.0, 16.0);
        registry.destroy(enemy);
        assert_eq!(registry.check_collisions(), CollisionOutcome::NONE);
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let mut registry = EntityRegistry::new();
        spawn(&mut registry, "player", ColliderTag::Player, 0.0, 0.0);
        spawn(&mut registry, "tank", ColliderTag::Enemy, 32.0, 0.0);
        assert_eq!(registry.check_collisions(), CollisionOutcome::NONE);
    }
}
