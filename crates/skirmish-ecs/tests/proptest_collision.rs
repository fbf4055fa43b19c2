//! Property tests for overlap testing and collision classification.

use proptest::prelude::*;
use skirmish_ecs::collision::scan;
use skirmish_ecs::prelude::*;

fn tag_strategy() -> impl Strategy<Value = ColliderTag> {
    prop_oneof![
        Just(ColliderTag::Player),
        Just(ColliderTag::Enemy),
        Just(ColliderTag::Projectile),
        Just(ColliderTag::FriendlyProjectile),
        Just(ColliderTag::LevelComplete),
    ]
}

/// Integer-valued coordinates keep comparisons exact.
fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-200i32..200, -200i32..200, 0i32..64, 0i32..64)
        .prop_map(|(x, y, w, h)| Rect::new(x as f32, y as f32, w as f32, h as f32))
}

fn body_strategy() -> impl Strategy<Value = (ColliderTag, i32, i32)> {
    (tag_strategy(), -100i32..100, -100i32..100)
}

fn populate(registry: &mut EntityRegistry, bodies: &[(ColliderTag, i32, i32)]) {
    for (i, &(tag, x, y)) in bodies.iter().enumerate() {
        let e = registry.create_entity(format!("body-{i}"), Layer::Enemy);
        e.add_component(Transform::at(x as f32, y as f32, 24.0, 24.0))
            .unwrap();
        e.add_component(Collider::new(tag)).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn touching_rects_never_intersect(a in rect_strategy(), gap in 0i32..10) {
        let right = Rect::new(a.right() + gap as f32, a.y, 10.0, 10.0);
        let below = Rect::new(a.x, a.bottom() + gap as f32, 10.0, 10.0);
        prop_assert!(!a.intersects(&right));
        prop_assert!(!a.intersects(&below));
    }

    #[test]
    fn classify_is_symmetric(a in tag_strategy(), b in tag_strategy()) {
        prop_assert_eq!(classify(a, b), classify(b, a));
    }

    #[test]
    fn lone_collider_never_collides(tag in tag_strategy(), x in -100i32..100, y in -100i32..100) {
        let mut registry = EntityRegistry::new();
        populate(&mut registry, &[(tag, x, y)]);
        prop_assert_eq!(registry.check_collisions(), CollisionOutcome::NONE);
    }

    #[test]
    fn reported_pair_overlaps_and_matches_kind(
        bodies in prop::collection::vec(body_strategy(), 0..24),
    ) {
        let mut registry = EntityRegistry::new();
        populate(&mut registry, &bodies);

        let outcome = registry.check_collisions();
        match outcome.pair {
            None => prop_assert_eq!(outcome.kind, CollisionKind::None),
            Some((first, second)) => {
                prop_assert_ne!(first, second);
                let a = registry.entity(first).unwrap().component::<Collider>().unwrap();
                let b = registry.entity(second).unwrap().component::<Collider>().unwrap();
                prop_assert!(a.bounds().intersects(&b.bounds()));
                prop_assert_eq!(classify(a.tag(), b.tag()), outcome.kind);
                prop_assert_ne!(outcome.kind, CollisionKind::None);
            }
        }
    }

    #[test]
    fn detection_does_not_depend_on_creation_order(
        bodies in prop::collection::vec(body_strategy(), 0..16),
    ) {
        let mut forward = EntityRegistry::new();
        populate(&mut forward, &bodies);
        let mut reversed_bodies = bodies.clone();
        reversed_bodies.reverse();
        let mut backward = EntityRegistry::new();
        populate(&mut backward, &reversed_bodies);

        // The first pair found may differ, but whether any collision exists
        // may not.
        prop_assert_eq!(
            forward.check_collisions().is_collision(),
            backward.check_collisions().is_collision()
        );
    }

    #[test]
    fn scan_of_cleared_entities_is_empty(bodies in prop::collection::vec(body_strategy(), 0..16)) {
        let mut registry = EntityRegistry::new();
        populate(&mut registry, &bodies);
        let ids: Vec<EntityId> = registry.entities().iter().map(Entity::id).collect();
        for id in ids {
            registry.destroy(id);
        }
        prop_assert_eq!(scan(registry.entities()), CollisionOutcome::NONE);
    }
}
