//! Stateless overlap and crossing predicates for axis-aligned boxes.
//!
//! Every box is described by its bottom-left `pos` and `size`. Zero-size boxes
//! are valid and behave as lines or points.

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Vec2};

/// Which edge of the moving body struck the obstacle during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSide {
    /// Body was moving right; its right edge crossed the obstacle's left edge.
    Right,
    /// Body was moving left; its left edge crossed the obstacle's right edge.
    Left,
}

/// Inclusive overlap of the two vertical extents.
///
/// A resting test: it says nothing about the direction of approach, and boxes
/// that merely touch count as overlapping.
pub fn vertical_overlap(
    body_pos: Vec2,
    body_size: Vec2,
    obstacle_pos: Vec2,
    obstacle_size: Vec2,
) -> bool {
    let body = Aabb::new(body_pos, body_size);
    let obstacle = Aabb::new(obstacle_pos, obstacle_size);
    body.bottom() <= obstacle.top() && body.top() >= obstacle.bottom()
}

/// Strict overlap of the two horizontal extents. Touching edges do not count.
pub fn horizontal_overlap(
    body_pos: Vec2,
    body_size: Vec2,
    obstacle_pos: Vec2,
    obstacle_size: Vec2,
) -> bool {
    let body = Aabb::new(body_pos, body_size);
    let obstacle = Aabb::new(obstacle_pos, obstacle_size);
    body.right() > obstacle.left() && body.left() < obstacle.right()
}

/// Detect a horizontal edge crossing between `previous_pos` and `current_pos`.
///
/// Fires only on the tick where the leading edge passes the obstacle's facing
/// edge, so a body that moved farther than the obstacle is thick in one tick is
/// still caught. The body must also vertically overlap the obstacle at its
/// current position. Returns `None` when there was no horizontal movement.
pub fn horizontal_sweep(
    current_pos: Vec2,
    size: Vec2,
    obstacle_pos: Vec2,
    obstacle_size: Vec2,
    previous_pos: Vec2,
) -> Option<HitSide> {
    if !vertical_overlap(current_pos, size, obstacle_pos, obstacle_size) {
        return None;
    }

    let current = Aabb::new(current_pos, size);
    let previous = Aabb::new(previous_pos, size);
    let obstacle = Aabb::new(obstacle_pos, obstacle_size);

    if current_pos.x > previous_pos.x {
        let crossed =
            current.right() >= obstacle.left() && previous.right() < obstacle.left();
        crossed.then_some(HitSide::Right)
    } else if current_pos.x < previous_pos.x {
        let crossed =
            current.left() <= obstacle.right() && previous.left() > obstacle.right();
        crossed.then_some(HitSide::Left)
    } else {
        None
    }
}

/// Detect the body's bottom edge passing down through the obstacle's top edge.
///
/// The vertical counterpart of [`horizontal_sweep`], restricted to the falling
/// direction. Requires horizontal alignment at the current position.
pub fn downward_sweep(
    current_pos: Vec2,
    size: Vec2,
    obstacle_pos: Vec2,
    obstacle_size: Vec2,
    previous_pos: Vec2,
) -> bool {
    if current_pos.y >= previous_pos.y {
        return false;
    }
    let top = Aabb::new(obstacle_pos, obstacle_size).top();
    horizontal_overlap(current_pos, size, obstacle_pos, obstacle_size)
        && previous_pos.y >= top
        && current_pos.y < top
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Vec2 = Vec2::new(0.2, 0.2);
    const WALL_POS: Vec2 = Vec2::new(1.0, 0.0);
    const WALL_SIZE: Vec2 = Vec2::new(0.1, 1.0);

    #[test]
    fn vertical_overlap_inclusive_on_touch() {
        // Body bottom exactly on obstacle top
        assert!(vertical_overlap(
            Vec2::new(0.0, 1.0),
            BODY,
            Vec2::new(0.0, 0.5),
            Vec2::new(1.0, 0.5),
        ));
        // Just above
        assert!(!vertical_overlap(
            Vec2::new(0.0, 1.001),
            BODY,
            Vec2::new(0.0, 0.5),
            Vec2::new(1.0, 0.5),
        ));
    }

    #[test]
    fn vertical_overlap_symmetric_pair() {
        let a = (Vec2::new(0.0, 0.5), Vec2::new(0.2, 0.2));
        let b = (Vec2::new(3.0, 0.6), Vec2::new(1.0, 0.05));
        assert_eq!(
            vertical_overlap(a.0, a.1, b.0, b.1),
            vertical_overlap(b.0, b.1, a.0, a.1)
        );
        assert!(vertical_overlap(a.0, a.1, b.0, b.1));
    }

    #[test]
    fn zero_size_boxes_behave_as_lines() {
        // Horizontal line at y = 1 against a box spanning 0..1
        assert!(vertical_overlap(
            Vec2::new(0.0, 1.0),
            Vec2::ZERO,
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
        ));
        assert!(!horizontal_overlap(
            Vec2::new(1.0, 0.0),
            Vec2::ZERO,
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
        ));
    }

    #[test]
    fn horizontal_overlap_is_strict() {
        assert!(!horizontal_overlap(
            Vec2::new(-0.2, 0.0),
            BODY,
            Vec2::ZERO,
            Vec2::new(1.0, 0.1),
        ));
        assert!(horizontal_overlap(
            Vec2::new(-0.19, 0.0),
            BODY,
            Vec2::ZERO,
            Vec2::new(1.0, 0.1),
        ));
    }

    #[test]
    fn sweep_detects_rightward_crossing() {
        let hit = horizontal_sweep(
            Vec2::new(0.85, 0.0),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.7, 0.0),
        );
        assert_eq!(hit, Some(HitSide::Right));
    }

    #[test]
    fn sweep_detects_leftward_crossing() {
        // Right face of the wall is at 1.1
        let hit = horizontal_sweep(
            Vec2::new(1.05, 0.5),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(1.2, 0.5),
        );
        assert_eq!(hit, Some(HitSide::Left));
    }

    #[test]
    fn sweep_catches_tunnelling_body() {
        // Jumps from fully left of the wall to fully right of it in one tick
        let hit = horizontal_sweep(
            Vec2::new(1.5, 0.0),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.5, 0.0),
        );
        assert_eq!(hit, Some(HitSide::Right));
    }

    #[test]
    fn sweep_ignores_body_already_past_edge() {
        // Previous right edge already at/after the wall's left edge
        let hit = horizontal_sweep(
            Vec2::new(0.9, 0.0),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.85, 0.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn sweep_ignores_moving_away() {
        let hit = horizontal_sweep(
            Vec2::new(0.6, 0.0),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.85, 0.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn sweep_requires_vertical_overlap() {
        let hit = horizontal_sweep(
            Vec2::new(0.85, 2.0),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.7, 2.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn sweep_without_horizontal_motion_is_none() {
        let hit = horizontal_sweep(
            Vec2::new(0.85, 0.3),
            BODY,
            WALL_POS,
            WALL_SIZE,
            Vec2::new(0.85, 0.5),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn downward_sweep_catches_fall_through_thin_platform() {
        let platform_pos = Vec2::new(0.0, 0.9);
        let platform_size = Vec2::new(1.0, 0.05);
        // Previous bottom 1.0, current bottom 0.5: crossed 0.95 without overlapping
        assert!(downward_sweep(
            Vec2::new(0.2, 0.5),
            BODY,
            platform_pos,
            platform_size,
            Vec2::new(0.2, 1.0),
        ));
        // Rising never counts
        assert!(!downward_sweep(
            Vec2::new(0.2, 1.0),
            BODY,
            platform_pos,
            platform_size,
            Vec2::new(0.2, 0.5),
        ));
        // Started below the top already
        assert!(!downward_sweep(
            Vec2::new(0.2, 0.5),
            BODY,
            platform_pos,
            platform_size,
            Vec2::new(0.2, 0.9),
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn vec2(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec2> {
            (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
        }

        proptest! {
            #[test]
            fn vertical_overlap_is_symmetric(
                a_pos in vec2(-10.0..10.0),
                a_size in vec2(0.0..5.0),
                b_pos in vec2(-10.0..10.0),
                b_size in vec2(0.0..5.0),
            ) {
                prop_assert_eq!(
                    vertical_overlap(a_pos, a_size, b_pos, b_size),
                    vertical_overlap(b_pos, b_size, a_pos, a_size)
                );
            }

            #[test]
            fn rightward_hit_means_leading_edge_crossed(
                prev_x in -5.0f32..0.9,
                step in 0.0f32..10.0,
                y in -0.5f32..1.0,
            ) {
                let previous = Vec2::new(prev_x, y);
                let current = Vec2::new(prev_x + step, y);
                if let Some(side) = horizontal_sweep(current, BODY, WALL_POS, WALL_SIZE, previous) {
                    prop_assert_eq!(side, HitSide::Right);
                    prop_assert!(previous.x + BODY.x < WALL_POS.x);
                    prop_assert!(current.x + BODY.x >= WALL_POS.x);
                }
            }

            #[test]
            fn any_rightward_pass_is_detected(
                prev_x in -5.0f32..0.79,
                overshoot in 0.0f32..50.0,
                y in -0.19f32..0.99,
            ) {
                // Start clear of the wall, end with right edge at or beyond its left edge
                let previous = Vec2::new(prev_x, y);
                let current = Vec2::new(WALL_POS.x - BODY.x + overshoot, y);
                prop_assert_eq!(
                    horizontal_sweep(current, BODY, WALL_POS, WALL_SIZE, previous),
                    Some(HitSide::Right)
                );
            }
        }
    }
}
