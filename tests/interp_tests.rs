// Host-side tests for the pose interpolator, morph factor and pointer state.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod pointer {
        include!("../src/core/pointer.rs");
    }
    pub mod pose {
        include!("../src/core/pose.rs");
    }
    pub mod interp {
        include!("../src/core/interp.rs");
    }
}

use crate::core::interp::*;
use crate::core::pointer::PointerState;
use crate::core::pose::{section_pose, Pose, SECTIONS};
use glam::{Vec2, Vec3};
use proptest::prelude::*;

#[test]
fn blend_moves_a_fraction_of_the_gap() {
    assert_eq!(blend(0.0, 10.0, 0.5), 5.0);
    assert_eq!(blend(4.0, 4.0, 0.03), 4.0);
    assert!((blend(1.0, 0.0, 0.05) - 0.95).abs() < 1e-6);
}

#[test]
fn converges_to_section_pose() {
    let target = section_pose("about").unwrap();
    let mut interp = PoseInterpolator::new(&Pose::fallback());
    let pointer = PointerState::neutral();
    for _ in 0..600 {
        interp.step(&target, &pointer);
    }
    assert!(interp.distance_to(&target) < 1e-3);
    let base = interp.base();
    assert!((base.scale - 0.7).abs() < 1e-3);
}

#[test]
fn target_change_mid_flight_redirects() {
    let mut interp = PoseInterpolator::new(&Pose::fallback());
    let pointer = PointerState::neutral();
    let skills = section_pose("skills").unwrap();
    let footer = Pose::neutral();
    for _ in 0..30 {
        interp.step(&skills, &pointer);
    }
    let before = interp.distance_to(&footer);
    interp.step(&footer, &pointer);
    assert!(interp.distance_to(&footer) < before);
}

#[test]
fn oscillation_stays_within_amplitude() {
    let mut interp = PoseInterpolator::new(&Pose::fallback());
    let target = Pose::fallback();
    let pointer = PointerState::neutral();
    for _ in 0..2000 {
        interp.step(&target, &pointer);
        let base = interp.base();
        let shown = interp.rendered();
        assert!((shown.position.y - base.position.y).abs() <= 0.15 + 1e-5);
        assert!((shown.scale / base.scale - 1.0).abs() <= 0.03 + 1e-5);
        assert!((shown.rotation.x - base.rotation.x).abs() <= 0.05 + 1e-5);
        assert!((shown.rotation.z - base.rotation.z).abs() <= 0.03 + 1e-5);
    }
}

#[test]
fn pointer_adds_yaw_on_top_of_rotation() {
    let mut interp = PoseInterpolator::new(&Pose::fallback());
    let target = Pose::fallback();
    let up = PointerState::from_client(50.0, 0.0, 100.0, 100.0);
    for _ in 0..400 {
        interp.step(&target, &up);
    }
    let yaw = interp.rendered().rotation.y - interp.base().rotation.y;
    assert!((yaw - 0.2).abs() < 1e-3);
}

#[test]
fn model_matrix_places_origin_at_position() {
    let pose = RenderedPose {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.3, -0.2, 0.1),
        scale: 0.5,
    };
    let origin = pose.model_matrix().transform_point3(Vec3::ZERO);
    assert!(origin.abs_diff_eq(pose.position, 1e-6));
}

#[test]
fn morph_target_ramps_over_scroll() {
    assert_eq!(morph_target(0.0, 1000.0), 0.0);
    assert_eq!(morph_target(-50.0, 1000.0), 0.0);
    assert!((morph_target(400.0, 1000.0) - 0.5).abs() < 1e-6);
    assert_eq!(morph_target(800.0, 1000.0), 1.0);
    assert_eq!(morph_target(5000.0, 1000.0), 1.0);
    assert_eq!(morph_target(f32::NAN, 1000.0), 0.0);
    assert_eq!(morph_target(10.0, 0.0), 1.0);
}

#[test]
fn morph_tracker_eases_toward_target() {
    let mut m = MorphTracker::default();
    let first = m.step(2000.0, 1000.0);
    assert!((first - 0.05).abs() < 1e-6);
    for _ in 0..300 {
        m.step(2000.0, 1000.0);
    }
    assert!((m.factor() - 1.0).abs() < 1e-3);
}

#[test]
fn pointer_normalizes_client_coordinates() {
    let tl = PointerState::from_client(0.0, 0.0, 200.0, 100.0);
    assert_eq!(tl.xy(), Vec2::new(-1.0, 1.0));
    let br = PointerState::from_client(200.0, 100.0, 200.0, 100.0);
    assert_eq!(br.xy(), Vec2::new(1.0, -1.0));
    let center = PointerState::from_client(100.0, 50.0, 200.0, 100.0);
    assert_eq!(center.xy(), Vec2::ZERO);
    // Outside the viewport clamps to the edge
    let far = PointerState::from_client(1.0e6, -1.0e6, 200.0, 100.0);
    assert_eq!(far.xy(), Vec2::new(1.0, 1.0));
}

#[test]
fn pointer_defaults_to_neutral() {
    assert_eq!(PointerState::default(), PointerState::neutral());
    assert_eq!(PointerState::neutral().xy(), Vec2::ZERO);
    assert_eq!(PointerState::from_client(5.0, 5.0, 0.0, 100.0), PointerState::neutral());
    assert_eq!(
        PointerState::from_client(f32::NAN, 5.0, 100.0, 100.0),
        PointerState::neutral()
    );
}

#[test]
fn look_offset_is_clamped() {
    let corner = PointerState::from_client(0.0, 0.0, 100.0, 100.0);
    let off = corner.look_offset(0.15, 0.15);
    assert!(off.length() <= 0.15 + 1e-6);
    assert!(off.x < 0.0 && off.y > 0.0);
}

fn vec3_in(range: f32) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn pose_strategy() -> impl Strategy<Value = Pose> {
    (vec3_in(5.0), vec3_in(3.14), 0.1f32..3.0).prop_map(|(p, r, s)| Pose::new(p, r, s))
}

fn target_strategy() -> impl Strategy<Value = Pose> {
    prop_oneof![
        (0..SECTIONS.len()).prop_map(|i| SECTIONS[i].pose()),
        Just(Pose::neutral()),
        pose_strategy(),
    ]
}

// Below this the f32 step can round to zero
const RESOLVABLE_DISTANCE: f32 = 1e-3;

proptest! {
    #[test]
    fn distance_shrinks_across_any_sequence_of_targets(
        start in pose_strategy(),
        holds in prop::collection::vec((target_strategy(), 1usize..120), 1..8),
    ) {
        let mut interp = PoseInterpolator::new(&start);
        let pointer = PointerState::neutral();
        for (target, frames) in &holds {
            let at_change = interp.distance_to(target);
            let mut prev_dist = at_change;
            let mut prev_scale = interp.base().scale;
            for _ in 0..*frames {
                interp.step(target, &pointer);
                let d = interp.distance_to(target);
                if prev_dist > RESOLVABLE_DISTANCE {
                    prop_assert!(d < prev_dist, "{} !< {}", d, prev_dist);
                } else {
                    prop_assert!(d <= prev_dist + 1e-5);
                }
                prop_assert!(d <= at_change + 1e-5);
                let s = interp.base().scale;
                prop_assert!((target.scale - s) * (target.scale - prev_scale) >= -1e-6);
                prev_dist = d;
                prev_scale = s;
            }
        }
    }

    #[test]
    fn converges_from_anywhere(start in pose_strategy(), target in pose_strategy()) {
        let mut interp = PoseInterpolator::new(&start);
        let pointer = PointerState::neutral();
        for _ in 0..500 {
            interp.step(&target, &pointer);
        }
        prop_assert!(interp.distance_to(&target) < 1e-2);
    }

    #[test]
    fn morph_target_is_monotonic(a in 0.0f32..5000.0, b in 0.0f32..5000.0, vh in 100.0f32..2000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (tl, th) = (morph_target(lo, vh), morph_target(hi, vh));
        prop_assert!(tl <= th);
        prop_assert!((0.0..=1.0).contains(&tl) && (0.0..=1.0).contains(&th));
    }
}
