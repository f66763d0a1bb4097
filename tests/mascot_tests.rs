// Host-side tests for themes, meshes and the mascot rigs.
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
    pub mod theme {
        include!("../src/core/theme.rs");
    }
    pub mod mesh {
        include!("../src/core/mesh.rs");
    }
    pub mod mascot {
        include!("../src/core/mascot.rs");
    }
}

use crate::core::interp::{Oscillation, PoseInterpolator};
use crate::core::mascot::*;
use crate::core::mesh::*;
use crate::core::pointer::PointerState;
use crate::core::pose::Pose;
use crate::core::theme::*;
use glam::{Vec2, Vec3};

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgb::from_hex("#ffffff"), Some(Rgb(Vec3::ONE)));
    assert_eq!(Rgb::from_hex("#000000"), Some(Rgb(Vec3::ZERO)));
    let c = Rgb::from_hex("#a855f7").unwrap();
    assert!((c.0.x - srgb_to_linear(168.0 / 255.0)).abs() < 1e-6);
    assert!(Rgb::from_hex("a855f7").is_none());
    assert!(Rgb::from_hex("#a855f").is_none());
    assert!(Rgb::from_hex("#zz55f7").is_none());
}

#[test]
fn hex_colors_decode_to_linear() {
    // Mid grey is about 21.6% linear, not 50%
    let grey = Rgb::from_hex("#808080").unwrap();
    assert!((grey.0.x - 0.2159).abs() < 1e-3);
    assert_eq!(grey.0.x, grey.0.z);
    // Toe of the curve is the linear segment
    let dark = Rgb::from_hex("#010101").unwrap();
    assert!((dark.0.y - 1.0 / 255.0 / 12.92).abs() < 1e-7);
    // Hero purple keeps its hue: blue dominates, green nearly dark
    let hero = Rgb::from_hex("#a855f7").unwrap().0;
    assert!(hero.z > hero.x && hero.x > hero.y);
    assert!(hero.y < 0.1);
}

#[test]
fn srgb_curve_is_monotonic_and_pinned() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    let mut prev = 0.0;
    for i in 1..=255 {
        let v = srgb_to_linear(i as f32 / 255.0);
        assert!(v > prev && v <= i as f32 / 255.0 + 1e-6);
        prev = v;
    }
}

#[test]
fn section_themes_and_fallback() {
    let hero = Theme::for_section(Some("hero"));
    assert_eq!(hero.main, Rgb::from_hex("#a855f7").unwrap());
    assert_eq!(hero.accent, Rgb::from_hex("#ec4899").unwrap());

    let projects = Theme::for_section(Some("projects"));
    assert_eq!(projects.metalness, 0.8);
    assert_eq!(projects.glow_intensity, 4.0);
    assert_eq!(projects.spin, 0.001);

    let highlights = Theme::for_section(Some("highlights"));
    assert_eq!(highlights.roughness, 0.1);
    assert_eq!(highlights.inner_opacity, 0.15);

    assert_eq!(Theme::for_section(Some("skills")).spin, 0.004);
    assert_eq!(Theme::for_section(Some("footer")), hero);
    assert_eq!(Theme::for_section(None), hero);
}

#[test]
fn theme_blends_instead_of_cutting() {
    let mut blender = ThemeBlender::new(Some("hero"));
    let hero = Theme::for_section(Some("hero"));
    let about = Theme::for_section(Some("about"));
    let first = *blender.step(Some("about"));
    assert_ne!(first.main, hero.main);
    assert_ne!(first.main, about.main);
    for _ in 0..400 {
        blender.step(Some("about"));
    }
    assert!(blender.current().main.0.abs_diff_eq(about.main.0, 1e-3));
    assert!((blender.current().glow_intensity - about.glow_intensity).abs() < 1e-3);
}

#[test]
fn sphere_has_grid_topology() {
    let m = MeshData::sphere(1.0, 8);
    assert_eq!(m.vertices.len(), 81);
    assert_eq!(m.indices.len(), 8 * 8 * 6);
    assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    for v in &m.vertices {
        assert!((Vec3::from_array(v.position).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn blob_and_squared_share_topology() {
    let blob = MeshData::blob(16);
    let squared = MeshData::squared(16);
    assert_eq!(blob.indices, squared.indices);
    assert_eq!(blob.vertices.len(), squared.vertices.len());
    assert!(MorphMesh::new(squared, blob).is_some());
    assert!(MorphMesh::new(MeshData::sphere(1.0, 8), MeshData::sphere(1.0, 9)).is_none());
}

#[test]
fn morph_endpoints_reproduce_shapes() {
    let squared = MeshData::squared(12);
    let blob = MeshData::blob(12);
    let mut morph = MorphMesh::new(squared.clone(), blob.clone()).unwrap();
    assert!(morph.apply(0.0));
    assert_eq!(morph.vertices()[10].position, squared.vertices[10].position);
    assert!(!morph.apply(0.0), "unchanged factor skips the rewrite");
    assert!(morph.apply(1.0));
    let p = Vec3::from_array(morph.vertices()[10].position);
    assert!(p.abs_diff_eq(Vec3::from_array(blob.vertices[10].position), 1e-6));
    // Out-of-range factors clamp
    morph.apply(3.0);
    assert_eq!(morph.factor(), Some(1.0));
}

#[test]
fn morphed_normals_are_unit_length() {
    let mut morph = MorphMesh::new(MeshData::squared(12), MeshData::blob(12)).unwrap();
    morph.apply(0.37);
    for v in morph.vertices() {
        let n = Vec3::from_array(v.normal);
        assert!((n.length() - 1.0).abs() < 1e-3 || n == Vec3::ZERO);
    }
}

#[test]
fn closed_meshes_face_outward() {
    for mesh in [
        MeshData::cuboid(Vec3::splat(0.5)),
        MeshData::cylinder(1.0, 1.0, 12),
    ] {
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from_array(mesh.vertices[tri[k] as usize].position));
            let face = (b - a).cross(c - a);
            let n = Vec3::from_array(mesh.vertices[tri[0] as usize].normal);
            assert!(face.dot(n) >= 0.0);
        }
    }
}

#[test]
fn half_torus_is_an_arc() {
    let m = MeshData::half_torus(0.25, 0.04, 8, 16);
    assert!(m.vertices.iter().all(|v| v.position[1] >= -0.04 - 1e-5));
    assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
}

#[test]
fn mascot_kind_cycles_and_parses() {
    assert_eq!(MascotKind::default(), MascotKind::Blob);
    assert_eq!(MascotKind::Blob.next(), MascotKind::Drone);
    assert_eq!(MascotKind::Drone.next(), MascotKind::Robot);
    assert_eq!(MascotKind::Robot.next(), MascotKind::Blob);
    assert_eq!(MascotKind::Blob.switch_label(), "Switch to Drone");
    assert_eq!(MascotKind::Robot.switch_label(), "Switch to Blob");
    assert_eq!("drone".parse::<MascotKind>(), Ok(MascotKind::Drone));
    assert_eq!(" ROBOT ".parse::<MascotKind>(), Ok(MascotKind::Robot));
    let err = "teapot".parse::<MascotKind>().unwrap_err();
    assert_eq!(err, UnknownMascot("teapot".to_string()));
}

#[test]
fn eyes_converge_to_center_for_neutral_pointer() {
    let mut eyes = EyeTracker::default();
    let corner = PointerState::from_client(0.0, 0.0, 100.0, 100.0);
    for _ in 0..50 {
        eyes.step(&corner);
    }
    assert!(eyes.offset().length() > 0.05);
    assert!(eyes.offset().length() <= 0.15 + 1e-6);
    for _ in 0..300 {
        eyes.step(&PointerState::neutral());
    }
    assert!(eyes.offset().abs_diff_eq(Vec2::ZERO, 1e-5));
}

fn draw_one(mascot: &mut dyn Mascot, pointer: &PointerState, morph: f32) -> DrawList {
    let theme = Theme::for_section(Some("hero"));
    let interp = PoseInterpolator::new(&Pose::fallback());
    mascot.update(pointer, &theme);
    let mut out = DrawList::default();
    let input = FrameInput {
        pose: interp.rendered(),
        pointer,
        theme: &theme,
        osc: &Oscillation::default(),
        morph,
    };
    mascot.draw(&input, &mut out);
    out
}

#[test]
fn every_variant_draws_parts_and_lights() {
    for kind in MascotKind::ALL {
        let mut mascot = make_mascot(kind);
        assert_eq!(mascot.kind(), kind);
        let out = draw_one(mascot.as_mut(), &PointerState::neutral(), 0.5);
        assert!(!out.parts.is_empty(), "{kind} drew nothing");
        assert!(!out.lights.is_empty() && out.lights.len() <= 8);
        assert!(out.parts.iter().all(|p| p.model.is_finite()));
        // Parts stay inline and fit the renderer's instance buffer
        assert!(!out.parts.spilled() && out.parts.len() <= 64);
    }
}

#[test]
fn only_the_blob_uses_the_morph_body() {
    let blob = draw_one(make_mascot(MascotKind::Blob).as_mut(), &PointerState::neutral(), 0.25);
    assert_eq!(blob.morph, Some(0.25));
    assert!(blob.parts.iter().any(|p| p.mesh == MeshId::Body));
    for kind in [MascotKind::Drone, MascotKind::Robot] {
        let out = draw_one(make_mascot(kind).as_mut(), &PointerState::neutral(), 0.25);
        assert_eq!(out.morph, None);
        assert!(out.parts.iter().all(|p| p.mesh != MeshId::Body));
    }
}

#[test]
fn drone_gimbal_tracks_pointer() {
    let mut drone = DroneRig::default();
    let theme = Theme::for_section(None);
    let right = PointerState::from_client(100.0, 50.0, 100.0, 100.0);
    for _ in 0..200 {
        drone.update(&right, &theme);
    }
    assert!((drone.gimbal().x - 0.6).abs() < 1e-3);
    assert!(drone.gimbal().y.abs() < 1e-3);
}

#[test]
fn robot_head_turns_toward_pointer() {
    let mut robot = RobotRig::default();
    let theme = Theme::for_section(None);
    let top = PointerState::from_client(50.0, 0.0, 100.0, 100.0);
    for _ in 0..200 {
        robot.update(&top, &theme);
    }
    assert!(robot.head().x.abs() < 1e-3);
    assert!((robot.head().y + 0.25).abs() < 1e-3);
}

#[test]
fn draw_list_clear_resets_everything() {
    let mut out = draw_one(make_mascot(MascotKind::Blob).as_mut(), &PointerState::neutral(), 1.0);
    out.clear();
    assert!(out.parts.is_empty() && out.lights.is_empty());
    assert_eq!(out.morph, None);
}
