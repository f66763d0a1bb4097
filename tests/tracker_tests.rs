// Host-side tests for the scroll-section tracker.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod pose {
        include!("../src/core/pose.rs");
    }
    pub mod tracker {
        include!("../src/core/tracker.rs");
    }
}

use crate::core::pose::*;
use crate::core::tracker::*;

const VH: f32 = 800.0;

// Six 1000px sections stacked from the top, then a 400px footer.
fn layout(id: &str) -> Option<Span> {
    if id == FOOTER_ID {
        return Some(Span::new(6000.0, 400.0));
    }
    SECTIONS.iter().position(|s| s.id == id).map(|i| Span::new(i as f32 * 1000.0, 1000.0))
}

fn tracker() -> SectionTracker {
    let mut t = SectionTracker::new();
    t.refresh(VH, layout);
    t
}

fn scroll(t: &mut SectionTracker, y: f32) -> Vec<Pose> {
    let mut out = Vec::new();
    t.update(y, |p| out.push(p.clone()));
    out
}

fn pose_of(id: &str) -> Pose {
    section_pose(id).unwrap()
}

#[test]
fn section_table_is_in_document_order() {
    let ids: Vec<_> = SECTIONS.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        ["hero", "about", "skills", "highlights", "projects", "publications"]
    );
    let hero = pose_of("hero");
    assert_eq!(hero.position, glam::Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(hero.scale, 0.8);
    assert_eq!(hero.section, Some("hero"));
    assert!(section_pose("contact").is_none());
}

#[test]
fn centered_window_spans_viewport_center() {
    let w = TriggerWindow::centered(Span::new(1000.0, 1000.0), VH);
    assert_eq!(w.start, 600.0);
    assert_eq!(w.end, 1600.0);
    assert_eq!(w.phase(599.0), Phase::Before);
    assert_eq!(w.phase(600.0), Phase::Active);
    assert_eq!(w.phase(1599.0), Phase::Active);
    assert_eq!(w.phase(1600.0), Phase::After);
}

#[test]
fn footer_window_has_no_end() {
    let w = TriggerWindow::from_viewport_bottom(Span::new(6000.0, 400.0), VH);
    assert_eq!(w.start, 5200.0);
    assert_eq!(w.phase(1.0e9), Phase::Active);
}

#[test]
fn load_at_top_enters_hero() {
    let mut t = tracker();
    assert_eq!(scroll(&mut t, 0.0), vec![pose_of("hero")]);
    assert_eq!(t.current(), Some(&pose_of("hero")));
}

#[test]
fn load_mid_page_enters_visible_section_only() {
    let mut t = tracker();
    assert_eq!(scroll(&mut t, 3000.0), vec![pose_of("highlights")]);
}

#[test]
fn hero_to_footer_and_back() {
    let mut t = tracker();
    assert_eq!(scroll(&mut t, 0.0), vec![pose_of("hero")]);
    assert_eq!(scroll(&mut t, 1000.0), vec![pose_of("about")]);
    // Within the same section nothing fires
    assert!(scroll(&mut t, 1200.0).is_empty());

    // Footer reaches the viewport bottom: neutral pose tagged footer
    let into_footer = scroll(&mut t, 5300.0);
    assert_eq!(into_footer, vec![Pose::neutral()]);
    assert_eq!(into_footer[0].section, Some(FOOTER_ID));
    assert_eq!(into_footer[0].scale, 1.0);

    // Leaving the footer upward restores the last section
    assert_eq!(scroll(&mut t, 5000.0), vec![pose_of("publications")]);
}

#[test]
fn scrolling_the_whole_page_visits_every_section_in_order() {
    let mut t = tracker();
    let mut down = Vec::new();
    for step in 0..=570 {
        down.extend(scroll(&mut t, step as f32 * 10.0));
    }
    let mut expected: Vec<Pose> = SECTIONS.iter().map(|s| s.pose()).collect();
    expected.push(Pose::neutral());
    assert_eq!(down, expected);

    // Back up out of the footer: publications is restored exactly once
    let mut up = Vec::new();
    for step in (500..570).rev() {
        up.extend(scroll(&mut t, step as f32 * 10.0));
    }
    assert_eq!(up, vec![pose_of("publications")]);
    assert_eq!(t.current(), Some(&pose_of("publications")));
}

#[test]
fn footer_suppresses_section_events() {
    let mut t = tracker();
    scroll(&mut t, 0.0);
    scroll(&mut t, 5300.0);
    // Publications leaves while the footer stays active
    assert!(scroll(&mut t, 5600.0).is_empty());
    assert_eq!(t.current(), Some(&Pose::neutral()));
}

#[test]
fn re_entering_a_section_yields_the_same_pose() {
    let mut t = tracker();
    scroll(&mut t, 0.0);
    let first = scroll(&mut t, 2000.0);
    assert_eq!(scroll(&mut t, 1000.0), vec![pose_of("about")]);
    let second = scroll(&mut t, 2000.0);
    assert_eq!(first, vec![pose_of("skills")]);
    assert_eq!(first, second);
}

#[test]
fn scrolling_up_fires_enter_back() {
    let mut t = tracker();
    scroll(&mut t, 4000.0);
    assert_eq!(scroll(&mut t, 3500.0), vec![pose_of("highlights")]);
}

#[test]
fn jumped_over_sections_emit_nothing() {
    let mut t = tracker();
    scroll(&mut t, 0.0);
    // About, skills, highlights are crossed entirely; only projects fires
    assert_eq!(scroll(&mut t, 4000.0), vec![pose_of("projects")]);
}

#[test]
fn missing_anchors_fall_back_to_default_pose() {
    let mut t = SectionTracker::new();
    t.refresh(VH, |_| None);
    assert_eq!(t.missing().len(), SECTIONS.len());
    assert_eq!(scroll(&mut t, 0.0), vec![Pose::fallback()]);
    // The fallback is emitted once, not on every update
    assert!(scroll(&mut t, 10.0).is_empty());
}

#[test]
fn one_missing_anchor_keeps_the_rest_working() {
    let mut t = SectionTracker::new();
    t.refresh(VH, |id| if id == "about" { None } else { layout(id) });
    assert_eq!(t.missing(), &["about"]);
    assert_eq!(scroll(&mut t, 0.0), vec![pose_of("hero")]);
    assert!(scroll(&mut t, 1000.0).is_empty());
    assert_eq!(scroll(&mut t, 2000.0), vec![pose_of("skills")]);
}

#[test]
fn refresh_re_derives_the_active_section() {
    let mut t = tracker();
    scroll(&mut t, 2000.0);
    t.refresh(VH, layout);
    assert_eq!(scroll(&mut t, 2000.0), vec![pose_of("skills")]);
}

#[test]
fn non_finite_scroll_is_ignored() {
    let mut t = tracker();
    scroll(&mut t, 0.0);
    assert!(scroll(&mut t, f32::NAN).is_empty());
    assert_eq!(t.current(), Some(&pose_of("hero")));
}

#[test]
fn last_section_pose_is_publications() {
    assert_eq!(SectionTracker::new().last_section_pose(), pose_of("publications"));
}
