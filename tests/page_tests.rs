// Host-side tests for keyboard shortcuts, reveal-on-scroll and hero parallax.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod pose {
        include!("../src/core/pose.rs");
    }
    pub mod keys {
        include!("../src/core/keys.rs");
    }
    pub mod reveal {
        include!("../src/core/reveal.rs");
    }
}

use crate::core::keys::*;
use crate::core::reveal::*;
use proptest::prelude::*;

#[test]
fn mascot_key_is_case_insensitive() {
    assert_eq!(command_for_key("m"), Some(KeyCommand::CycleMascot));
    assert_eq!(command_for_key("M"), Some(KeyCommand::CycleMascot));
    assert_eq!(command_for_key("Escape"), Some(KeyCommand::CloseContact));
}

#[test]
fn digits_jump_to_sections_in_order() {
    let expected = ["hero", "about", "skills", "highlights", "projects", "publications"];
    for (i, id) in expected.into_iter().enumerate() {
        let key = (i + 1).to_string();
        assert_eq!(command_for_key(&key), Some(KeyCommand::JumpTo(id)));
    }
    assert_eq!(command_for_key("0"), None);
    assert_eq!(command_for_key("7"), None);
    assert_eq!(command_for_key("-1"), None);
    assert_eq!(command_for_key("x"), None);
    assert_eq!(command_for_key("Enter"), None);
}

#[test]
fn visible_fraction_cases() {
    // Fully inside
    assert_eq!(visible_fraction(100.0, 200.0, 800.0), 1.0);
    // Half below the fold
    assert_eq!(visible_fraction(700.0, 200.0, 800.0), 0.5);
    // Scrolled past
    assert_eq!(visible_fraction(-300.0, 200.0, 800.0), 0.0);
    // Taller than the viewport
    assert_eq!(visible_fraction(0.0, 1600.0, 800.0), 0.5);
    // Degenerate sizes
    assert_eq!(visible_fraction(0.0, 0.0, 800.0), 0.0);
    assert_eq!(visible_fraction(0.0, 100.0, 0.0), 0.0);
    assert_eq!(visible_fraction(0.0, f32::NAN, 800.0), 0.0);
}

#[test]
fn reveal_needs_a_fifth_on_screen() {
    assert!(!should_reveal(790.0, 100.0, 800.0));
    assert!(should_reveal(780.0, 100.0, 800.0));
    assert!(should_reveal(0.0, 100.0, 800.0));
    assert!(!should_reveal(900.0, 100.0, 800.0));
}

#[test]
fn hero_parallax_keyframes() {
    assert_eq!(hero_parallax(0.0), Parallax { translate_pct: 0.0, opacity: 1.0 });
    let mid = hero_parallax(0.5);
    assert!((mid.translate_pct - 15.0).abs() < 1e-5);
    assert!((mid.opacity - 0.8).abs() < 1e-5);
    let end = hero_parallax(1.0);
    assert!((end.translate_pct - 30.0).abs() < 1e-5);
    assert!(end.opacity.abs() < 1e-5);
    let quarter = hero_parallax(0.25);
    assert!((quarter.opacity - 0.9).abs() < 1e-5);
}

#[test]
fn hero_parallax_clamps_out_of_range_progress() {
    assert_eq!(hero_parallax(-2.0), hero_parallax(0.0));
    assert_eq!(hero_parallax(5.0), hero_parallax(1.0));
    assert_eq!(hero_parallax(f32::NAN), hero_parallax(0.0));
    assert_eq!(hero_parallax(f32::INFINITY), hero_parallax(0.0));
}

proptest! {
    #[test]
    fn visible_fraction_is_a_fraction(top in -5000.0f32..5000.0, h in 0.0f32..3000.0, vh in 0.0f32..2000.0) {
        let f = visible_fraction(top, h, vh);
        prop_assert!((0.0..=1.0).contains(&f));
    }

    #[test]
    fn parallax_fades_monotonically(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (p_lo, p_hi) = (hero_parallax(lo), hero_parallax(hi));
        prop_assert!(p_hi.opacity <= p_lo.opacity + 1e-6);
        prop_assert!(p_hi.translate_pct >= p_lo.translate_pct);
        prop_assert!((0.0..=1.0).contains(&p_lo.opacity));
    }
}
