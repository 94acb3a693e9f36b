use motion_core::config::ScrollConfig;
use motion_core::scroll::{raw_progress, PhaseOutputs, ScrollController, ScrollWindow};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_raw_progress() {
    assert_eq!(raw_progress(0.0, 1000.0), 0.0);
    assert_eq!(raw_progress(300.0, 1000.0), 0.0);
    assert!(approx(raw_progress(-500.0, 1000.0), 0.5));
    assert_eq!(raw_progress(-1000.0, 1000.0), 1.0);
    assert_eq!(raw_progress(-5000.0, 1000.0), 1.0);
}

#[test]
fn test_raw_progress_degenerate_viewport() {
    assert_eq!(raw_progress(-500.0, 0.0), 0.0);
    assert_eq!(raw_progress(-500.0, -10.0), 0.0);
    assert_eq!(raw_progress(-500.0, f32::NAN), 0.0);
    assert_eq!(raw_progress(f32::NAN, 1000.0), 0.0);
}

#[test]
fn test_phase_window() {
    let w = ScrollWindow::default();
    assert_eq!(w.phase(0.0), 0.0);
    assert_eq!(w.phase(0.1), 0.0);
    assert_eq!(w.phase(0.15), 0.0);
    assert!(approx(w.phase(0.575), 0.5));
    assert_eq!(w.phase(1.0), 1.0);
}

#[test]
fn test_phase_monotonic_in_scroll() {
    let mut c = ScrollController::new(ScrollConfig::default());
    let mut prev = 0.0;
    for step in 0..=300 {
        c.update(-(step as f32) * 5.0, 1000.0);
        assert!(c.phase() >= prev, "phase dropped at step {}", step);
        assert!((0.0..=1.0).contains(&c.phase()));
        prev = c.phase();
    }
    assert_eq!(c.phase(), 1.0);
}

#[test]
fn test_outputs_at_rest() {
    let cfg = ScrollConfig::default();
    let out = PhaseOutputs::compute(0.0, 1000.0, &cfg);
    assert_eq!(out.eased, 0.0);
    assert!(approx(out.text_translate_y, 1000.0 * 0.7 + 140.0));
    assert_eq!(out.text_opacity, 0.0);
    assert_eq!(out.overlay_opacity, 0.0);
    assert_eq!(out.overlay_blur, 0.0);
}

#[test]
fn test_outputs_fully_revealed() {
    let cfg = ScrollConfig::default();
    let out = PhaseOutputs::compute(1.0, 1000.0, &cfg);
    assert_eq!(out.eased, 1.0);
    assert_eq!(out.text_translate_y, 0.0);
    assert!(approx(out.text_opacity, 1.0));
    assert!(approx(out.overlay_opacity, 0.75));
    assert!(approx(out.overlay_blur, 16.0));
}

#[test]
fn test_text_stays_hidden_below_fade_start() {
    let cfg = ScrollConfig::default();
    // ease_out_cubic(0.03) is about 0.087, still under the 0.1 fade start
    let out = PhaseOutputs::compute(0.03, 800.0, &cfg);
    assert!(out.eased > 0.0 && out.eased < 0.1);
    assert_eq!(out.text_opacity, 0.0);
    assert!(out.overlay_opacity > 0.0);
}

#[test]
fn test_pinned_until_phase_completes() {
    let mut c = ScrollController::new(ScrollConfig::default());
    c.update(0.0, 1000.0);
    assert!(c.pinned());

    c.update(-600.0, 1000.0);
    assert!(c.pinned());
    assert!(c.phase() > 0.0 && c.phase() < 1.0);

    c.update(-1000.0, 1000.0);
    assert!(!c.pinned());
    assert_eq!(c.raw(), 1.0);
    assert_eq!(c.viewport_height(), 1000.0);
}

#[test]
fn test_custom_window() {
    let cfg = ScrollConfig { start: 0.0, end: 0.5, ..Default::default() };
    let mut c = ScrollController::new(cfg);
    c.update(-250.0, 1000.0);
    assert!(approx(c.phase(), 0.5));
    c.update(-500.0, 1000.0);
    assert_eq!(c.phase(), 1.0);
}
