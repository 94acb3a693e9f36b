use motion_core::config::{MotionConfig, RevealConfig, ScrollConfig};
use motion_core::MotionError;

#[test]
fn test_defaults() {
    let cfg = MotionConfig::default();
    assert_eq!(cfg.field.area_per_particle, 8000.0);
    assert_eq!(cfg.field.link_distance, 150.0);
    assert_eq!(cfg.field.pointer_distance, 200.0);
    assert_eq!(cfg.field.particle_color, [200, 220, 255]);
    assert_eq!(cfg.scroll.start, 0.15);
    assert_eq!(cfg.scroll.end, 1.0);
    assert_eq!(cfg.reveal.threshold, 0.1);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_json_round_trip() {
    let mut cfg = MotionConfig::default();
    cfg.field.speed = 1.25;
    cfg.reveal.reduced_motion = true;

    let json = cfg.to_json().unwrap();
    let back = MotionConfig::from_json(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn test_partial_json_fills_defaults() {
    let cfg = MotionConfig::from_json(r#"{ "scroll": { "start": 0.2 } }"#).unwrap();
    assert_eq!(cfg.scroll.start, 0.2);
    assert_eq!(cfg.scroll.end, 1.0);
    assert_eq!(cfg.field, Default::default());

    let empty = MotionConfig::from_json("{}").unwrap();
    assert_eq!(empty, MotionConfig::default());
}

#[test]
fn test_unknown_field_rejected() {
    let err = MotionConfig::from_json(r#"{ "field": { "lnik_distance": 100 } }"#).unwrap_err();
    assert!(matches!(err, MotionError::Config(_)), "got {:?}", err);
}

#[test]
fn test_invalid_scroll_window_rejected() {
    let err = MotionConfig::from_json(r#"{ "scroll": { "start": 0.9, "end": 0.5 } }"#).unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig(_)), "got {:?}", err);

    let outside = ScrollConfig { end: 1.5, ..Default::default() };
    assert!(outside.validate().is_err());
}

#[test]
fn test_invalid_field_rejected() {
    let err = MotionConfig::from_json(r#"{ "field": { "area_per_particle": 0 } }"#).unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig(_)));

    let err = MotionConfig::from_json(r#"{ "field": { "min_size": 3.0 } }"#).unwrap_err();
    assert!(matches!(err, MotionError::InvalidConfig(_)));
}

#[test]
fn test_reveal_options() {
    let cfg = RevealConfig::default();
    assert_eq!(cfg.root_margin(), "0px 0px -50px 0px");

    let bad = RevealConfig { threshold: 1.5, ..Default::default() };
    assert!(bad.validate().is_err());
}

#[test]
fn test_error_messages() {
    let err = MotionConfig::from_json(r#"{ "scroll": { "start": 0.9, "end": 0.5 } }"#).unwrap_err();
    assert!(err.to_string().contains("0.9"), "{}", err);
}
