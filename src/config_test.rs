#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn empty_input_yields_defaults() {
    let cfg = CanvasConfig::from_json("").unwrap();
    assert_eq!(cfg, CanvasConfig::default());
    assert_eq!(cfg.handle_size, HANDLE_SIZE_PX);
    assert_eq!(cfg.min_media_side, MIN_MEDIA_SIDE_PX);
    assert_eq!(cfg.history_capacity, DEFAULT_HISTORY_CAPACITY);
    assert_eq!(cfg.default_color, Color::BLACK);
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let cfg = CanvasConfig::from_json(r##"{"handle_size": 16, "default_color": "#ff0000"}"##).unwrap();
    assert_eq!(cfg.handle_size, 16.0);
    assert_eq!(cfg.default_color, Color::rgba(255, 0, 0, 255));
    assert_eq!(cfg.min_media_side, MIN_MEDIA_SIDE_PX);
    assert_eq!(cfg.insert_max_fraction, INSERT_MAX_FRACTION);
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(CanvasConfig::from_json("{nope"), Err(ConfigError::Parse(_))));
}

#[test]
fn bad_color_is_parse_error() {
    assert!(matches!(
        CanvasConfig::from_json(r#"{"default_color": "teal"}"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn validate_rejects_out_of_range_values() {
    assert!(matches!(
        CanvasConfig::from_json(r#"{"handle_size": 0}"#),
        Err(ConfigError::HandleSize(_))
    ));
    assert!(matches!(
        CanvasConfig::from_json(r#"{"min_media_side": -5}"#),
        Err(ConfigError::MinMediaSide(_))
    ));
    assert!(matches!(
        CanvasConfig::from_json(r#"{"insert_max_fraction": 1.5}"#),
        Err(ConfigError::InsertFraction(_))
    ));
    assert_eq!(
        CanvasConfig::from_json(r#"{"history_capacity": 1}"#),
        Err(ConfigError::HistoryCapacity(1))
    );
    assert!(matches!(
        CanvasConfig::from_json(r#"{"min_brush_size": 10, "max_brush_size": 5}"#),
        Err(ConfigError::BrushRange { .. })
    ));
}

#[test]
fn clamp_brush_size_respects_range() {
    let cfg = CanvasConfig::default();
    assert_eq!(cfg.clamp_brush_size(0.5), MIN_BRUSH_SIZE);
    assert_eq!(cfg.clamp_brush_size(500.0), MAX_BRUSH_SIZE);
    assert_eq!(cfg.clamp_brush_size(12.0), 12.0);
    assert_eq!(cfg.clamp_brush_size(f64::NAN), DEFAULT_BRUSH_SIZE);
}

#[test]
fn config_error_messages_name_the_value() {
    assert_eq!(ConfigError::HistoryCapacity(1).to_string(), "history capacity must be at least 2, got 1");
}
