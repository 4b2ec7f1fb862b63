use super::*;
use serde_json::json;

#[test]
fn defaults_match_reference_deployment() {
    let cfg = BeeswarmConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.stimuli, vec!["FAM_LL", "FAM_LR", "FAM_RL", "FAM_RR"]);
    assert_eq!(cfg.groups, vec![String::new()]);
    assert_eq!(cfg.dispersion, vec![true, false]);
    assert_eq!(cfg.resample_rate_hz, 15);
    assert!((cfg.stimulus_aspect_ratio - 4.0 / 3.0).abs() < 1e-12);
    assert_eq!(cfg.preprocess.crf, 23);
    assert_eq!(cfg.style.sample_radius, 10.0);
    assert_eq!(cfg.style.centroid_radius, 15.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = BeeswarmConfig::from_reader(
        json!({
            "stimuli": ["FAM_LL"],
            "resample_rate_hz": 30,
            "aspect_ratio_overrides": { "WIDE": 1.7777 },
            "style": { "sample_color": "#00ff00" }
        })
        .to_string()
        .as_bytes(),
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.stimuli, vec!["FAM_LL"]);
    assert_eq!(cfg.resample_rate_hz, 30);
    assert_eq!(cfg.style.sample_color.0, Rgba8::opaque(0, 255, 0));
    assert_eq!(cfg.style.centroid_radius, 15.0);
    assert_eq!(cfg.data_csv, "transformed_data_resampled.csv");
    assert!((cfg.aspect_ratio_for("WIDE") - 1.7777).abs() < 1e-12);
    assert!((cfg.aspect_ratio_for("FAM_LL") - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = BeeswarmConfig::from_reader(json!({"stimulus": ["x"]}).to_string().as_bytes())
        .unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn validate_catches_bad_values() {
    let cfg = BeeswarmConfig {
        resample_rate_hz: 0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = BeeswarmConfig {
        stimulus_aspect_ratio: f64::NAN,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let mut cfg = BeeswarmConfig::default();
    cfg.aspect_ratio_overrides.insert("FAM_LL".to_owned(), 0.0);
    assert!(cfg.validate().is_err());

    let mut cfg = BeeswarmConfig::default();
    cfg.style.sample_radius = -1.0;
    assert!(cfg.validate().is_err());
}

#[test]
fn stimulus_video_lives_in_media_dir() {
    let cfg = BeeswarmConfig::default();
    assert_eq!(
        cfg.stimulus_video_path("FAM_RR"),
        PathBuf::from("./videos").join("FAM_RR.mp4")
    );
}
