//! Run configuration.
//!
//! Every field defaults to the reference deployment: four `FAM_*` stimuli, one all-participant
//! group, both dispersion settings, a 15 Hz resampled grid and a 4:3 stimulus.

/// Config color values.
pub mod color;

use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::config::color::ColorDef;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};

/// Top-level configuration for a beeswarm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeeswarmConfig {
    /// Root holding one subdirectory per data-collection site.
    pub lab_data_dir: PathBuf,
    /// Directory holding `<stimulus>.mp4` source videos.
    pub media_dir: PathBuf,
    /// Directory receiving merged data and rendered videos.
    pub output_dir: PathBuf,
    /// Directory holding the pre-merged CSV when `lab_data_dir` does not exist.
    pub fallback_dir: PathBuf,
    /// Gaze CSV file name (per site, in the fallback dir, and for the merged output).
    pub data_csv: String,
    /// Exclusion list file name.
    pub exclusion_file: String,
    /// Stimulus names to render.
    pub stimuli: Vec<String>,
    /// Participant-group filters (substring of participant id; empty selects all).
    pub groups: Vec<String>,
    /// Dispersion-ellipse settings to render, in order.
    pub dispersion: Vec<bool>,
    /// Rate of the resampled gaze grid in Hz.
    pub resample_rate_hz: u32,
    /// Real-world aspect ratio of the stimuli as presented on screen.
    pub stimulus_aspect_ratio: f64,
    /// Per-stimulus aspect ratio overrides.
    pub aspect_ratio_overrides: BTreeMap<String, f64>,
    /// Marker styling.
    pub style: OverlayStyle,
    /// Frame-counter burn-in options.
    pub preprocess: PreprocessOpts,
}

impl Default for BeeswarmConfig {
    fn default() -> Self {
        Self {
            lab_data_dir: PathBuf::from("./lab_data"),
            media_dir: PathBuf::from("./videos"),
            output_dir: PathBuf::from("./output"),
            fallback_dir: PathBuf::from("."),
            data_csv: "transformed_data_resampled.csv".to_owned(),
            exclusion_file: "participants_excluded_after_pre.txt".to_owned(),
            stimuli: ["FAM_LL", "FAM_LR", "FAM_RL", "FAM_RR"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            groups: vec![String::new()],
            dispersion: vec![true, false],
            resample_rate_hz: 15,
            stimulus_aspect_ratio: 4.0 / 3.0,
            aspect_ratio_overrides: BTreeMap::new(),
            style: OverlayStyle::default(),
            preprocess: PreprocessOpts::default(),
        }
    }
}

impl BeeswarmConfig {
    /// Parse a config from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> BeeswarmResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| BeeswarmError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> BeeswarmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BeeswarmError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> BeeswarmResult<()> {
        if self.resample_rate_hz == 0 {
            return Err(BeeswarmError::validation("resample_rate_hz must be > 0"));
        }
        check_aspect("stimulus_aspect_ratio", self.stimulus_aspect_ratio)?;
        for (name, ratio) in &self.aspect_ratio_overrides {
            check_aspect(&format!("aspect_ratio_overrides[{name}]"), *ratio)?;
        }
        if self.data_csv.trim().is_empty() {
            return Err(BeeswarmError::validation("data_csv must not be empty"));
        }
        if self.exclusion_file.trim().is_empty() {
            return Err(BeeswarmError::validation("exclusion_file must not be empty"));
        }
        if self.stimuli.iter().any(|s| s.trim().is_empty()) {
            return Err(BeeswarmError::validation("stimulus names must not be empty"));
        }
        self.style.validate()
    }

    /// Aspect ratio for `stimulus`, honoring overrides.
    pub fn aspect_ratio_for(&self, stimulus: &str) -> f64 {
        self.aspect_ratio_overrides
            .get(stimulus)
            .copied()
            .unwrap_or(self.stimulus_aspect_ratio)
    }

    /// Source video for `stimulus`.
    pub fn stimulus_video_path(&self, stimulus: &str) -> PathBuf {
        self.media_dir.join(format!("{stimulus}.mp4"))
    }
}

fn check_aspect(name: &str, v: f64) -> BeeswarmResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(BeeswarmError::validation(format!(
            "{name} must be finite and > 0 (got {v})"
        )));
    }
    Ok(())
}

/// Marker sizes and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayStyle {
    /// Radius of each per-sample marker in pixels.
    pub sample_radius: f64,
    /// Per-sample marker fill.
    pub sample_color: ColorDef,
    /// Radius of the centroid marker in pixels.
    pub centroid_radius: f64,
    /// Centroid marker fill.
    pub centroid_color: ColorDef,
    /// Dispersion ellipse stroke width in pixels.
    pub dispersion_stroke_width: f64,
    /// Dispersion ellipse stroke color.
    pub dispersion_color: ColorDef,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            sample_radius: 10.0,
            sample_color: ColorDef(Rgba8::BLUE),
            centroid_radius: 15.0,
            centroid_color: ColorDef(Rgba8::RED),
            dispersion_stroke_width: 3.0,
            dispersion_color: ColorDef(Rgba8::WHITE),
        }
    }
}

impl OverlayStyle {
    /// Reject non-positive or non-finite sizes.
    pub fn validate(&self) -> BeeswarmResult<()> {
        for (name, v) in [
            ("style.sample_radius", self.sample_radius),
            ("style.centroid_radius", self.centroid_radius),
            ("style.dispersion_stroke_width", self.dispersion_stroke_width),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(BeeswarmError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }
}

/// Options for the frame-counter burn-in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreprocessOpts {
    /// Font file handed to `drawtext`; the fontconfig default is used when unset.
    pub font_file: Option<PathBuf>,
    /// x264 constant rate factor for the re-encoded copy.
    pub crf: u8,
}

impl Default for PreprocessOpts {
    fn default() -> Self {
        Self {
            font_file: None,
            crf: 23,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/mod.rs"]
mod tests;
