use serde::{Deserialize, Deserializer};

/// One resampled eye-tracker observation.
///
/// `win_x`/`win_y` are in on-screen window pixels; `t` is milliseconds on the resampled grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GazeSample {
    /// Participant id exactly as recorded (including the 2-character encoding suffix).
    pub subid: String,
    /// Stimulus name.
    pub stimulus: String,
    /// Resampled timestamp in milliseconds.
    pub t: i64,
    /// Horizontal gaze position in window pixels.
    pub win_x: f64,
    /// Vertical gaze position in window pixels.
    pub win_y: f64,
    /// Window width in pixels.
    pub window_width: f64,
    /// Window height in pixels.
    pub window_height: f64,
}

impl GazeSample {
    /// Participant id with the upstream 2-character suffix removed.
    ///
    /// Exclusion lists and group filters match against this id.
    pub fn participant_id(&self) -> &str {
        strip_id_suffix(&self.subid)
    }
}

/// Drop the trailing two characters of a recorded participant id.
///
/// Ids of two characters or fewer strip to the empty string.
pub fn strip_id_suffix(subid: &str) -> &str {
    match subid.char_indices().rev().nth(1) {
        Some((idx, _)) => &subid[..idx],
        None => "",
    }
}

/// Row shape of the resampled gaze CSV. Extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GazeRecord {
    subid: String,
    stimulus: String,
    #[serde(deserialize_with = "de_millis")]
    t: i64,
    #[serde(rename = "windowHeight")]
    window_height: f64,
    #[serde(rename = "windowWidth")]
    window_width: f64,
    x: Option<f64>,
    y: Option<f64>,
}

impl GazeRecord {
    /// Convert into a sample, or `None` when the row carries no renderable gaze position.
    pub(crate) fn into_sample(self) -> Option<GazeSample> {
        let win_x = self.x.filter(|v| v.is_finite())?;
        let win_y = self.y.filter(|v| v.is_finite())?;
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.window_width) || !positive(self.window_height) {
            return None;
        }
        Some(GazeSample {
            subid: self.subid,
            stimulus: self.stimulus,
            t: self.t,
            win_x,
            win_y,
            window_width: self.window_width,
            window_height: self.window_height,
        })
    }
}

// Resampled exports write `t` either as "66" or "66.0".
fn de_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if !v.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "timestamp must be finite (got {v})"
        )));
    }
    Ok(v.trunc() as i64)
}

#[cfg(test)]
#[path = "../../tests/unit/gaze/sample.rs"]
mod tests;
