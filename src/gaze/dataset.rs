use std::collections::{BTreeMap, BTreeSet};

use crate::gaze::exclusion::ExclusionList;
use crate::gaze::sample::GazeSample;

/// Ordered, read-only collection of gaze samples.
#[derive(Debug, Clone, Default)]
pub struct GazeDataset {
    samples: Vec<GazeSample>,
}

impl GazeDataset {
    /// Wrap an existing sample vector.
    pub fn new(samples: Vec<GazeSample>) -> Self {
        Self { samples }
    }

    /// Empty dataset with room for `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    /// Append one sample.
    pub fn push(&mut self, sample: GazeSample) {
        self.samples.push(sample);
    }

    /// Samples in load order.
    pub fn samples(&self) -> &[GazeSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct suffix-stripped participant ids.
    pub fn participants(&self) -> BTreeSet<&str> {
        self.samples.iter().map(|s| s.participant_id()).collect()
    }

    /// Drop every row whose stripped participant id is listed; returns the number removed.
    pub fn apply_exclusions(&mut self, exclusions: &ExclusionList) -> usize {
        if exclusions.is_empty() {
            return 0;
        }
        let before = self.samples.len();
        self.samples
            .retain(|s| !exclusions.contains(s.participant_id()));
        before - self.samples.len()
    }

    /// Rows for one stimulus whose participant id (suffix stripped) contains `group`, keyed by
    /// resampled time.
    ///
    /// An empty `group` selects every participant.
    pub fn select<'a>(&'a self, stimulus: &str, group: &str) -> StimulusSelection<'a> {
        let mut by_time: BTreeMap<i64, Vec<&'a GazeSample>> = BTreeMap::new();
        let mut rows = 0usize;
        for s in &self.samples {
            if s.stimulus == stimulus && s.participant_id().contains(group) {
                by_time.entry(s.t).or_default().push(s);
                rows += 1;
            }
        }
        StimulusSelection {
            stimulus: stimulus.to_owned(),
            group: group.to_owned(),
            by_time,
            rows,
        }
    }
}

impl FromIterator<GazeSample> for GazeDataset {
    fn from_iter<I: IntoIterator<Item = GazeSample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Rows of one `(stimulus, group)` pair, bucketed by exact resampled timestamp.
#[derive(Debug, Clone)]
pub struct StimulusSelection<'a> {
    stimulus: String,
    group: String,
    by_time: BTreeMap<i64, Vec<&'a GazeSample>>,
    rows: usize,
}

impl<'a> StimulusSelection<'a> {
    /// Rows whose `t` equals `t` exactly, in dataset order. Duplicates are kept.
    pub fn rows_at(&self, t: i64) -> &[&'a GazeSample] {
        self.by_time.get(&t).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Selected stimulus.
    pub fn stimulus(&self) -> &str {
        &self.stimulus
    }

    /// Participant-group filter.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Total selected rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// `true` when no row matched.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of distinct timestamps.
    pub fn bucket_count(&self) -> usize {
        self.by_time.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gaze/dataset.rs"]
mod tests;
