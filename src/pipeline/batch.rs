use crate::config::BeeswarmConfig;
use crate::foundation::error::BeeswarmResult;
use crate::gaze::dataset::GazeDataset;
use crate::gaze::sites::ensure_dir;
use crate::media::backend::MediaBackend;
use crate::pipeline::beeswarm::{BeeswarmJob, BeeswarmPipeline, BeeswarmReport};

/// Every `(stimulus, dispersion, group)` combination, stimuli outermost.
pub fn plan_jobs(cfg: &BeeswarmConfig) -> Vec<BeeswarmJob> {
    let mut jobs = Vec::with_capacity(cfg.stimuli.len() * cfg.dispersion.len() * cfg.groups.len());
    for stimulus in &cfg.stimuli {
        for &show_dispersion in &cfg.dispersion {
            for group in &cfg.groups {
                jobs.push(BeeswarmJob::new(stimulus, group, show_dispersion));
            }
        }
    }
    jobs
}

/// Render every planned job in order, stopping at the first failure.
#[tracing::instrument(skip_all, fields(output_dir = %cfg.output_dir.display()))]
pub fn run_batch(
    cfg: &BeeswarmConfig,
    dataset: &GazeDataset,
    backend: &dyn MediaBackend,
) -> BeeswarmResult<Vec<BeeswarmReport>> {
    ensure_dir(&cfg.output_dir)?;
    let pipeline = BeeswarmPipeline::new(cfg, dataset, backend);
    let jobs = plan_jobs(cfg);
    tracing::info!(jobs = jobs.len(), "starting beeswarm batch");

    let mut reports = Vec::with_capacity(jobs.len());
    for job in &jobs {
        reports.push(pipeline.run(job)?);
    }
    Ok(reports)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
