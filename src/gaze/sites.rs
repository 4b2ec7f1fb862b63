//! Locating, merging, and exclusion-filtering the gaze data of every collection site.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use walkdir::WalkDir;

use crate::config::BeeswarmConfig;
use crate::foundation::error::{BeeswarmError, BeeswarmResult};
use crate::gaze::dataset::GazeDataset;
use crate::gaze::exclusion::ExclusionList;
use crate::gaze::sample::GazeRecord;

/// Where the gaze data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentMode {
    /// One subdirectory per site under the lab data root, merged on load.
    MultiSite {
        /// Site directories in merge order.
        sites: Vec<PathBuf>,
        /// Merged CSV written to the output directory.
        merged_csv: PathBuf,
        /// Merged exclusion list written to the output directory.
        merged_exclusions: PathBuf,
    },
    /// A single pre-merged CSV (and optional exclusion list).
    SingleFile {
        /// CSV that was read.
        csv: PathBuf,
    },
}

/// Result of [`load_gaze_data`].
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Exclusion-filtered dataset.
    pub dataset: GazeDataset,
    /// Every exclusion id that was applied.
    pub exclusions: ExclusionList,
    /// Which layout was found on disk.
    pub mode: DeploymentMode,
    /// CSV rows read across all files.
    pub rows_read: usize,
    /// Rows without a renderable gaze position.
    pub rows_skipped: usize,
    /// Rows removed by the exclusion list.
    pub rows_excluded: usize,
}

/// Load gaze data from whichever layout exists, then apply exclusions.
///
/// Multi-site mode also writes the merged CSV and exclusion list into `output_dir`.
#[tracing::instrument(skip(cfg), fields(lab_data = %cfg.lab_data_dir.display()))]
pub fn load_gaze_data(cfg: &BeeswarmConfig) -> BeeswarmResult<LoadedData> {
    let mut dataset = GazeDataset::new(Vec::new());
    let mut exclusions = ExclusionList::new();
    let mut stats = ReadStats::default();

    let mode = if cfg.lab_data_dir.is_dir() {
        let sites = discover_sites(&cfg.lab_data_dir)?;
        tracing::info!(sites = sites.len(), "joining site data and exclusion lists");

        ensure_dir(&cfg.output_dir)?;
        let merged_csv = cfg.output_dir.join(&cfg.data_csv);
        let merged_exclusions = cfg.output_dir.join(&cfg.exclusion_file);
        let mut merger = MergedCsvWriter::create(&merged_csv)?;

        for site in &sites {
            let csv_path = site.join(&cfg.data_csv);
            if !csv_path.is_file() {
                return Err(BeeswarmError::data(format!(
                    "site '{}' has no '{}'",
                    site.display(),
                    cfg.data_csv
                )));
            }
            let site_stats = read_csv_into(&csv_path, &mut dataset, Some(&mut merger))?;
            tracing::debug!(
                site = %site.display(),
                rows = site_stats.rows,
                skipped = site_stats.skipped,
                "merged site"
            );
            stats.add(site_stats);

            let excl_path = site.join(&cfg.exclusion_file);
            if excl_path.is_file() {
                exclusions.extend(ExclusionList::from_path(&excl_path)?);
            }
        }
        merger.finish()?;

        let f = File::create(&merged_exclusions).with_context(|| {
            format!("create merged exclusion list '{}'", merged_exclusions.display())
        })?;
        exclusions.write_to(BufWriter::new(f))?;
        tracing::info!(
            rows = stats.rows,
            exclusions = exclusions.len(),
            "site data and exclusion lists joined"
        );

        DeploymentMode::MultiSite {
            sites,
            merged_csv,
            merged_exclusions,
        }
    } else {
        let csv_path = cfg.fallback_dir.join(&cfg.data_csv);
        if !csv_path.is_file() {
            return Err(BeeswarmError::data(format!(
                "no gaze data: neither site directory '{}' nor '{}' exists",
                cfg.lab_data_dir.display(),
                csv_path.display()
            )));
        }
        tracing::info!(csv = %csv_path.display(), "reading pre-merged gaze data");
        stats.add(read_csv_into(&csv_path, &mut dataset, None)?);

        let excl_path = cfg.fallback_dir.join(&cfg.exclusion_file);
        if excl_path.is_file() {
            exclusions = ExclusionList::from_path(&excl_path)?;
        }
        DeploymentMode::SingleFile { csv: csv_path }
    };

    if stats.skipped > 0 {
        tracing::warn!(
            skipped = stats.skipped,
            "rows without a renderable gaze position were skipped"
        );
    }

    let rows_excluded = dataset.apply_exclusions(&exclusions);
    tracing::info!(
        excluded_rows = rows_excluded,
        remaining = dataset.len(),
        "applied posterior exclusions"
    );

    Ok(LoadedData {
        dataset,
        exclusions,
        mode,
        rows_read: stats.rows,
        rows_skipped: stats.skipped,
        rows_excluded,
    })
}

/// Create `dir` (and parents).
pub fn ensure_dir(dir: &Path) -> BeeswarmResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn discover_sites(root: &Path) -> BeeswarmResult<Vec<PathBuf>> {
    let mut sites = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("list site directories in '{}'", root.display()))?;
        if entry.file_type().is_dir() {
            sites.push(entry.into_path());
        }
    }
    Ok(sites)
}

#[derive(Debug, Default, Clone, Copy)]
struct ReadStats {
    rows: usize,
    skipped: usize,
}

impl ReadStats {
    fn add(&mut self, other: ReadStats) {
        self.rows += other.rows;
        self.skipped += other.skipped;
    }
}

fn read_csv_into(
    path: &Path,
    dataset: &mut GazeDataset,
    mut merged: Option<&mut MergedCsvWriter>,
) -> BeeswarmResult<ReadStats> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("open gaze csv '{}'", path.display()))?;
    let headers = rdr.headers()?.clone();
    if let Some(m) = merged.as_deref_mut() {
        m.begin_file(path, &headers)?;
    }

    let mut stats = ReadStats::default();
    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record)? {
        stats.rows += 1;
        if let Some(m) = merged.as_deref_mut() {
            m.write(&record)?;
        }
        let row: GazeRecord = record.deserialize(Some(&headers)).map_err(|e| {
            BeeswarmError::data(format!("'{}' row {}: {e}", path.display(), stats.rows))
        })?;
        match row.into_sample() {
            Some(sample) => dataset.push(sample),
            None => stats.skipped += 1,
        }
    }
    Ok(stats)
}

/// Streams rows of several CSV files into one file under the first file's header.
struct MergedCsvWriter {
    path: PathBuf,
    writer: csv::Writer<BufWriter<File>>,
    header: Option<csv::StringRecord>,
    // Source column per merged column, when the current file's header differs.
    remap: Option<Vec<Option<usize>>>,
    scratch: csv::StringRecord,
}

impl MergedCsvWriter {
    fn create(path: &Path) -> BeeswarmResult<Self> {
        let f = File::create(path)
            .with_context(|| format!("create merged csv '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: csv::Writer::from_writer(BufWriter::new(f)),
            header: None,
            remap: None,
            scratch: csv::StringRecord::new(),
        })
    }

    fn begin_file(&mut self, source: &Path, headers: &csv::StringRecord) -> BeeswarmResult<()> {
        let Some(header) = self.header.as_ref() else {
            self.writer.write_record(headers)?;
            self.header = Some(headers.clone());
            self.remap = None;
            return Ok(());
        };

        if header == headers {
            self.remap = None;
            return Ok(());
        }

        let remap: Vec<Option<usize>> = header
            .iter()
            .map(|name| headers.iter().position(|h| h == name))
            .collect();
        let dropped: Vec<&str> = headers
            .iter()
            .filter(|h| !header.iter().any(|name| name == *h))
            .collect();
        if !dropped.is_empty() {
            tracing::warn!(
                file = %source.display(),
                columns = ?dropped,
                "columns missing from the first site's header are not merged"
            );
        }
        self.remap = Some(remap);
        Ok(())
    }

    fn write(&mut self, record: &csv::StringRecord) -> BeeswarmResult<()> {
        match self.remap.as_ref() {
            None => self.writer.write_record(record)?,
            Some(remap) => {
                self.scratch.clear();
                for src in remap {
                    self.scratch
                        .push_field(src.and_then(|i| record.get(i)).unwrap_or(""));
                }
                self.writer.write_record(&self.scratch)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> BeeswarmResult<()> {
        self.writer
            .flush()
            .with_context(|| format!("flush merged csv '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gaze/sites.rs"]
mod tests;
