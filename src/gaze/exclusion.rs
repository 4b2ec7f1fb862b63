use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use anyhow::Context as _;

use crate::foundation::error::BeeswarmResult;

/// Participants removed after data collection ("posterior exclusion").
///
/// Ids keep file order (duplicates included) so a merged list can be written back verbatim.
#[derive(Debug, Clone, Default)]
pub struct ExclusionList {
    ids: Vec<String>,
    lookup: HashSet<String>,
}

impl ExclusionList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one id per line; trailing whitespace is stripped and blank lines skipped.
    pub fn from_reader<R: BufRead>(r: R) -> BeeswarmResult<Self> {
        let mut list = Self::new();
        for line in r.lines() {
            let line = line.context("read exclusion list line")?;
            list.push(line.trim_end());
        }
        Ok(list)
    }

    /// Read an exclusion list from disk.
    pub fn from_path(path: &Path) -> BeeswarmResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open exclusion list '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Append an id; blank ids are ignored.
    ///
    /// A blank line therefore never excludes anyone, even a participant whose
    /// suffix-stripped id is empty (a raw id of two characters or fewer).
    pub fn push(&mut self, id: &str) {
        if id.trim().is_empty() {
            return;
        }
        self.lookup.insert(id.to_owned());
        self.ids.push(id.to_owned());
    }

    /// Append every id of `other`, keeping order.
    pub fn extend(&mut self, other: ExclusionList) {
        for id in other.ids {
            self.lookup.insert(id.clone());
            self.ids.push(id);
        }
    }

    /// `true` when `participant` (already suffix-stripped) is excluded.
    pub fn contains(&self, participant: &str) -> bool {
        self.lookup.contains(participant)
    }

    /// Ids in file order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of listed ids, duplicates included.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// `true` when nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Write one id per line.
    pub fn write_to<W: Write>(&self, mut w: W) -> BeeswarmResult<()> {
        for id in &self.ids {
            writeln!(w, "{id}").context("write exclusion list")?;
        }
        w.flush().context("flush exclusion list")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gaze/exclusion.rs"]
mod tests;
