use super::helpers::{require_node, walk_chapters};
use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::NodePath;
use crate::richtext::{self, plain::word_count};
use crate::store::{Artifact, TreeStore};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Word counts bucketed by the local day a chapter was last written.
///
/// `labels` and `counts` are the same data as `by_day`, flattened into
/// parallel sequences sorted by day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub total_words: usize,
    pub by_day: BTreeMap<NaiveDate, usize>,
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl StatsReport {
    /// Builds a report from per-chapter samples. `window_days == 0` keeps
    /// every day; otherwise only days less than `window_days` before `today`.
    pub fn from_samples<I>(samples: I, window_days: u32, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, usize)>,
    {
        let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for (day, words) in samples {
            if window_days == 0 || (today - day).num_days() < i64::from(window_days) {
                *by_day.entry(day).or_insert(0) += words;
            }
        }

        let total_words = by_day.values().sum();
        let labels = by_day
            .keys()
            .map(|d| d.format(DAY_LABEL_FORMAT).to_string())
            .collect();
        let counts = by_day.values().copied().collect();
        Self {
            total_words,
            by_day,
            labels,
            counts,
        }
    }
}

/// Modification times are bucketed by the machine's local calendar day.
pub fn local_day(mtime: DateTime<Utc>) -> NaiveDate {
    mtime.with_timezone(&Local).date_naive()
}

pub fn run<S: TreeStore>(
    store: &S,
    root: &NodePath,
    window_days: u32,
    today: NaiveDate,
) -> Result<CmdResult> {
    require_node(store, root)?;

    let mut samples = Vec::new();
    for chapter in walk_chapters(store, root)? {
        let Some(mtime) = store.artifact_mtime(&chapter, &Artifact::Content)? else {
            continue;
        };
        let markup = store
            .read_artifact(&chapter, &Artifact::Content)?
            .unwrap_or_default();
        samples.push((local_day(mtime), word_count(&richtext::plain_text(&markup))));
    }
    let chapters = samples.len();
    let report = StatsReport::from_samples(samples, window_days, today);

    let mut result = CmdResult::default().with_affected(root.clone());
    if chapters == 0 {
        result.add_message(CmdMessage::info("No chapters to count"));
    }
    Ok(result.with_stats(report))
}
