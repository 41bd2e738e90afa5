use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use dualpage_dom::{BodyRegion, ElementScope, MarkupDocument, Variant};
use serde::Serialize;
use tracing::debug;

use crate::classify::{classify, Keyed};
use crate::compose::splice;
use crate::config::MergeConfig;
use crate::dedup::dedup_ordered;
use crate::error::{MergeError, MergeResult};
use crate::io::{load_documents, write_and_cleanup};

// ---------------------------------------------------------------------------
// Stage timing
// ---------------------------------------------------------------------------

/// The stages of a merge run, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    Parse,
    Classify,
    Dedup,
    Compose,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::Parse => "parse",
            Self::Classify => "classify",
            Self::Dedup => "dedup",
            Self::Compose => "compose",
            Self::Write => "write",
        };
        f.write_str(name)
    }
}

/// Wall-clock time one stage took.
#[derive(Clone, Debug, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed: Duration,
}

#[derive(Default)]
struct StageTimer {
    timings: Vec<StageTiming>,
}

impl StageTimer {
    fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        let elapsed = start.elapsed();
        debug!(%stage, elapsed_us = elapsed.as_micros() as u64, "stage complete");
        self.timings.push(StageTiming { stage, elapsed });
        out
    }
}

// ---------------------------------------------------------------------------
// Plan and report
// ---------------------------------------------------------------------------

/// What a deduplication pass kept and how much it dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    /// Dedup keys of the kept elements, in output order.
    pub kept: Vec<String>,
    /// Number of elements dropped as duplicates.
    pub dropped: usize,
}

/// The merged document and how it was assembled. Nothing has been written.
#[derive(Clone, Debug, Serialize)]
pub struct MergePlan {
    pub legacy: PathBuf,
    pub modern: PathBuf,
    /// Body region of the legacy document that was replaced.
    pub region: BodyRegion,
    pub content: ElementSummary,
    pub resources: ElementSummary,
    pub timings: Vec<StageTiming>,
    /// The composite document text.
    #[serde(skip)]
    pub document: String,
    #[serde(skip)]
    body_end: usize,
}

impl MergePlan {
    /// The new body content of the composite document.
    pub fn body(&self) -> &str {
        self.document
            .get(self.region.start..self.body_end)
            .unwrap_or_default()
    }
}

/// Outcome of a completed run: the plan plus what was written and removed.
#[derive(Clone, Debug, Serialize)]
pub struct MergeReport {
    #[serde(flatten)]
    pub plan: MergePlan,
    pub output: PathBuf,
    pub removed_inputs: Vec<PathBuf>,
    pub kept_inputs: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Merge two parsed documents in memory.
///
/// The result is the legacy document with its body replaced by the
/// deduplicated content of both bodies followed by their deduplicated
/// resource references.
pub fn merge_documents(
    legacy: &MarkupDocument,
    modern: &MarkupDocument,
    scope: ElementScope,
) -> MergeResult<MergePlan> {
    let mut timer = StageTimer::default();
    let region = legacy.body_region()?;
    merge_timed(legacy, modern, region, scope, &mut timer)
}

fn merge_timed(
    legacy: &MarkupDocument,
    modern: &MarkupDocument,
    region: BodyRegion,
    scope: ElementScope,
    timer: &mut StageTimer,
) -> MergeResult<MergePlan> {
    let (legacy_elems, modern_elems) = timer.time(Stage::Classify, || {
        Ok::<_, MergeError>((classify(legacy, scope)?, classify(modern, scope)?))
    })?;

    let (content, resources) = timer.time(Stage::Dedup, || {
        (
            dedup_ordered(legacy_elems.content, modern_elems.content),
            dedup_ordered(legacy_elems.resources, modern_elems.resources),
        )
    });
    debug!(
        content = content.items.len(),
        content_dropped = content.dropped,
        resources = resources.items.len(),
        resources_dropped = resources.dropped,
        "deduplicated body elements"
    );

    let document = timer.time(Stage::Compose, || {
        splice(legacy.raw(), region, &content.items, &resources.items)
    })?;
    let body_end = document.len() - (legacy.raw().len() - region.end);

    Ok(MergePlan {
        legacy: legacy.path().to_path_buf(),
        modern: modern.path().to_path_buf(),
        region,
        content: summarize(&content.items, content.dropped),
        resources: summarize(&resources.items, resources.dropped),
        timings: std::mem::take(&mut timer.timings),
        document,
        body_end,
    })
}

fn summarize<T: Keyed>(items: &[T], dropped: usize) -> ElementSummary {
    ElementSummary {
        kept: items.iter().map(|i| i.dedup_key().to_string()).collect(),
        dropped,
    }
}

// ---------------------------------------------------------------------------
// MergePipeline
// ---------------------------------------------------------------------------

/// Runs a merge end to end: load, parse, classify, dedup, compose, write.
///
/// The pipeline is **fail-fast**: the first error aborts the run, and no
/// output is written unless every stage before the write succeeded.
pub struct MergePipeline {
    config: MergeConfig,
}

impl MergePipeline {
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Build the composite document without touching the filesystem beyond
    /// reading the inputs.
    pub fn plan(&self) -> MergeResult<MergePlan> {
        let mut timer = StageTimer::default();
        self.plan_timed(&mut timer)
    }

    /// Build the composite document, write it, and remove the inputs.
    pub fn run(&self) -> MergeResult<MergeReport> {
        let mut timer = StageTimer::default();
        let mut plan = self.plan_timed(&mut timer)?;

        let output = self.config.output_path();
        let cleanup = timer.time(Stage::Write, || {
            write_and_cleanup(
                &output,
                &plan.document,
                &[plan.legacy.as_path(), plan.modern.as_path()],
                self.config.keep_inputs,
            )
        })?;
        plan.timings.append(&mut timer.timings);

        Ok(MergeReport {
            plan,
            output,
            removed_inputs: cleanup.removed,
            kept_inputs: cleanup.kept,
        })
    }

    fn plan_timed(&self, timer: &mut StageTimer) -> MergeResult<MergePlan> {
        let legacy_path = self.config.legacy_path();
        let modern_path = self.config.modern_path();

        let sources = timer.time(Stage::Load, || load_documents(&legacy_path, &modern_path))?;

        let (legacy, modern, region) = timer.time(Stage::Parse, || {
            let legacy = MarkupDocument::parse(Variant::Legacy, legacy_path.as_path(), sources.legacy);
            let modern = MarkupDocument::parse(Variant::Modern, modern_path.as_path(), sources.modern);
            let region = legacy.body_region()?;
            Ok::<_, MergeError>((legacy, modern, region))
        })?;

        merge_timed(&legacy, &modern, region, self.config.scope, timer)
    }
}
