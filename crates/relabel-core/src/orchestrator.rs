//! Cycle-safe rename orchestrator.
//!
//! One batch runs in four phases:
//!
//! 1. Build the [`SymbolTable`] (a parse failure aborts the batch)
//! 2. Plan: classify entries, decompose the rename graph, order chains and
//!    break cycles with temporary names ([`plan_batch`])
//! 3. Execute the plan step by step against an [`OffsetTrackingBuffer`]
//! 4. Optionally verify that the final text still parses
//!
//! Any error in phases 1-4 is fatal and no text is returned. Entries that
//! are no-ops or name something absent from the source are recorded in the
//! report and never abort the batch.

use tracing::{debug, info, info_span};

use crate::adapter::LanguageAdapter;
use crate::buffer::OffsetTrackingBuffer;
use crate::error::{RelabelError, RelabelResult};
use crate::mapping::RenameMapping;
use crate::options::{RenameOptions, VerifyMode};
use crate::plan::{plan_batch, StepKind};
use crate::symbols::SymbolTable;
use crate::types::{RenameReport, RenameStatus};

/// Drives batches of renames through one language adapter.
pub struct Orchestrator<'a, A: LanguageAdapter> {
    adapter: &'a A,
    options: RenameOptions,
}

impl<'a, A: LanguageAdapter> Orchestrator<'a, A> {
    /// Create an orchestrator with default options.
    pub fn new(adapter: &'a A) -> Self {
        Orchestrator {
            adapter,
            options: RenameOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: RenameOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &RenameOptions {
        &self.options
    }

    /// Apply `mapping` to `text` as one all-or-nothing batch.
    pub fn rename(&self, text: &str, mapping: &RenameMapping) -> RelabelResult<RenameReport> {
        let _span = info_span!("rename_batch", adapter = self.adapter.name()).entered();

        let table = SymbolTable::build(self.adapter, text)?;
        let batch = plan_batch(mapping, &table, &self.options)?;

        let mut buffer = OffsetTrackingBuffer::new(self.adapter, text);
        for step in batch.plan.steps.iter().filter(|s| s.kind != StepKind::FromTemp) {
            if let Some(offset) = table.offset_of(&step.from) {
                buffer.track(step.from.as_str(), offset);
            }
        }

        for (index, step) in batch.plan.steps.iter().enumerate() {
            let offset = buffer.locate(&step.from)?;
            let applied = buffer.apply(offset, &step.from, &step.to)?;
            if step.kind == StepKind::ToTemp {
                buffer.track(step.to.as_str(), applied.offset);
            }
            debug!(
                step = index,
                from = %step.from,
                to = %step.to,
                offset,
                delta = applied.delta,
                occurrences = applied.occurrences,
                "applied rename"
            );
        }

        let relocations = buffer.relocations();
        let text = buffer.into_text();
        if self.options.verify == VerifyMode::Syntax && !batch.plan.is_empty() {
            self.adapter.parse(&text).map_err(|e| {
                RelabelError::internal(format!("renamed text no longer parses: {}", e))
            })?;
        }

        let report = RenameReport {
            text,
            entries: batch.entries,
            steps: batch.plan.steps,
            warnings: batch.warnings,
        };
        info!(
            renamed = report.count(RenameStatus::Renamed),
            not_found = report.count(RenameStatus::SkippedNotFound),
            noop = report.count(RenameStatus::SkippedNoop),
            steps = report.steps.len(),
            relocations,
            "rename batch complete"
        );
        Ok(report)
    }
}

/// Apply `mapping` to `text` with the given options.
pub fn rename_batch<A: LanguageAdapter>(
    adapter: &A,
    text: &str,
    mapping: &RenameMapping,
    options: RenameOptions,
) -> RelabelResult<RenameReport> {
    Orchestrator::new(adapter).with_options(options).rename(text, mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{word_count, WordAdapter};

    fn run(text: &str, pairs: &[(&str, &str)]) -> RelabelResult<RenameReport> {
        let mapping = RenameMapping::from_pairs(pairs.iter().copied())?;
        Orchestrator::new(&WordAdapter).rename(text, &mapping)
    }

    mod properties {
        use super::*;

        #[test]
        fn empty_mapping_is_identity() {
            let text = "var a=1; var b=2;";
            let report = run(text, &[]).unwrap();
            assert_eq!(report.text, text);
            assert!(report.steps.is_empty());
        }

        #[test]
        fn noop_entry_never_touches_text() {
            let text = "var a=1;";
            let report = run(text, &[("a", "a")]).unwrap();
            assert_eq!(report.text, text);
            assert_eq!(report.status_of("a"), Some(RenameStatus::SkippedNoop));
        }

        #[test]
        fn permutation_keeps_symbols_distinct() {
            let report = run(
                "var a=1; var b=2; var c=a+b;",
                &[("a", "b"), ("b", "c"), ("c", "a")],
            )
            .unwrap();
            assert_eq!(report.text, "var b=1; var c=2; var a=b+c;");
            assert_eq!(report.count(RenameStatus::Renamed), 3);
        }

        #[test]
        fn chain_is_not_applied_naively() {
            let report = run("var x=1; var y=2;", &[("x", "y"), ("y", "z")]).unwrap();
            assert_eq!(report.text, "var y=1; var z=2;");
            assert_eq!(word_count(&report.text, "x"), 0);
        }

        #[test]
        fn not_found_entry_is_skipped_others_apply() {
            let report = run("var a=1;", &[("q", "r"), ("a", "apple")]).unwrap();
            assert_eq!(report.text, "var apple=1;");
            assert_eq!(report.status_of("q"), Some(RenameStatus::SkippedNotFound));
            assert_eq!(report.status_of("a"), Some(RenameStatus::Renamed));
        }

        #[test]
        fn occurrence_counts_preserved() {
            let text = "a b a c b a";
            let report = run(text, &[("a", "b"), ("b", "a"), ("c", "cc")]).unwrap();
            assert_eq!(report.text, "b a b cc a b");
            assert_eq!(word_count(&report.text, "b"), word_count(text, "a"));
            assert_eq!(word_count(&report.text, "a"), word_count(text, "b"));
            assert_eq!(word_count(&report.text, "cc"), word_count(text, "c"));
        }

        #[test]
        fn parse_failure_returns_no_text() {
            let err = run("var a @ 1;", &[("a", "b")]).unwrap_err();
            assert!(matches!(err, RelabelError::ParseError { .. }));
        }
    }

    mod offsets {
        use super::*;

        #[test]
        fn growing_and_shrinking_names() {
            // Names change length in both directions, so every cached
            // offset after the first edit moves.
            let text = "alpha b alpha ccc b ccc";
            let report = run(
                text,
                &[("alpha", "a"), ("b", "bravo_long"), ("ccc", "alpha")],
            )
            .unwrap();
            assert_eq!(report.text, "a bravo_long a alpha bravo_long alpha");
        }

        #[test]
        fn mapping_order_does_not_change_the_result() {
            let text = "aaaaaaaaaa b aaaaaaaaaa b ccc";
            let forward = run(text, &[("aaaaaaaaaa", "a"), ("b", "bbbbbb"), ("ccc", "c")]).unwrap();
            let backward = run(text, &[("ccc", "c"), ("b", "bbbbbb"), ("aaaaaaaaaa", "a")]).unwrap();
            assert_eq!(forward.text, "a bbbbbb a bbbbbb c");
            assert_eq!(forward.text, backward.text);
        }

        #[test]
        fn temp_names_avoid_existing_words() {
            let report = run("a b a$0 b$0", &[("a", "b"), ("b", "a")]).unwrap();
            assert_eq!(report.text, "b a a$0 b$0");
            assert_eq!(report.steps[0].to, "a$1");
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn collision_unresolvable_aborts() {
            let mapping = RenameMapping::from_pairs([("a", "b"), ("b", "a")]).unwrap();
            let err = rename_batch(
                &WordAdapter,
                "a b a$0",
                &mapping,
                RenameOptions::default().with_max_temp_attempts(1),
            )
            .unwrap_err();
            assert!(matches!(
                err,
                RelabelError::TargetCollisionUnresolvable { attempts: 1, .. }
            ));
        }

        #[test]
        fn verify_catches_unparseable_result() {
            let mapping = RenameMapping::from_pairs([("a", "@")]).unwrap();
            let err = rename_batch(&WordAdapter, "a b", &mapping, RenameOptions::default())
                .unwrap_err();
            assert!(matches!(err, RelabelError::InternalError { .. }));

            let report = rename_batch(
                &WordAdapter,
                "a b",
                &mapping,
                RenameOptions::default().with_verify(VerifyMode::None),
            )
            .unwrap();
            assert_eq!(report.text, "@ b");
        }
    }
}
