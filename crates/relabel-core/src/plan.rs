//! Execution planning: turn a rename mapping into collision-free steps.
//!
//! # Ordering
//!
//! A rename `o → t` is *ready* once no pending key is still spelled `t`.
//! Chains are emitted from the terminal end backward: in `x → y → z` the
//! step `y → z` runs first, freeing `y` for `x → y`.
//!
//! A cycle has no ready step. Each cycle member is first moved to its own
//! fresh temporary name, then every temporary is moved to the member's
//! final target. That is exactly two steps per member, and at no prefix of
//! the plan do two original symbols share a spelling.
//!
//! # Temporary names
//!
//! Temporaries are `<old><sentinel><n>`, checked against every name in the
//! program, every name in the mapping, and every temporary already issued.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{RelabelError, RelabelResult};
use crate::graph::{Component, ComponentKind, RenameGraph};
use crate::mapping::RenameMapping;
use crate::options::RenameOptions;
use crate::symbols::SymbolTable;
use crate::types::{EntryResult, RenameStatus, RenameWarning};

/// Role of one primitive rename in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Original name straight to its final target.
    Direct,
    /// Cycle member to its temporary name.
    ToTemp,
    /// Temporary name to the cycle member's final target.
    FromTemp,
}

/// One primitive rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Spelling located and renamed by this step.
    pub from: String,
    /// Spelling written by this step.
    pub to: String,
    /// Original name of the symbol being moved.
    pub origin: String,
    pub kind: StepKind,
}

impl PlanStep {
    fn new(from: &str, to: &str, origin: &str, kind: StepKind) -> Self {
        PlanStep {
            from: from.to_string(),
            to: to.to_string(),
            origin: origin.to_string(),
            kind,
        }
    }
}

/// Ordered primitive renames for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub steps: Vec<PlanStep>,
}

impl ExecutionPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of temporary names introduced.
    pub fn temp_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::ToTemp)
            .count()
    }
}

/// Everything decided before any text is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub plan: ExecutionPlan,
    /// One result per mapping entry, in mapping order.
    pub entries: Vec<EntryResult>,
    pub warnings: Vec<RenameWarning>,
}

/// Plan a batch against the names present in the program.
///
/// Entries mapping a name to itself are `SkippedNoop`; entries whose old
/// name does not occur in `table` are `SkippedNotFound`. Only the remaining
/// entries enter the rename graph.
pub fn plan_batch(
    mapping: &RenameMapping,
    table: &SymbolTable,
    options: &RenameOptions,
) -> RelabelResult<BatchPlan> {
    let mut entries = Vec::with_capacity(mapping.len());
    let mut active = Vec::new();
    for (old, new) in mapping.iter() {
        let status = if old == new {
            RenameStatus::SkippedNoop
        } else if !table.contains(old) {
            warn!("'{}' does not occur in the source, skipping", old);
            RenameStatus::SkippedNotFound
        } else {
            active.push((old, new));
            RenameStatus::Renamed
        };
        entries.push(EntryResult {
            old_name: old.to_string(),
            new_name: new.to_string(),
            status,
        });
    }

    let graph = RenameGraph::new(active);
    let warnings = collect_warnings(&graph, table);

    let mut namer = TempNamer::new(
        table.names().chain(mapping.all_names()),
        &options.temp_sentinel,
        options.max_temp_attempts,
    );
    let mut plan = ExecutionPlan::default();
    for component in graph.components() {
        plan_component(&graph, &component, &mut namer, &mut plan)?;
    }

    Ok(BatchPlan {
        plan,
        entries,
        warnings,
    })
}

fn plan_component(
    graph: &RenameGraph,
    component: &Component,
    namer: &mut TempNamer,
    plan: &mut ExecutionPlan,
) -> RelabelResult<()> {
    let mut pending: HashSet<&str> = component.keys.iter().map(String::as_str).collect();

    if component.kind == ComponentKind::Cycle {
        let mut temps = Vec::with_capacity(component.cycle.len());
        for member in &component.cycle {
            let temp = namer.fresh(member)?;
            plan.steps
                .push(PlanStep::new(member, &temp, member, StepKind::ToTemp));
            temps.push(temp);
        }
        for (member, temp) in component.cycle.iter().zip(&temps) {
            let target = graph.target(member).ok_or_else(|| {
                RelabelError::internal(format!("cycle member '{}' has no target", member))
            })?;
            plan.steps
                .push(PlanStep::new(temp, target, member, StepKind::FromTemp));
            pending.remove(member.as_str());
        }
    }

    drain_ready(graph, &component.keys, &mut pending, plan)?;
    Ok(())
}

/// Emit direct steps for every key whose target is no longer pending.
fn drain_ready<'g>(
    graph: &'g RenameGraph,
    keys: &'g [String],
    pending: &mut HashSet<&'g str>,
    plan: &mut ExecutionPlan,
) -> RelabelResult<()> {
    let mut queue: VecDeque<&str> = keys
        .iter()
        .map(String::as_str)
        .filter(|k| pending.contains(k))
        .filter(|k| graph.target(k).is_some_and(|t| !pending.contains(t)))
        .collect();

    while let Some(key) = queue.pop_front() {
        if !pending.remove(key) {
            continue;
        }
        let target = graph
            .target(key)
            .ok_or_else(|| RelabelError::internal(format!("key '{}' has no target", key)))?;
        plan.steps
            .push(PlanStep::new(key, target, key, StepKind::Direct));
        for source in graph.sources_of(key) {
            if pending.contains(source) {
                queue.push_back(source);
            }
        }
    }

    if let Some(stuck) = keys.iter().find(|k| pending.contains(k.as_str())) {
        return Err(RelabelError::internal(format!(
            "rename of '{}' could not be ordered",
            stuck
        )));
    }
    Ok(())
}

fn collect_warnings(graph: &RenameGraph, table: &SymbolTable) -> Vec<RenameWarning> {
    let mut warnings: Vec<RenameWarning> = graph
        .duplicate_targets()
        .into_iter()
        .map(|(target, sources)| {
            warn!("several names renamed to '{}': {}", target, sources.join(", "));
            RenameWarning::DuplicateTarget { target, sources }
        })
        .collect();

    for key in graph.keys() {
        let Some(target) = graph.target(key) else {
            continue;
        };
        if table.contains(target) && !graph.is_key(target) {
            warn!("'{}' is renamed to '{}', which already names another symbol", key, target);
            warnings.push(RenameWarning::TargetShadowsExisting {
                old_name: key.to_string(),
                target: target.to_string(),
            });
        }
    }
    warnings
}

/// Generates temporary names that collide with nothing reserved.
pub struct TempNamer {
    reserved: HashSet<String>,
    sentinel: String,
    max_attempts: usize,
}

impl TempNamer {
    pub fn new<'n>(
        reserved: impl IntoIterator<Item = &'n str>,
        sentinel: &str,
        max_attempts: usize,
    ) -> Self {
        TempNamer {
            reserved: reserved.into_iter().map(str::to_string).collect(),
            sentinel: sentinel.to_string(),
            max_attempts,
        }
    }

    /// A fresh name derived from `base`, reserved on return.
    ///
    /// Fails with `TargetCollisionUnresolvable` after `max_attempts` candidates.
    pub fn fresh(&mut self, base: &str) -> RelabelResult<String> {
        for n in 0..self.max_attempts {
            let candidate = format!("{}{}{}", base, self.sentinel, n);
            if self.reserved.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(RelabelError::TargetCollisionUnresolvable {
            name: base.to_string(),
            attempts: self.max_attempts,
        })
    }
}
