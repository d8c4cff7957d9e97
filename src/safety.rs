//! Dry-run and force handling shared by every destructive tool
//!
//! A destructive tool builds a [`SafetyGate`] from its `dryRun` / `force`
//! arguments, computes the read-side state, and asks the gate what to do:
//! preview without mutating, proceed, or refuse with the offending state.

use serde::Serialize;
use serde_json::{Value, json};

use crate::result::ToolResult;

/// The `dryRun` / `force` pair of a destructive invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyGate {
    pub dry_run: bool,
    pub force: bool,
}

/// An unsafe precondition detected before mutating.
#[derive(Debug, Clone)]
pub struct Hazard {
    pub message: String,
    pub error: String,
    pub state: Value,
}

impl Hazard {
    pub fn new(message: impl Into<String>, error: impl Into<String>, state: Value) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
            state,
        }
    }

    /// The refusal reported to the caller, with the offending state in `data`.
    pub fn into_result(self) -> ToolResult {
        ToolResult::failure(self.message, self.error).with_data(self.state)
    }
}

/// Decision taken by a [`SafetyGate`].
#[derive(Debug)]
pub enum Gate {
    /// Report what would happen, invoke nothing mutating.
    Preview,
    /// Run the mutating command.
    Proceed,
    /// Refuse. The result is ready to return.
    Blocked(ToolResult),
}

impl SafetyGate {
    pub fn new(dry_run: bool, force: bool) -> Self {
        Self { dry_run, force }
    }

    /// Decide given the hazard found by the read-side checks, if any.
    ///
    /// Dry runs always preview, even when a hazard is present. A hazard
    /// blocks unless `force` is set.
    pub fn check(&self, hazard: Option<Hazard>) -> Gate {
        if self.dry_run {
            return Gate::Preview;
        }
        match hazard {
            Some(hazard) if !self.force => {
                log::info!("Refusing destructive operation: {}", hazard.message);
                Gate::Blocked(hazard.into_result())
            }
            _ => Gate::Proceed,
        }
    }
}

/// How a multi-target operation turns per-target outcomes into one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatePolicy {
    /// Successful when at least one target succeeded.
    AnySucceeded,
    /// Successful only when no target failed.
    AllSucceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetFailure {
    pub target: String,
    pub error: String,
}

/// Per-target outcomes of a multi-target operation.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    succeeded: Vec<String>,
    failed: Vec<TargetFailure>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(&mut self, target: impl Into<String>) {
        self.succeeded.push(target.into());
    }

    pub fn fail(&mut self, target: impl Into<String>, error: impl Into<String>) {
        self.failed.push(TargetFailure {
            target: target.into(),
            error: error.into(),
        });
    }

    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    pub fn failed(&self) -> &[TargetFailure] {
        &self.failed
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self, policy: AggregatePolicy) -> bool {
        match policy {
            AggregatePolicy::AnySucceeded => !self.succeeded.is_empty(),
            AggregatePolicy::AllSucceeded => self.failed.is_empty(),
        }
    }

    pub fn failed_json(&self) -> Value {
        json!(self.failed)
    }

    /// Aggregate result. Partial outcomes are reported in `data` either way.
    pub fn into_result(self, policy: AggregatePolicy, message: String, data: Value) -> ToolResult {
        if self.is_success(policy) {
            if !self.failed.is_empty() {
                log::warn!("{} of {} targets failed", self.failed.len(), self.total());
            }
            ToolResult::success(message).with_data(data)
        } else {
            let error = self
                .failed
                .iter()
                .map(|f| format!("{}: {}", f.target, f.error))
                .collect::<Vec<_>>()
                .join("; ");
            ToolResult::failure(message, error).with_data(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirty() -> Option<Hazard> {
        Some(Hazard::new(
            "Hard reset would lose uncommitted changes. Use force=true to proceed.",
            "Uncommitted changes detected",
            json!({ "uncommittedFiles": ["src/lib.rs"] }),
        ))
    }

    #[test]
    fn dry_run_previews_even_with_hazard() {
        assert!(matches!(SafetyGate::new(true, false).check(dirty()), Gate::Preview));
    }

    #[test]
    fn hazard_without_force_blocks_with_state() {
        match SafetyGate::new(false, false).check(dirty()) {
            Gate::Blocked(result) => {
                assert!(!result.is_success());
                assert_eq!(result.error(), Some("Uncommitted changes detected"));
                assert!(result.data().is_some_and(|d| d["uncommittedFiles"][0] == "src/lib.rs"));
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[test]
    fn force_overrides_hazard() {
        assert!(matches!(SafetyGate::new(false, true).check(dirty()), Gate::Proceed));
        assert!(matches!(SafetyGate::new(false, false).check(None), Gate::Proceed));
    }

    #[test]
    fn aggregate_policies_disagree_on_partial_success() {
        let mut batch = BatchOutcome::new();
        batch.succeed("a");
        batch.fail("b", "tag 'b' not found");
        assert!(batch.is_success(AggregatePolicy::AnySucceeded));
        assert!(!batch.is_success(AggregatePolicy::AllSucceeded));

        let result = batch.into_result(AggregatePolicy::AllSucceeded, "Deleted 1 of 2 tags".into(), json!({}));
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("b: tag 'b' not found"));
    }
}
