//! Audit trail types shared by the classifier and the aggregator.
//!
//! Every calculation function pairs its numeric output with an [`AuditTrace`]
//! recording which rule produced which number, so a payroll reviewer can see
//! why a figure came out the way it did.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number within the trace.
    pub step_number: u32,
    /// Short identifier for the rule applied (e.g. `"jornada_ordinaria"`).
    pub rule_id: String,
    /// Reference to the Código Sustantivo del Trabajo article the rule
    /// implements.
    pub articulo_cst: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during classification or aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the kind of warning.
    pub code: String,
    /// A human-readable description.
    pub message: String,
    /// Severity: `"low"`, `"medium"`, or `"high"`.
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AuditTrace {
    /// The sequence of calculation steps, in order.
    pub steps: Vec<AuditStep>,
    /// Any warnings raised along the way.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// An empty trace with no steps and no warnings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step, numbering it one past the current length.
    pub fn push_step(
        &mut self,
        rule_id: impl Into<String>,
        articulo_cst: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: impl Into<String>,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.into(),
            articulo_cst: articulo_cst.into(),
            input,
            output,
            reasoning: reasoning.into(),
        });
    }

    /// Appends a warning.
    pub fn push_warning(
        &mut self,
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) {
        self.warnings.push(AuditWarning {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_step_numbers_sequentially() {
        let mut trace = AuditTrace::new();
        trace.push_step("a", "CST 158", serde_json::json!({}), serde_json::json!({}), "first");
        trace.push_step("b", "CST 159", serde_json::json!({}), serde_json::json!({}), "second");
        assert_eq!(trace.steps[0].step_number, 1);
        assert_eq!(trace.steps[1].step_number, 2);
    }

    #[test]
    fn test_push_warning() {
        let mut trace = AuditTrace::new();
        trace.push_warning("ORPHAN_ENTRY", "entrada sin salida", "low");
        assert_eq!(trace.warnings.len(), 1);
        assert_eq!(trace.warnings[0].severity, "low");
    }

    #[test]
    fn test_default_trace_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }
}
