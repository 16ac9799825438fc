//! Audit trail models.
//!
//! Every calculation step records what it was given, what it decided and
//! why, so a payroll figure can be traced back to individual punches.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "daily_status".to_string(),
///     rule_name: "Daily Status Classification".to_string(),
///     input: serde_json::json!({"punch_in": "09:00:00", "punch_out": "17:00:00"}),
///     output: serde_json::json!({"status": "present"}),
///     reasoning: "480 minutes worked, on time".to_string(),
/// };
/// assert_eq!(step.rule_id, "daily_status");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serializes_json_payloads_inline() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "excess_leave".to_string(),
            rule_name: "Excess Leave Detection".to_string(),
            input: serde_json::json!({"grace_days": 2}),
            output: serde_json::json!({"excess_leave_days": 1}),
            reasoning: "longest absence streak of 3 days exceeds 2 day grace".to_string(),
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step_number"], 3);
        assert_eq!(json["input"]["grace_days"], 2);
        assert_eq!(json["output"]["excess_leave_days"], 1);
    }
}
