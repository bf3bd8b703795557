//! Threshold evaluation engine.
//!
//! Pure logic — no I/O. The caller captures a [`Sample`] and passes it in;
//! the evaluator inspects the provider-sourced exceeded flags and decides
//! whether an alert is warranted. A single exceeded metric is sufficient:
//! the decision rule is a logical OR across the three flags, with no
//! weighting and no hysteresis. There is no debouncing across runs — two
//! consecutive exceeding runs each trigger independently.

use serde::Serialize;

use crate::sample::Sample;

/// Canonical metric names used in alert reasons and message bodies.
pub const METRIC_CPU_TEMPERATURE: &str = "cpu_temperature";
pub const METRIC_LOAD_AVERAGE: &str = "load_average";
pub const METRIC_DISK_USAGE: &str = "disk_usage";

/// One exceeded metric: name, observed value, and the provider flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertReason {
    pub metric_name: &'static str,
    pub value: f64,
    pub exceeded: bool,
}

/// The evaluator's pure output: whether to notify, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDecision {
    pub triggered: bool,
    /// Every exceeded metric, in fixed order: temperature, load, disk.
    pub reasons: Vec<AlertReason>,
}

/// Evaluate a sample's exceeded flags.
///
/// `triggered == cpu_exceeded || load_exceeded || disk_exceeded`. An
/// all-clear sample yields `triggered = false` with empty reasons.
pub fn evaluate(sample: &Sample) -> AlertDecision {
    let mut reasons = Vec::new();

    if sample.cpu_exceeded {
        reasons.push(AlertReason {
            metric_name: METRIC_CPU_TEMPERATURE,
            value: sample.cpu_temperature,
            exceeded: true,
        });
    }
    if sample.load_exceeded {
        reasons.push(AlertReason {
            metric_name: METRIC_LOAD_AVERAGE,
            value: sample.load_average,
            exceeded: true,
        });
    }
    if sample.disk_exceeded {
        reasons.push(AlertReason {
            metric_name: METRIC_DISK_USAGE,
            value: sample.disk_usage_percent,
            exceeded: true,
        });
    }

    AlertDecision {
        triggered: !reasons.is_empty(),
        reasons,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_sample(cpu: bool, load: bool, disk: bool) -> Sample {
        Sample {
            timestamp: Utc::now(),
            cpu_temperature: 45.0,
            load_average: 0.5,
            disk_usage_percent: 60.0,
            cpu_exceeded: cpu,
            load_exceeded: load,
            disk_exceeded: disk,
        }
    }

    #[test]
    fn triggered_is_or_across_flags_for_all_eight_combinations() {
        for cpu in [false, true] {
            for load in [false, true] {
                for disk in [false, true] {
                    let decision = evaluate(&make_sample(cpu, load, disk));
                    assert_eq!(
                        decision.triggered,
                        cpu || load || disk,
                        "flags ({cpu}, {load}, {disk})"
                    );
                    assert_eq!(
                        decision.reasons.len(),
                        usize::from(cpu) + usize::from(load) + usize::from(disk)
                    );
                }
            }
        }
    }

    #[test]
    fn all_clear_yields_no_reasons() {
        let decision = evaluate(&make_sample(false, false, false));
        assert!(!decision.triggered);
        assert!(decision.reasons.is_empty());
    }

    #[test]
    fn reasons_are_in_fixed_metric_order() {
        let decision = evaluate(&make_sample(true, true, true));
        let names: Vec<&str> = decision.reasons.iter().map(|r| r.metric_name).collect();
        assert_eq!(
            names,
            vec![METRIC_CPU_TEMPERATURE, METRIC_LOAD_AVERAGE, METRIC_DISK_USAGE]
        );
    }

    #[test]
    fn single_exceeded_metric_is_sufficient() {
        let mut sample = make_sample(true, false, false);
        sample.cpu_temperature = 95.0;
        let decision = evaluate(&sample);
        assert!(decision.triggered);
        assert_eq!(decision.reasons.len(), 1);
        assert_eq!(decision.reasons[0].metric_name, METRIC_CPU_TEMPERATURE);
        assert_eq!(decision.reasons[0].value, 95.0);
        assert!(decision.reasons[0].exceeded);
    }

    #[test]
    fn decision_serializes_with_reason_fields() {
        let decision = evaluate(&make_sample(false, true, false));
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["triggered"], true);
        assert_eq!(json["reasons"][0]["metric_name"], METRIC_LOAD_AVERAGE);
        assert_eq!(json["reasons"][0]["value"], 0.5);
        assert_eq!(json["reasons"][0]["exceeded"], true);
    }

    #[test]
    fn evaluate_is_pure() {
        let sample = make_sample(true, false, true);
        let first = evaluate(&sample);
        let second = evaluate(&sample);
        assert_eq!(first, second);
    }
}
