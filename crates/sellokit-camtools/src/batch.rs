//! Production batch tallies.
//!
//! A production program groups sized jobs that will be cut in one session.
//! The tally answers two questions before the session starts: how much bar
//! of each width to pull from stock, and how much of the session's time
//! budget the jobs use.

use crate::stock::MaterialSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bar widths tracked in stock, in millimeters
pub const TRACKED_BAR_WIDTHS_MM: [u32; 5] = [12, 19, 25, 38, 63];

/// Usage above this share of the time limit is shown as a warning
pub const USAGE_WARNING_PERCENT: f64 = 75.0;
/// Usage above this share of the time limit is shown as critical
pub const USAGE_CRITICAL_PERCENT: f64 = 90.0;

/// One sized job in a production program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionJob {
    pub label: String,
    pub material: MaterialSpec,
    /// Estimated minutes, when an estimate exists
    pub estimated_minutes: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent > USAGE_CRITICAL_PERCENT {
            Self::Critical
        } else if percent > USAGE_WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

/// Totals over a production program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub job_count: usize,
    pub total_minutes: f64,
    /// Bar length in centimeters per tracked width; every tracked width is present
    pub bar_length_cm_by_width: BTreeMap<u32, f64>,
    /// Jobs whose material could not be tallied
    pub untallied_jobs: usize,
    /// Share of the time limit used, capped at 100; `None` without a limit
    pub usage_percent: Option<f64>,
}

impl BatchSummary {
    pub fn bar_length_cm(&self, width_mm: u32) -> f64 {
        self.bar_length_cm_by_width
            .get(&width_mm)
            .copied()
            .unwrap_or(0.0)
    }

    pub fn usage_level(&self) -> Option<UsageLevel> {
        self.usage_percent.map(UsageLevel::from_percent)
    }
}

/// Tally `jobs` against an optional time limit in minutes.
///
/// Missing or non-finite time estimates count as zero. Jobs without a bar
/// width or length, or with a width that is not tracked, are left out of the
/// bar totals. A limit that is not positive means no limit.
pub fn summarize(jobs: &[ProductionJob], time_limit_minutes: Option<f64>) -> BatchSummary {
    let total_minutes: f64 = jobs
        .iter()
        .filter_map(|job| job.estimated_minutes)
        .filter(|m| m.is_finite())
        .sum();

    let mut bar_length_cm_by_width: BTreeMap<u32, f64> =
        TRACKED_BAR_WIDTHS_MM.iter().map(|&w| (w, 0.0)).collect();
    let mut untallied_jobs = 0;

    for job in jobs {
        let tallied = match (job.material.bar_width_mm, job.material.bar_length_cm) {
            (Some(width), Some(length)) if length.is_finite() && length > 0.0 => {
                match bar_length_cm_by_width.get_mut(&width) {
                    Some(sum) => {
                        *sum += length;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        };
        if !tallied {
            tracing::debug!(job = %job.label, "Job left out of bar totals");
            untallied_jobs += 1;
        }
    }

    let usage_percent = time_limit_minutes
        .filter(|limit| limit.is_finite() && *limit > 0.0)
        .map(|limit| (total_minutes / limit * 100.0).min(100.0));

    BatchSummary {
        job_count: jobs.len(),
        total_minutes,
        bar_length_cm_by_width,
        untallied_jobs,
        usage_percent,
    }
}
