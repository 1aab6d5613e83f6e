use thiserror::Error;

use crate::models::{ProjectSummary, TaskRecord, TaskResult, TaskStatus};

// A gap of exactly -15 counts as critical.
pub const CRITICAL_GAP: i64 = -15;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("duration must be positive, got {0}")]
    NonPositiveDuration(i64),
    #[error("weight must be positive, got {0}")]
    NonPositiveWeight(f64),
    #[error("progress must be between 0 and 100, got {0}")]
    ProgressOutOfRange(i64),
    #[error("days elapsed must be non-negative, got {0}")]
    NegativeDaysElapsed(i64),
    #[error("duplicate task id {0}")]
    DuplicateTaskId(String),
}

pub fn expected_progress(duration: i64, days_elapsed: i64) -> Result<i64, InvalidInput> {
    if duration <= 0 {
        return Err(InvalidInput::NonPositiveDuration(duration));
    }
    if days_elapsed < 0 {
        return Err(InvalidInput::NegativeDaysElapsed(days_elapsed));
    }

    let raw = days_elapsed as f64 / duration as f64 * 100.0;
    Ok(round_half_up(raw).clamp(0, 100))
}

pub fn classify_status(gap: i64) -> TaskStatus {
    if gap >= 0 {
        TaskStatus::Healthy
    } else if gap > CRITICAL_GAP {
        TaskStatus::Delayed
    } else {
        TaskStatus::Critical
    }
}

pub fn aggregate(
    tasks: &[TaskRecord],
    days_elapsed: i64,
) -> Result<(Vec<TaskResult>, ProjectSummary), InvalidInput> {
    if days_elapsed < 0 {
        return Err(InvalidInput::NegativeDaysElapsed(days_elapsed));
    }

    // All fields are checked up front; one bad task fails the whole call.
    let mut seen_ids = std::collections::HashSet::new();
    for task in tasks {
        if task.duration <= 0 {
            return Err(InvalidInput::NonPositiveDuration(task.duration));
        }
        if !task.weight.is_finite() || task.weight <= 0.0 {
            return Err(InvalidInput::NonPositiveWeight(task.weight));
        }
        if !(0..=100).contains(&task.progress) {
            return Err(InvalidInput::ProgressOutOfRange(task.progress));
        }
        if !seen_ids.insert(task.id.as_str()) {
            return Err(InvalidInput::DuplicateTaskId(task.id.clone()));
        }
    }

    let mut total_weight = 0.0;
    let mut weighted_actual = 0.0;
    let mut weighted_expected = 0.0;
    let mut results = Vec::with_capacity(tasks.len());

    for task in tasks {
        let expected = expected_progress(task.duration, days_elapsed)?;
        total_weight += task.weight;
        weighted_actual += task.progress as f64 * task.weight;
        weighted_expected += expected as f64 * task.weight;

        let gap = task.progress - expected;
        results.push(TaskResult {
            id: task.id.clone(),
            name: task.name.clone(),
            progress: task.progress,
            expected,
            gap,
            status: classify_status(gap),
        });
    }

    let summary = if total_weight > 0.0 {
        let total_actual = round_half_up(weighted_actual / total_weight).clamp(0, 100);
        let total_expected = round_half_up(weighted_expected / total_weight).clamp(0, 100);
        ProjectSummary {
            total_actual,
            total_expected,
            total_gap: total_actual - total_expected,
            total_weight,
        }
    } else {
        ProjectSummary {
            total_actual: 0,
            total_expected: 0,
            total_gap: 0,
            total_weight: 0.0,
        }
    };

    Ok((results, summary))
}

// Round half up. Every quantity rounded here is non-negative.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
