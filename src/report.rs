use std::fmt::Write;

use crate::models::{ProjectSummary, StatusSummary, TaskResult, TaskStatus};

pub fn summarize_by_status(results: &[TaskResult]) -> Vec<StatusSummary> {
    let mut map: std::collections::HashMap<TaskStatus, (usize, i64)> =
        std::collections::HashMap::new();

    for result in results {
        let entry = map.entry(result.status).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += result.gap;
    }

    let mut summaries: Vec<StatusSummary> = map
        .into_iter()
        .map(|(status, (count, total_gap))| StatusSummary {
            status,
            count,
            avg_gap: if count == 0 {
                0.0
            } else {
                total_gap as f64 / count as f64
            },
        })
        .collect();

    summaries.sort_by(|a, b| b.count.cmp(&a.count));
    summaries
}

pub fn build_report(
    project: Option<&str>,
    days_elapsed: i64,
    results: &[TaskResult],
    summary: &ProjectSummary,
) -> String {
    let mixes = summarize_by_status(results);

    let mut output = String::new();
    let project_label = project.unwrap_or("project");

    let _ = writeln!(output, "# Weighted Progress Report");
    let _ = writeln!(
        output,
        "Generated for {} (day {})",
        project_label, days_elapsed
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Weighted Rollup");

    if results.is_empty() {
        let _ = writeln!(output, "No tasks recorded.");
    } else {
        let _ = writeln!(output, "- Actual: {}%", summary.total_actual);
        let _ = writeln!(output, "- Expected: {}%", summary.total_expected);
        let _ = writeln!(output, "- Gap: {:+}%", summary.total_gap);
        let _ = writeln!(output, "- Total weight: {}", summary.total_weight);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Status Mix");

    if mixes.is_empty() {
        let _ = writeln!(output, "No tasks recorded.");
    } else {
        for mix in mixes.iter() {
            let _ = writeln!(
                output,
                "- {}: {} tasks (avg gap {:+.1})",
                mix.status, mix.count, mix.avg_gap
            );
        }
    }

    let mut behind: Vec<&TaskResult> = results.iter().filter(|r| r.gap < 0).collect();
    behind.sort_by_key(|r| r.gap);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Behind Schedule");

    if behind.is_empty() {
        let _ = writeln!(output, "No tasks behind schedule.");
    } else {
        for result in behind.iter().take(5) {
            let _ = writeln!(
                output,
                "- {} ({}) at {}% against {}% expected, gap {:+}",
                result.name, result.status, result.progress, result.expected, result.gap
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Task Breakdown");

    if results.is_empty() {
        let _ = writeln!(output, "No tasks recorded.");
    } else {
        for result in results.iter() {
            let _ = writeln!(
                output,
                "- {} [{}]: {}% actual, {}% expected, gap {:+}, {}",
                result.name, result.id, result.progress, result.expected, result.gap, result.status
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskRecord;
    use crate::progress;

    fn sample_rollup() -> (Vec<TaskResult>, ProjectSummary) {
        let tasks = vec![
            TaskRecord {
                id: "1".to_string(),
                name: "UI Design".to_string(),
                weight: 1.0,
                duration: 20,
                progress: 80,
            },
            TaskRecord {
                id: "2".to_string(),
                name: "API Development".to_string(),
                weight: 3.0,
                duration: 40,
                progress: 30,
            },
            TaskRecord {
                id: "3".to_string(),
                name: "Database Setup".to_string(),
                weight: 2.0,
                duration: 10,
                progress: 100,
            },
        ];
        progress::aggregate(&tasks, 15).unwrap()
    }

    #[test]
    fn status_mix_counts_and_averages() {
        let (results, _) = sample_rollup();
        let mixes = summarize_by_status(&results);

        assert_eq!(mixes.len(), 2);
        assert_eq!(mixes[0].status, TaskStatus::Healthy);
        assert_eq!(mixes[0].count, 2);
        assert!((mixes[0].avg_gap - 2.5).abs() < 0.001); // gaps +5 and 0
        assert_eq!(mixes[1].status, TaskStatus::Delayed);
        assert_eq!(mixes[1].count, 1);
        assert!((mixes[1].avg_gap + 8.0).abs() < 0.001);
    }

    #[test]
    fn report_lists_every_section() {
        let (results, summary) = sample_rollup();
        let report = build_report(Some("Dashboard Revamp"), 15, &results, &summary);

        assert!(report.contains("# Weighted Progress Report"));
        assert!(report.contains("Generated for Dashboard Revamp (day 15)"));
        assert!(report.contains("- Actual: 62%"));
        assert!(report.contains("- Expected: 82%"));
        assert!(report.contains("- Gap: -20%"));
        assert!(report.contains("## Status Mix"));
        assert!(report.contains("## Behind Schedule"));
        assert!(report.contains("API Development (Delayed) at 30% against 38% expected, gap -8"));
        assert!(report.contains("## Task Breakdown"));
        assert!(report.contains("UI Design [1]: 80% actual, 75% expected, gap +5, Healthy"));
    }

    #[test]
    fn empty_results_produce_placeholder_sections() {
        let summary = ProjectSummary {
            total_actual: 0,
            total_expected: 0,
            total_gap: 0,
            total_weight: 0.0,
        };
        let report = build_report(None, 30, &[], &summary);

        assert!(report.contains("Generated for project (day 30)"));
        assert!(report.contains("No tasks recorded."));
        assert!(report.contains("No tasks behind schedule."));
    }
}
