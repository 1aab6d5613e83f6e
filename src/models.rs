use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub duration: i64,
    pub progress: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    pub id: String,
    pub name: String,
    pub progress: i64,
    pub expected: i64,
    pub gap: i64,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Healthy,
    Delayed,
    Critical,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TaskStatus::Healthy => "Healthy",
            TaskStatus::Delayed => "Delayed",
            TaskStatus::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub total_actual: i64,
    pub total_expected: i64,
    pub total_gap: i64,
    pub total_weight: f64,
}

#[derive(Debug, Clone)]
pub struct StatusSummary {
    pub status: TaskStatus,
    pub count: usize,
    pub avg_gap: f64,
}
