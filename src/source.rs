use std::path::Path;

use anyhow::{bail, Context};

use crate::models::TaskRecord;

pub fn load_tasks(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    match extension(path) {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => bail!(
            "unsupported task file {} (expected .csv or .json)",
            path.display()
        ),
    }
}

fn load_csv(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut tasks = Vec::new();
    for result in reader.deserialize::<TaskRecord>() {
        let task = result.with_context(|| format!("malformed task row in {}", path.display()))?;
        tasks.push(task);
    }

    Ok(tasks)
}

fn load_json(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let tasks: Vec<TaskRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("malformed task list in {}", path.display()))?;

    Ok(tasks)
}

pub fn write_starter(path: &Path) -> anyhow::Result<usize> {
    let tasks = starter_tasks();

    match extension(path) {
        Some("csv") => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            for task in &tasks {
                writer.serialize(task)?;
            }
            writer.flush()?;
        }
        Some("json") => {
            let contents = serde_json::to_string_pretty(&tasks)?;
            std::fs::write(path, contents)
                .with_context(|| format!("failed to create {}", path.display()))?;
        }
        _ => bail!(
            "unsupported task file {} (expected .csv or .json)",
            path.display()
        ),
    }

    Ok(tasks.len())
}

pub fn starter_tasks() -> Vec<TaskRecord> {
    vec![
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
    ]
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
