//! Human and JSON output.

use chrono::NaiveDate;
use serde_json::json;
use taskboard_core::{Task, TaskId, TaskStats, TaskStatus};

const SHORT_ID_LEN: usize = 8;

pub fn task_created(task: &Task, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        println!("created {} {}", short_id(task.id), task.title);
    }
    Ok(())
}

pub fn task_removed(id: TaskId, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", json!({ "deleted": id }));
    } else {
        println!("deleted {}", short_id(id));
    }
    Ok(())
}

pub fn task_detail(task: &Task, today: NaiveDate, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(task)?);
        return Ok(());
    }

    println!("{}", summary_line(task, today));
    println!("  id:       {}", task.id);
    println!("  created:  {}", task.created_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(resolved_at) = task.resolved_at {
        println!("  resolved: {}", resolved_at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(description) = task.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        for line in description.lines() {
            println!("  {line}");
        }
    }
    Ok(())
}

pub fn task_list(
    tasks: &[&Task],
    total: usize,
    today: NaiveDate,
    as_json: bool,
) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("no tasks match ({total} total)");
        return Ok(());
    }
    for task in tasks {
        println!("{}", summary_line(task, today));
    }
    println!("{} of {total} shown", tasks.len());
    Ok(())
}

pub fn stats(stats: &TaskStats, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let mut value = serde_json::to_value(stats)?;
        value["completionRatePercent"] = json!(stats.completion_rate_percent());
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("total:     {}", stats.total);
    println!("pending:   {}", stats.pending);
    println!(
        "completed: {} ({}% rate)",
        stats.completed,
        stats.completion_rate_percent()
    );
    let overdue_note = if stats.overdue > 0 {
        "needs attention"
    } else {
        "all on track"
    };
    println!("overdue:   {} ({overdue_note})", stats.overdue);
    Ok(())
}

fn summary_line(task: &Task, today: NaiveDate) -> String {
    let mark = match task.status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::Completed => "[x]",
    };
    let mut line = format!("{mark} {}  {}", short_id(task.id), task.title);
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {due}"));
        if task.is_overdue(today) {
            line.push_str(" (overdue)");
        }
    }
    line
}

fn short_id(id: TaskId) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::summary_line;
    use chrono::{NaiveDate, TimeZone, Utc};
    use taskboard_core::{Task, TaskDraft};

    #[test]
    fn summary_marks_overdue_pending_tasks() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let due = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let late = Task::new(TaskDraft::new("Complete report").with_due_date(due), now);

        let line = summary_line(&late, today);
        assert!(line.starts_with("[ ] "));
        assert!(line.ends_with("due 2025-01-10 (overdue)"));

        let done = summary_line(&late.toggled(now), today);
        assert!(done.starts_with("[x] "));
        assert!(!done.contains("overdue"));
    }
}
