//! Subcommand arguments and handlers.

use crate::render;
use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::Args;
use log::info;
use rusqlite::Connection;
use taskboard_core::{
    collect_errors, parse_due_date, DateFilter, DateRange, KeyValueTaskRepository,
    SqliteKeyValueStore, StatusFilter, TaskDraft, TaskFilter, TaskId, TaskPatch, TaskService,
    TaskStatus, TaskValidationError, TaskboardConfig,
};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title (3 to 200 characters)
    pub title: String,

    /// Longer description (up to 1000 characters)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date, YYYY-MM-DD; today or later
    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    /// Create the task already completed
    #[arg(long)]
    pub completed: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task id or unique id prefix
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    #[arg(long)]
    pub clear_description: bool,

    /// New due date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date, conflicts_with = "clear_due")]
    pub due: Option<NaiveDate>,

    #[arg(long)]
    pub clear_due: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against title and description
    #[arg(short, long)]
    pub search: Option<String>,

    /// all | pending | completed | overdue
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// all | today | this_week | this_month | no_date | custom
    #[arg(long)]
    pub date: Option<DateFilter>,

    /// Custom range start, YYYY-MM-DD (inclusive)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Custom range end, YYYY-MM-DD (inclusive)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,
}

impl ListArgs {
    fn to_filter(&self) -> anyhow::Result<TaskFilter> {
        let has_bounds = self.from.is_some() || self.to.is_some();
        let date = match self.date {
            None | Some(DateFilter::Custom(_)) if has_bounds => {
                DateFilter::Custom(DateRange::new(self.from, self.to))
            }
            Some(_) if has_bounds => {
                bail!("--from/--to can only be combined with --date custom")
            }
            Some(filter) => filter,
            None => DateFilter::All,
        };

        Ok(TaskFilter::new()
            .with_search(self.search.as_deref().unwrap_or_default())
            .with_status(self.status)
            .with_date(date))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_due_date(raw)
}

type SqliteTaskService<'conn> = TaskService<KeyValueTaskRepository<SqliteKeyValueStore<'conn>>>;

pub struct Context<'conn> {
    service: SqliteTaskService<'conn>,
    json: bool,
}

impl<'conn> Context<'conn> {
    pub fn open(
        config: &TaskboardConfig,
        conn: &'conn Connection,
        json: bool,
    ) -> anyhow::Result<Self> {
        let service = TaskService::new(config.task_repository(conn))?;
        Ok(Self { service, json })
    }

    pub fn add(&mut self, args: AddArgs) -> anyhow::Result<()> {
        let patch = TaskPatch {
            title: Some(args.title.as_str()),
            description: Some(args.description.as_deref()),
            due_date: Some(args.due),
        };
        ensure_valid(&collect_errors(&patch, self.service.today()))?;

        let mut draft = TaskDraft::new(args.title);
        draft.description = args.description;
        draft.due_date = args.due;
        if args.completed {
            draft.status = Some(TaskStatus::Completed);
        }

        let task = self.service.create_task(draft)?;
        info!("event=cli_add module=cli status=ok task_id={}", task.id);
        render::task_created(&task, self.json)
    }

    pub fn edit(&mut self, args: EditArgs) -> anyhow::Result<()> {
        let id = self.resolve(&args.id)?;
        let mut task = self
            .service
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("task {id} disappeared"))?;

        if let Some(title) = args.title {
            task.title = title;
        }
        if args.clear_description {
            task.description = None;
        } else if let Some(description) = args.description {
            task.description = Some(description);
        }
        let due_changed = args.due.is_some() || args.clear_due;
        if args.clear_due {
            task.due_date = None;
        } else if let Some(due) = args.due {
            task.due_date = Some(due);
        }

        let mut patch = TaskPatch::from_task(&task);
        if !due_changed {
            patch = patch.without_due_date();
        }
        ensure_valid(&collect_errors(&patch, self.service.today()))?;

        self.service.update_task(&task)?;
        render::task_detail(&task, self.service.today(), self.json)
    }

    pub fn toggle(&mut self, raw_id: &str) -> anyhow::Result<()> {
        let id = self.resolve(raw_id)?;
        let task = self
            .service
            .toggle_task_status(id)?
            .ok_or_else(|| anyhow!("task {id} disappeared"))?;
        render::task_detail(&task, self.service.today(), self.json)
    }

    pub fn remove(&mut self, raw_id: &str) -> anyhow::Result<()> {
        let id = self.resolve(raw_id)?;
        self.service.delete_task(id)?;
        render::task_removed(id, self.json)
    }

    pub fn show(&self, raw_id: &str) -> anyhow::Result<()> {
        let id = self.resolve(raw_id)?;
        let task = self
            .service
            .get(id)
            .ok_or_else(|| anyhow!("task {id} disappeared"))?;
        render::task_detail(task, self.service.today(), self.json)
    }

    pub fn list(&self, args: ListArgs) -> anyhow::Result<()> {
        let filter = args.to_filter()?;
        let tasks = self.service.filtered(&filter);
        render::task_list(&tasks, self.service.tasks().len(), self.service.today(), self.json)
    }

    pub fn stats(&self) -> anyhow::Result<()> {
        render::stats(&self.service.stats(), self.json)
    }

    fn resolve(&self, raw_id: &str) -> anyhow::Result<TaskId> {
        self.service
            .resolve_id(raw_id)
            .ok_or_else(|| anyhow!("no single task matches id `{raw_id}`"))
    }
}

fn ensure_valid(errors: &[TaskValidationError]) -> anyhow::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let details = errors
        .iter()
        .map(|err| format!("{}: {err}", err.field()))
        .collect::<Vec<_>>()
        .join("; ");
    bail!("invalid task: {details}")
}
