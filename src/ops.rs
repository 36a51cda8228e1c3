use anyhow::{bail, Result};
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::model::{NewTask, Task, TaskPatch};
use crate::validate::validate_patch;

const TASK_COLUMNS: &str = "id, text, completed, category, priority, due_date, created_at";

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        category: row.get(3)?,
        priority: row.get(4)?,
        due_date: row.get(5)?,
        created_at: row.get(6)?,
    })
}

// Blank optional inputs are stored as NULL.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// All tasks, newest first.
pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], row_to_task)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}

pub fn get_task(conn: &Connection, id: i64) -> Result<Task> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            [id],
            row_to_task,
        )
        .optional()?;
    match task {
        Some(task) => Ok(task),
        None => bail!("task {id} not found"),
    }
}

/// Insert a task and return the stored row, with its assigned id and timestamp.
pub fn create_task(conn: &Connection, new: &NewTask) -> Result<Task> {
    conn.execute(
        "INSERT INTO tasks (text, category, priority, due_date) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            new.text,
            non_blank(new.category.as_deref()),
            non_blank(new.priority.as_deref()),
            non_blank(new.due_date.as_deref()),
        ],
    )?;
    get_task(conn, conn.last_insert_rowid())
}

/// Apply the fields present in `patch` to task `id`. Returns the number of
/// rows changed, which is 0 when no such task exists.
pub fn update_task(conn: &Connection, id: i64, patch: &TaskPatch) -> Result<usize> {
    validate_patch(patch)?;

    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(ref text) = patch.text {
        assignments.push("text = ?");
        values.push(Box::new(text.clone()));
    }
    if let Some(ref category) = patch.category {
        assignments.push("category = ?");
        values.push(Box::new(category.clone()));
    }
    if let Some(ref priority) = patch.priority {
        assignments.push("priority = ?");
        values.push(Box::new(priority.clone()));
    }
    if let Some(ref due_date) = patch.due_date {
        assignments.push("due_date = ?");
        values.push(Box::new(due_date.clone()));
    }
    if let Some(completed) = patch.completed {
        assignments.push("completed = ?");
        values.push(Box::new(i64::from(completed)));
    }
    values.push(Box::new(id));

    let sql = format!("UPDATE tasks SET {} WHERE id = ?", assignments.join(", "));
    let params: Vec<&dyn ToSql> = values.iter().map(AsRef::as_ref).collect();
    let changed = conn.execute(&sql, params.as_slice())?;
    Ok(changed)
}

/// Delete task `id` permanently. Returns the number of rows removed.
pub fn delete_task(conn: &Connection, id: i64) -> Result<usize> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(changed)
}
