use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::model::TaskPatch;

pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Task text must contain something besides whitespace.
pub fn validate_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("task text must not be empty");
    }
    Ok(())
}

/// Parse a due date in `YYYY-MM-DD` form.
pub fn parse_due_date(s: &str) -> Result<NaiveDate> {
    match NaiveDate::parse_from_str(s.trim(), DUE_DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(_) => bail!("invalid due date '{s}': expected YYYY-MM-DD"),
    }
}

/// A patch must name at least one of the updatable columns.
pub fn validate_patch(patch: &TaskPatch) -> Result<()> {
    if patch.is_empty() {
        bail!("update must set at least one of text, category, priority, dueDate, completed");
    }
    Ok(())
}
