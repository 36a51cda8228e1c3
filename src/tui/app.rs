use anyhow::Result;
use ratatui::widgets::ListState;

use crate::client::TaskApi;
use crate::model::{NewTask, Priority, Task, TaskPatch, CATEGORIES};
use crate::validate::{parse_due_date, validate_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Category,
    Priority,
    DueDate,
}

pub struct TaskForm {
    pub text: String,
    pub category: usize,
    pub priority: Priority,
    pub due_date: String,
    pub focused: FormField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            category: 0,
            priority: Priority::Medium,
            due_date: String::new(),
            focused: FormField::Text,
        }
    }

    pub fn category(&self) -> &'static str {
        CATEGORIES[self.category]
    }

    /// The text buffer under focus, if the focused field takes typed input.
    pub fn focused_buf_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Text => Some(&mut self.text),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Category | FormField::Priority => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            FormField::Text => FormField::Category,
            FormField::Category => FormField::Priority,
            FormField::Priority => FormField::DueDate,
            FormField::DueDate => FormField::Text,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            FormField::Text => FormField::DueDate,
            FormField::Category => FormField::Text,
            FormField::Priority => FormField::Category,
            FormField::DueDate => FormField::Priority,
        };
    }

    /// Step the focused selector forwards or backwards, wrapping around.
    pub fn cycle(&mut self, forward: bool) {
        match self.focused {
            FormField::Category => {
                let n = CATEGORIES.len();
                self.category = if forward {
                    (self.category + 1) % n
                } else {
                    (self.category + n - 1) % n
                };
            }
            FormField::Priority => {
                let all = Priority::ALL;
                let i = all.iter().position(|p| *p == self.priority).unwrap_or(0);
                let n = all.len();
                let i = if forward { (i + 1) % n } else { (i + n - 1) % n };
                self.priority = all[i];
            }
            FormField::Text | FormField::DueDate => {}
        }
    }

    pub fn to_new_task(&self) -> Result<NewTask> {
        validate_text(&self.text)?;
        let due_date = if self.due_date.trim().is_empty() {
            None
        } else {
            Some(parse_due_date(&self.due_date)?.format("%Y-%m-%d").to_string())
        };
        Ok(NewTask {
            text: self.text.clone(),
            category: Some(self.category().to_string()),
            priority: Some(self.priority.as_str().to_string()),
            due_date,
        })
    }

    /// Clear the per-task entries. Category and priority carry over.
    pub fn clear_entry(&mut self) {
        self.text.clear();
        self.due_date.clear();
        self.focused = FormField::Text;
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-side copy of the task list and the state of the form around it.
///
/// Mutations go to the server first; local state changes only once the
/// server has accepted them. Failures are kept in `error` for display.
pub struct App {
    pub tasks: Vec<Task>,
    pub cursor: usize,
    pub list_state: ListState,
    pub loading: bool,
    pub mode: Mode,
    pub form: TaskForm,
    pub error: Option<String>,
}

impl App {
    pub fn new() -> Self {
        App {
            tasks: Vec::new(),
            cursor: 0,
            list_state: ListState::default(),
            loading: true,
            mode: Mode::List,
            form: TaskForm::new(),
            error: None,
        }
    }

    fn fail(&mut self, action: &str, err: anyhow::Error) {
        log::warn!("{action}: {err:#}");
        self.error = Some(format!("{action}: {err:#}"));
    }

    fn clamp_cursor(&mut self) {
        if self.tasks.is_empty() {
            self.cursor = 0;
            self.list_state.select(None);
            return;
        }
        if self.cursor >= self.tasks.len() {
            self.cursor = self.tasks.len() - 1;
        }
        self.list_state.select(Some(self.cursor));
    }

    pub fn load(&mut self, api: &impl TaskApi) {
        match api.list() {
            Ok(tasks) => {
                log::info!("loaded {} tasks", tasks.len());
                self.tasks = tasks;
                self.error = None;
                self.clamp_cursor();
            }
            Err(e) => self.fail("Could not load tasks", e),
        }
        self.loading = false;
    }

    pub fn selected(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn move_down(&mut self) {
        if !self.tasks.is_empty() && self.cursor < self.tasks.len() - 1 {
            self.cursor += 1;
            self.list_state.select(Some(self.cursor));
        }
    }

    pub fn focus_form(&mut self) {
        self.mode = Mode::Form;
    }

    pub fn focus_list(&mut self) {
        self.mode = Mode::List;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn submit(&mut self, api: &impl TaskApi) {
        let new = match self.form.to_new_task() {
            Ok(new) => new,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };
        match api.create(&new) {
            Ok(task) => {
                log::info!("added task {}", task.id);
                self.tasks.insert(0, task);
                self.cursor = 0;
                self.clamp_cursor();
                self.form.clear_entry();
                self.error = None;
            }
            Err(e) => self.fail("Could not add task", e),
        }
    }

    pub fn toggle_selected(&mut self, api: &impl TaskApi) {
        let Some(task) = self.selected() else {
            return;
        };
        let (id, completed) = (task.id, !task.completed);
        match api.update(id, &TaskPatch::completed(completed)) {
            Ok(result) if result.changes == 0 => {
                self.tasks.retain(|t| t.id != id);
                self.clamp_cursor();
                self.error = Some(format!("Task {id} no longer exists"));
            }
            Ok(_) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.completed = completed;
                }
                self.error = None;
            }
            Err(e) => self.fail("Could not update task", e),
        }
    }

    pub fn delete_selected(&mut self, api: &impl TaskApi) {
        let Some(id) = self.selected().map(|t| t.id) else {
            return;
        };
        match api.delete(id) {
            Ok(_) => {
                self.tasks.retain(|t| t.id != id);
                self.clamp_cursor();
                self.error = None;
            }
            Err(e) => self.fail("Could not delete task", e),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
