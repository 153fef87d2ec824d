//! Application state management for the habit tracker.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface. Every change to the habit store is
//! written back to disk immediately.

use crate::domain::{HabitRecord, HabitStore, MonthKey, MonthSummary};
use crate::infrastructure::{CsvExporter, FileRepository, PersistenceError};
use log::{error, warn};
use std::path::{Path, PathBuf};

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted and which
/// prompt or popup is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing the month - arrows navigate, shortcuts available
    Normal,
    /// Typing the name of a new habit
    Adding,
    /// Waiting for the user to confirm deleting the selected habit
    ConfirmDelete,
    /// Help screen is displayed
    Help,
    /// CSV export dialog is open
    ExportCsv,
}

/// Main application state: the habit store plus everything the UI needs.
///
/// # Examples
///
/// ```
/// use habitrack::application::{App, AppMode};
/// use habitrack::domain::{HabitStore, MonthKey};
///
/// let month = MonthKey::new(2025, 5).unwrap();
/// let app = App::new(HabitStore::default(), "habits.json", month);
/// assert_eq!(app.mode, AppMode::Normal);
/// assert!(app.habits().is_empty());
/// assert!(app.selected.is_none());
/// ```
#[derive(Debug)]
pub struct App {
    /// All habits, keyed by month
    pub store: HabitStore,
    /// Where the store is saved after each change
    pub habits_file: PathBuf,
    /// Month currently displayed and edited
    pub current_month: MonthKey,
    /// Selected row in the current month's list
    pub selected: Option<usize>,
    /// Current application mode
    pub mode: AppMode,
    /// Input buffer for a new habit name
    pub input: String,
    /// Cursor position within the active buffer, in characters
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Input buffer for filename entry
    pub filename_input: String,
}

impl App {
    pub fn new(store: HabitStore, habits_file: impl Into<PathBuf>, current_month: MonthKey) -> Self {
        let mut app = Self {
            store,
            habits_file: habits_file.into(),
            current_month,
            selected: None,
            mode: AppMode::Normal,
            input: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            filename_input: String::new(),
        };
        app.reset_selection();
        app
    }

    /// Habits of the displayed month, in display order.
    pub fn habits(&self) -> &[HabitRecord] {
        self.store.list_habits(self.current_month)
    }

    pub fn summary(&self) -> MonthSummary {
        self.store.summarize(self.current_month)
    }

    pub fn previous_month(&mut self) {
        self.current_month = self.current_month.previous();
        self.reset_selection();
    }

    pub fn next_month(&mut self) {
        self.current_month = self.current_month.next();
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selected = if self.habits().is_empty() { None } else { Some(0) };
    }

    pub fn select_next(&mut self) {
        let len = self.habits().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i + 1 < len => Some(i + 1),
            Some(i) => Some(i),
            None => Some(0),
        };
    }

    pub fn select_previous(&mut self) {
        let len = self.habits().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.saturating_sub(1)),
            None => Some(len - 1),
        };
    }

    /// Switches to add mode with an empty name buffer.
    pub fn start_adding(&mut self) {
        self.mode = AppMode::Adding;
        self.input.clear();
        self.cursor_position = 0;
        self.status_message = None;
    }

    /// Adds the typed habit to the current month and saves.
    ///
    /// A blank name is ignored. Returns to normal mode either way.
    pub fn finish_adding(&mut self) {
        if self.store.add_habit(self.current_month, &self.input) {
            self.selected = Some(self.habits().len() - 1);
            self.save();
        }

        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_adding(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    /// Marks the selected habit done and saves. Does nothing without a selection.
    pub fn mark_selected_done(&mut self) {
        let Some(index) = self.selected else {
            return;
        };
        if self.store.mark_done(self.current_month, index) {
            self.save();
        }
    }

    /// Asks for confirmation before deleting the selected habit.
    pub fn request_delete(&mut self) {
        if self.selected.is_some() {
            self.mode = AppMode::ConfirmDelete;
            self.status_message = None;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.mode = AppMode::Normal;
        let Some(index) = self.selected else {
            return;
        };
        if self.store.delete_habit(self.current_month, index).is_some() {
            let len = self.habits().len();
            self.selected = if len == 0 { None } else { Some(index.min(len - 1)) };
            self.save();
        }
    }

    pub fn cancel_delete(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// Saves the store to the habit file and reports the result.
    pub fn save(&mut self) {
        let result = FileRepository::save_store(&self.store, &self.habits_file);
        self.set_save_result(result);
    }

    /// Processes the result of a save operation.
    pub fn set_save_result(&mut self, result: Result<(), PersistenceError>) {
        match result {
            Ok(()) => {
                self.status_message = Some(format!("Saved to {}", self.habits_file.display()));
            }
            Err(e) => {
                error!("event=save status=error reason={}", e);
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Switches to CSV export mode to prompt for a filename.
    ///
    /// Initializes the filename input with a name derived from the month.
    pub fn start_csv_export(&mut self) {
        self.mode = AppMode::ExportCsv;
        self.filename_input = format!("habits-{}.csv", self.current_month);
        self.cursor_position = self.filename_input.chars().count();
        self.status_message = None;
    }

    /// Gets the filename to use for CSV export.
    ///
    /// Returns the filename input if not blank, otherwise the month default.
    pub fn get_csv_export_filename(&self) -> String {
        let trimmed = self.filename_input.trim();
        if trimmed.is_empty() {
            format!("habits-{}.csv", self.current_month)
        } else {
            trimmed.to_string()
        }
    }

    /// Exports the current month to the entered filename.
    pub fn finish_csv_export(&mut self) {
        let filename = self.get_csv_export_filename();
        let result = CsvExporter::export_month(&self.store, self.current_month, Path::new(&filename))
            .map(|_| filename);
        self.set_csv_export_result(result);
    }

    /// Processes the result of a CSV export operation.
    pub fn set_csv_export_result(&mut self, result: Result<String, PersistenceError>) {
        match result {
            Ok(filename) => {
                self.status_message = Some(format!("Exported to {}", filename));
            }
            Err(e) => {
                warn!("event=export status=error reason={}", e);
                self.status_message = Some(format!("Export failed: {}", e));
            }
        }

        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn cancel_filename_input(&mut self) {
        self.mode = AppMode::Normal;
        self.filename_input.clear();
        self.cursor_position = 0;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    /// The text buffer that typing edits in the current mode, if any.
    fn active_buffer_mut(&mut self) -> Option<&mut String> {
        match self.mode {
            AppMode::Adding => Some(&mut self.input),
            AppMode::ExportCsv => Some(&mut self.filename_input),
            _ => None,
        }
    }

    fn active_buffer_len(&self) -> usize {
        match self.mode {
            AppMode::Adding => self.input.chars().count(),
            AppMode::ExportCsv => self.filename_input.chars().count(),
            _ => 0,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        if let Some(buffer) = self.active_buffer_mut() {
            let at = byte_index(buffer, cursor);
            buffer.insert(at, c);
            self.cursor_position += 1;
        }
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        let cursor = self.cursor_position;
        if cursor == 0 {
            return;
        }
        if let Some(buffer) = self.active_buffer_mut() {
            let at = byte_index(buffer, cursor - 1);
            buffer.remove(at);
            self.cursor_position -= 1;
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete_char(&mut self) {
        let cursor = self.cursor_position;
        if cursor >= self.active_buffer_len() {
            return;
        }
        if let Some(buffer) = self.active_buffer_mut() {
            let at = byte_index(buffer, cursor);
            buffer.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.active_buffer_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.active_buffer_len();
    }
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(s.len())
}
