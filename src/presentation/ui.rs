use crate::application::{App, AppMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

const ADD_PLACEHOLDER: &str = "New habit...";
const DONE_MARK: &str = "✅ ";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_habit_list(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::ConfirmDelete => render_confirm_delete_popup(f, app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.summary();
    let header = Paragraph::new(format!(
        "habitrack | ← {} → | Done: {}/{} ({}%)",
        app.current_month.label(),
        summary.done,
        summary.total,
        summary.completion_percent()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_habit_list(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .habits()
        .iter()
        .map(|habit| {
            if habit.done {
                ListItem::new(format!("{}{}", DONE_MARK, habit.name))
                    .style(Style::default().fg(Color::Green))
            } else {
                ListItem::new(habit.name.as_str())
            }
        })
        .collect();

    let title = if items.is_empty() {
        "Habits (none yet, press a to add)".to_string()
    } else {
        "Habits".to_string()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(app.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.mode {
        AppMode::Normal => {
            let text = if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                format!(
                    "File: {} | a: add | space: done | x: delete | ←→: month | Ctrl+S: save | Ctrl+E: export CSV | ?: help | q: quit",
                    app.habits_file.display()
                )
            };
            Line::from(text)
        }
        AppMode::Adding => {
            let typed = if app.input.is_empty() {
                Span::styled(ADD_PLACEHOLDER, Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(app.input.as_str())
            };
            Line::from(vec![
                Span::raw("Add habit: "),
                typed,
                Span::raw(" (Enter to add, Esc to cancel)"),
            ])
        }
        AppMode::ConfirmDelete => Line::from("Delete selected habit? (y to confirm, any other key to cancel)"),
        AppMode::Help => Line::from("↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help"),
        AppMode::ExportCsv => Line::from(format!(
            "Export CSV as: {} (Enter to export, Esc to cancel)",
            app.filename_input
        )),
    };

    let input = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Adding => Style::default().fg(Color::Green),
            AppMode::ConfirmDelete => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::ExportCsv => Style::default().fg(Color::Magenta),
        });
    f.render_widget(input, area);
}

fn popup_area(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_pct) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_pct) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_confirm_delete_popup(f: &mut Frame, app: &App) {
    let area = popup_area(f.area(), 60, 20);
    let name = app
        .selected
        .and_then(|i| app.habits().get(i))
        .map(|h| h.name.as_str())
        .unwrap_or_default();

    f.render_widget(Clear, area);
    let popup = Paragraph::new(format!("Delete \"{}\"?\n\ny: delete | any other key: cancel", name))
        .block(Block::default()
            .borders(Borders::ALL)
            .title("Delete habit")
            .style(Style::default().fg(Color::Red)));
    f.render_widget(popup, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area(), 80, 80);

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("habitrack Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"HABITRACK - MONTHLY HABIT TRACKER

=== BASIC CONCEPTS ===
• Each month has its own independent list of habits
• Habits do not carry over to the next month
• A habit is either pending or done (✅)

=== MONTHS ===
← or h          Previous month
→ or l          Next month
                Browsing an empty month does not change the file

=== HABITS ===
↑↓ or j/k       Move selection
a or i          Add a habit (Enter to add, Esc to cancel)
                Blank names are ignored
Space/d/Enter   Mark the selected habit done
x or Delete     Delete the selected habit (asks for confirmation)

=== FILE OPERATIONS ===
                Every change is saved immediately
Ctrl+S          Save now
Ctrl+E          Export the current month to a CSV file
                The habit file is JSON keyed by "year-month", e.g. "2025-5"
                Use --file <PATH> to choose a different habit file

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

q               Quit application"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HabitStore, MonthKey};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_month_header_and_habits() {
        let may = MonthKey::new(2025, 5).unwrap();
        let mut store = HabitStore::default();
        store.add_habit(may, "Exercise");
        store.add_habit(may, "Read");
        store.mark_done(may, 1);
        let app = App::new(store, "habits.json", may);

        let text = rendered_text(&app);
        assert!(text.contains("May 2025"));
        assert!(text.contains("Done: 1/2 (50%)"));
        assert!(text.contains("Exercise"));
        assert!(text.contains("Read"));
    }

    #[test]
    fn test_render_placeholder_while_adding() {
        let mut app = App::new(HabitStore::default(), "habits.json", MonthKey::new(2025, 5).unwrap());
        app.start_adding();

        let text = rendered_text(&app);
        assert!(text.contains(ADD_PLACEHOLDER));
        assert!(text.contains("none yet"));
    }

    #[test]
    fn test_render_delete_confirmation() {
        let may = MonthKey::new(2025, 5).unwrap();
        let mut store = HabitStore::default();
        store.add_habit(may, "Exercise");
        let mut app = App::new(store, "habits.json", may);
        app.request_delete();

        let text = rendered_text(&app);
        assert!(text.contains("Delete habit"));
        assert!(text.contains("\"Exercise\""));
    }
}
