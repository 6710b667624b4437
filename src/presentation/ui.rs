use crate::application::{App, AppMode, Focus};
use crate::domain::{FormField, Position, Skill, SubmittedSnapshot, ValidationErrors};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const INDENT: &str = "  ";
const INFO_INDENT: &str = "  │ ";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_form(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    if app.show_summary {
        if let Some(snapshot) = app.submitted.as_ref() {
            render_summary_popup(f, snapshot);
        }
    }

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("jobform - Job Application Form")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

/// Form body as lines, plus where the cursor goes for the focused text input.
struct FormLines {
    lines: Vec<Line<'static>>,
    focus_line: usize,
    cursor: Option<(usize, usize)>,
}

impl FormLines {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            focus_line: 0,
            cursor: None,
        }
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::from(""));
    }

    fn mark_focus(&mut self) {
        self.focus_line = self.lines.len();
    }
}

fn is_required(field: FormField) -> bool {
    !matches!(
        field,
        FormField::PortfolioUrl | FormField::OtherSkill | FormField::AdditionalSkills
    )
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

fn label_line(app: &App, field: FormField, indent: &'static str) -> Line<'static> {
    let marker = if is_required(field) { "*" } else { "" };
    let mut spans = vec![
        Span::raw(indent),
        Span::styled(format!("{}{}", field.label(), marker), Style::default().fg(Color::Yellow)),
    ];
    if let Some(message) = app.errors.get(field) {
        spans.push(Span::styled(format!("  {}", message), Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn push_text_input(out: &mut FormLines, app: &App, field: FormField, indent: &'static str) {
    out.push(label_line(app, field, indent));

    let focused = app.focus == Focus::Text(field);
    let value = app.form.text(field).unwrap_or_default().to_string();
    let prefix = format!("{}> ", indent);

    if focused {
        out.mark_focus();
        let col = prefix.chars().count() + app.cursor_position.min(value.chars().count());
        out.cursor = Some((out.lines.len(), col));
    }

    let body = if value.is_empty() {
        // Errors double as the placeholder of an empty input
        match app.errors.get(field) {
            Some(message) => Span::styled(message.to_string(), Style::default().fg(Color::Red)),
            None => Span::styled(field.placeholder().to_string(), Style::default().fg(Color::DarkGray)),
        }
    } else {
        Span::styled(value, focus_style(focused))
    };

    out.push(Line::from(vec![Span::raw(prefix), body]));
}

fn build_form_lines(app: &App) -> FormLines {
    let mut out = FormLines::new();

    for field in [FormField::FullName, FormField::Email, FormField::PhoneNumber] {
        push_text_input(&mut out, app, field, INDENT);
    }

    out.push(label_line(app, FormField::Position, INDENT));
    let position_focused = app.focus == Focus::Position;
    if position_focused {
        out.mark_focus();
    }
    let position_style = if app.form.position == Position::Unset {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    out.push(Line::from(vec![
        Span::raw(format!("{}> ", INDENT)),
        Span::styled(
            format!("◀ {} ▶", app.form.position.label()),
            position_style.patch(focus_style(position_focused)),
        ),
    ]));

    if app.info_block_visible() {
        out.push(Line::from(Span::styled(
            format!("{}┌ {} details", INDENT, app.form.position),
            Style::default().fg(Color::Cyan),
        )));
        for field in app.visible_conditional_fields() {
            push_text_input(&mut out, app, *field, INFO_INDENT);
        }
        out.push(Line::from(Span::styled(format!("{}└", INDENT), Style::default().fg(Color::Cyan))));
    }

    out.blank();
    out.push(label_line(app, FormField::AdditionalSkills, INDENT));
    for skill in Skill::CATALOG {
        let focused = app.focus == Focus::Skill(skill);
        if focused {
            out.mark_focus();
        }
        let mark = if app.form.has_skill(skill) { "[x]" } else { "[ ]" };
        out.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(format!("{} {}", mark, skill), focus_style(focused)),
        ]));
    }

    let other_focused = app.focus == Focus::OtherSkillToggle;
    if other_focused {
        out.mark_focus();
    }
    let other_mark = if app.show_other_skill_input { "[x]" } else { "[ ]" };
    out.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(format!("{} Other", other_mark), focus_style(other_focused)),
    ]));
    if app.show_other_skill_input {
        push_text_input(&mut out, app, FormField::OtherSkill, INFO_INDENT);
    }

    out.blank();
    push_text_input(&mut out, app, FormField::PreferredInterviewTime, INDENT);

    out.blank();
    let submit_focused = app.focus == Focus::Submit;
    if submit_focused {
        out.mark_focus();
    }
    let submit_style = if app.submit_enabled() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    out.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(
            format!("[ {} ]", app.submit_label()),
            submit_style.patch(focus_style(submit_focused && app.submit_enabled())),
        ),
    ]));

    out
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let form = build_form_lines(app);
    let inner_height = area.height.saturating_sub(2) as usize;

    // Scroll just enough to keep the focused widget on screen
    let scroll = if inner_height == 0 {
        0
    } else {
        (form.focus_line + 2).saturating_sub(inner_height)
    };

    let title = if app.is_editable() { "Application" } else { "Application (submitting)" };
    let body = Paragraph::new(form.lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((scroll as u16, 0));
    f.render_widget(body, area);

    let panel_open = app.show_summary || matches!(app.mode, AppMode::Help);
    if let Some((line, col)) = form.cursor {
        if !panel_open && app.is_editable() && line >= scroll && line - scroll < inner_height {
            let x = area.x + 1 + col as u16;
            let y = area.y + 1 + (line - scroll) as u16;
            if x < area.x + area.width.saturating_sub(1) {
                f.set_cursor_position((x, y));
            }
        }
    }
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Form if app.show_summary => "Esc/Enter: close summary | y: copy as JSON".to_string(),
        AppMode::Form => match app.status_message {
            Some(ref status) => status.clone(),
            None if app.is_submitting() => "Submitting application...".to_string(),
            None if !app.errors.is_empty() => error_summary(&app.errors),
            None => "Tab/↑↓: move | ←→: choose position | Space: toggle | Ctrl+S: submit | F1: help | Ctrl+Q: quit"
                .to_string(),
        },
    };

    let style = match app.mode {
        AppMode::Help => Style::default().fg(Color::Cyan),
        AppMode::Form if app.is_submitting() => Style::default().fg(Color::Yellow),
        AppMode::Form => Style::default(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn error_summary(errors: &ValidationErrors) -> String {
    let fields: Vec<&str> = errors.iter().map(|e| e.field.label()).collect();
    let noun = if fields.len() == 1 { "field needs" } else { "fields need" };
    format!("{} {} attention: {}", fields.len(), noun, fields.join(", "))
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_summary_popup(f: &mut Frame, snapshot: &SubmittedSnapshot) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = snapshot
        .summary_lines()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(value),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[ Close ]", Style::default().fg(Color::LightBlue))));

    let summary = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Submitted Data")
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    f.render_widget(summary, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("jobform Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"JOB APPLICATION FORM

=== FIELDS ===
Fields marked * are required.
Relevant Experience     Developers and Designers, a number greater than 0
Portfolio URL           Required for Designers, must start with http:// or https://
Management Experience   Required for Managers
Additional Skills       Check at least one skill, or check Other and type one
Preferred Interview     Date and time, e.g. 2026-11-02T10:30

=== NAVIGATION ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
← →             Choose position (when the selector is focused)
Space / Enter   Toggle a checkbox, press Submit
Enter           Move on from a text field
Home / End      Jump within a text field
Ctrl+S          Submit from anywhere
F1              Show this help
Ctrl+Q / Ctrl+C Quit

=== AFTER SUBMITTING ===
The form clears and a summary of what was sent is shown.
Esc / Enter     Close the summary
y               Copy the summary to the clipboard as JSON

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ManualClock;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn create_test_app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        let app = App::new(clock.clone(), Duration::from_millis(500));
        (app, clock)
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 60);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_render_empty_form() {
        let (app, _) = create_test_app();
        let screen = render_to_string(&app);

        assert!(screen.contains("Full Name*"));
        assert!(screen.contains("-- Select Position --"));
        assert!(screen.contains("[ ] JavaScript"));
        assert!(screen.contains("[ ] Other"));
        assert!(screen.contains("[ Submit ]"));
        assert!(!screen.contains("details"));
    }

    #[test]
    fn test_render_errors_and_info_block() {
        let (mut app, _) = create_test_app();
        app.select_position(Position::Designer);
        app.submit();
        let screen = render_to_string(&app);

        assert!(screen.contains("Designer details"));
        assert!(screen.contains("Portfolio URL is required"));
        assert!(screen.contains("At least one skill must be selected"));
        assert!(!screen.contains("Management Experience"));
        assert!(screen.contains("7 fields need attention: Full Name, Email"));
    }

    #[test]
    fn test_error_summary_lists_fields_in_order() {
        let mut errors = ValidationErrors::new();
        errors.insert(FormField::PreferredInterviewTime, "required");
        assert_eq!(error_summary(&errors), "1 field needs attention: Preferred Interview Time");

        errors.insert(FormField::Email, "invalid");
        assert_eq!(
            error_summary(&errors),
            "2 fields need attention: Email, Preferred Interview Time"
        );
    }

    #[test]
    fn test_status_message_takes_precedence_over_errors() {
        let (mut app, _) = create_test_app();
        app.submit();
        app.set_copy_result(Err("no display".to_string()));
        let screen = render_to_string(&app);
        assert!(screen.contains("Copy failed: no display"));
        assert!(!screen.contains("need attention"));
    }

    #[test]
    fn test_render_submitting_and_summary() {
        let (mut app, clock) = create_test_app();
        app.set_text(FormField::FullName, "Ada Lovelace");
        app.set_text(FormField::Email, "ada@example.com");
        app.set_text(FormField::PhoneNumber, "555-0100");
        app.select_position(Position::Developer);
        app.set_text(FormField::RelevantExperience, "9");
        app.set_skill(Skill::React, true);
        app.set_text(FormField::PreferredInterviewTime, "2026-11-02T10:30");
        app.submit();

        let screen = render_to_string(&app);
        assert!(screen.contains("[ Submitting... ]"));
        assert!(!screen.contains("Developer details"));

        clock.advance(Duration::from_millis(500));
        app.tick();
        let screen = render_to_string(&app);
        assert!(screen.contains("Submitted Data"));
        assert!(screen.contains("Full Name: Ada Lovelace"));
        assert!(screen.contains("Relevant Experience: 9 years"));
        assert!(screen.contains("Additional Skills: React"));
    }

    #[test]
    fn test_render_help_popup() {
        let (mut app, _) = create_test_app();
        app.mode = AppMode::Help;
        let screen = render_to_string(&app);
        assert!(screen.contains("jobform Help"));
        assert!(screen.contains("JOB APPLICATION FORM"));
    }
}
