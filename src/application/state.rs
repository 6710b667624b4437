//! Application state for the job application form.
//!
//! [`App`] owns the live form values, the errors from the last validation
//! pass, the submission state machine and the summary panel. All changes
//! happen on the event loop thread in response to a key press or a timer
//! poll.

use super::submission::{Clock, DEFAULT_SUBMIT_DELAY, SubmitTimer, SystemClock, TimerState};
use crate::domain::{ApplicationForm, FormField, FormValidator, Position, Skill, SubmittedSnapshot, ValidationErrors};
use std::time::Duration;
use tracing::{debug, info};

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Form is shown and receives input
    Form,
    /// Help screen is displayed
    Help,
}

/// A widget that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A free-text input
    Text(FormField),
    /// The position selector
    Position,
    /// Checkbox for a catalog skill
    Skill(Skill),
    /// The "Other" checkbox
    OtherSkillToggle,
    /// The submit button
    Submit,
}

/// Where the submission pipeline currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    /// Accepted and waiting for the simulated processing delay.
    Submitting(SubmitTimer),
}

/// Main application state containing the form and UI state.
///
/// # Examples
///
/// ```
/// use jobform::application::App;
/// use jobform::domain::FormField;
///
/// let mut app = App::default();
/// app.set_text(FormField::FullName, "Ada Lovelace");
/// assert_eq!(app.form.full_name, "Ada Lovelace");
/// assert!(!app.is_submitting());
/// ```
#[derive(Debug)]
pub struct App {
    /// Live form values
    pub form: ApplicationForm,
    /// Errors from the most recent validation pass
    pub errors: ValidationErrors,
    /// Info block flag, kept equal to [`App::info_block_visible`]
    pub show_info_box: bool,
    /// Whether the "Other" checkbox is checked and its text input shown
    pub show_other_skill_input: bool,
    /// Submission pipeline state
    pub submission: SubmissionState,
    /// Whether the summary panel is open
    pub show_summary: bool,
    /// Snapshot shown in the summary panel
    pub submitted: Option<SubmittedSnapshot>,
    /// Widget receiving keyboard input
    pub focus: Focus,
    /// Cursor position (in characters) within the focused text input
    pub cursor_position: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Simulated processing time for an accepted submission
    pub submit_delay: Duration,
    clock: Box<dyn Clock>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(SystemClock, DEFAULT_SUBMIT_DELAY)
    }
}

impl App {
    /// Creates an empty form that measures the submit delay with `clock`.
    pub fn new(clock: impl Clock + 'static, submit_delay: Duration) -> Self {
        Self {
            form: ApplicationForm::default(),
            errors: ValidationErrors::new(),
            show_info_box: false,
            show_other_skill_input: false,
            submission: SubmissionState::Idle,
            show_summary: false,
            submitted: None,
            focus: Focus::Text(FormField::FullName),
            cursor_position: 0,
            mode: AppMode::Form,
            help_scroll: 0,
            status_message: None,
            submit_delay,
            clock: Box::new(clock),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionState::Submitting(_))
    }

    /// Fields accept edits only while no submission is in flight.
    pub fn is_editable(&self) -> bool {
        !self.is_submitting()
    }

    pub fn submit_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() { "Submitting..." } else { "Submit" }
    }

    /// Whether the conditional info block is shown.
    ///
    /// Derived from the current position; hidden for the whole time a
    /// submission is in flight.
    pub fn info_block_visible(&self) -> bool {
        self.form.position.has_conditional_fields() && !self.is_submitting()
    }

    /// Conditional fields currently on screen.
    pub fn visible_conditional_fields(&self) -> &'static [FormField] {
        if self.info_block_visible() {
            self.form.position.conditional_fields()
        } else {
            &[]
        }
    }

    /// Replaces one text field, keeping all others.
    ///
    /// Ignored while submitting or when `field` is not a text field.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        let changed = self.form.set_text(field, value);
        self.refresh_derived();
        changed
    }

    /// Change handler for the position selector.
    ///
    /// The placeholder cannot be chosen, so `Position::Unset` is ignored.
    pub fn select_position(&mut self, position: Position) {
        if !self.is_editable() || position == Position::Unset {
            return;
        }
        self.form.position = position;
        // Selector handler writes the flag directly; refresh_derived writes the same value.
        self.show_info_box = Position::SELECTABLE.contains(&position);
        self.refresh_derived();
        debug!(position = %position, "position selected");
    }

    /// Applies an arbitrary update to the form and re-derives UI state.
    ///
    /// Any path that changes the position goes through here or
    /// [`App::select_position`], so visibility never goes stale.
    pub fn update_form(&mut self, update: impl FnOnce(&mut ApplicationForm)) {
        if !self.is_editable() {
            return;
        }
        update(&mut self.form);
        self.refresh_derived();
    }

    /// Checks or unchecks a catalog skill.
    pub fn set_skill(&mut self, skill: Skill, checked: bool) {
        if !self.is_editable() {
            return;
        }
        if checked {
            self.form.add_skill(skill);
        } else {
            self.form.remove_skill(skill);
        }
    }

    pub fn toggle_skill(&mut self, skill: Skill) {
        let checked = !self.form.has_skill(skill);
        self.set_skill(skill, checked);
    }

    /// Checks or unchecks "Other".
    ///
    /// Unchecking hides the free-text input and clears its value.
    pub fn set_other_skill_checked(&mut self, checked: bool) {
        if !self.is_editable() {
            return;
        }
        self.show_other_skill_input = checked;
        if !checked {
            self.form.other_skill.clear();
        }
        self.refresh_derived();
    }

    pub fn toggle_other_skill(&mut self) {
        let checked = !self.show_other_skill_input;
        self.set_other_skill_checked(checked);
    }

    /// Recomputes every error from scratch.
    ///
    /// # Returns
    ///
    /// `true` if the form has no errors
    pub fn validate(&mut self) -> bool {
        self.errors = FormValidator::validate(&self.form);
        self.errors.is_empty()
    }

    /// Handles a submit attempt.
    ///
    /// An invalid form keeps its errors on screen and stays idle. A valid
    /// form starts the submit timer. Attempts while a submission is in
    /// flight are ignored.
    ///
    /// # Returns
    ///
    /// `true` if the submission was accepted
    pub fn submit(&mut self) -> bool {
        if self.is_submitting() {
            debug!("submit ignored: submission already in flight");
            return false;
        }

        if !self.validate() {
            info!(errors = self.errors.len(), "submission rejected");
            return false;
        }

        let timer = SubmitTimer::start(self.clock.now(), self.submit_delay);
        self.submission = SubmissionState::Submitting(timer);
        self.refresh_derived();
        info!(position = %self.form.position, delay_ms = self.submit_delay.as_millis() as u64, "submission accepted");
        true
    }

    /// Polls the submit timer and finishes the submission once it elapses.
    ///
    /// # Returns
    ///
    /// `true` if the state changed
    pub fn tick(&mut self) -> bool {
        let state = match &self.submission {
            SubmissionState::Idle => return false,
            SubmissionState::Submitting(timer) => timer.poll(self.clock.now()),
        };

        match state {
            TimerState::Pending(_) => false,
            TimerState::Elapsed => {
                self.complete_submission();
                true
            }
            TimerState::Cancelled => {
                self.submission = SubmissionState::Idle;
                self.refresh_derived();
                info!("submission cancelled");
                true
            }
        }
    }

    /// Cancels an in-flight submission. The form keeps its values.
    pub fn cancel_submission(&mut self) {
        if let SubmissionState::Submitting(timer) = &mut self.submission {
            timer.cancel();
        }
    }

    /// Time until the submit timer needs another poll, if one is running.
    pub fn time_until_tick(&self) -> Option<Duration> {
        match &self.submission {
            SubmissionState::Submitting(timer) => match timer.poll(self.clock.now()) {
                TimerState::Pending(remaining) => Some(remaining),
                TimerState::Elapsed | TimerState::Cancelled => Some(Duration::ZERO),
            },
            SubmissionState::Idle => None,
        }
    }

    fn complete_submission(&mut self) {
        let snapshot = SubmittedSnapshot::capture(&self.form);
        self.submission = SubmissionState::Idle;
        self.submitted = Some(snapshot);
        self.show_summary = true;
        self.reset_form();
        info!("submission completed");
    }

    /// Restores every field, error and visibility flag to the initial state.
    ///
    /// The summary panel is left alone.
    pub fn reset_form(&mut self) {
        self.form = ApplicationForm::default();
        self.errors.clear();
        self.show_other_skill_input = false;
        self.focus = Focus::Text(FormField::FullName);
        self.cursor_position = 0;
        self.refresh_derived();
    }

    /// Closes the summary panel and discards the snapshot.
    pub fn dismiss_summary(&mut self) {
        if self.show_summary {
            debug!("summary dismissed");
        }
        self.show_summary = false;
        self.submitted = None;
    }

    /// Re-derives visibility flags and keeps focus on a visible widget.
    fn refresh_derived(&mut self) {
        self.show_info_box = self.info_block_visible();

        if !self.focus_order().contains(&self.focus) {
            self.focus = match self.focus {
                Focus::Text(FormField::OtherSkill) => Focus::OtherSkillToggle,
                _ => Focus::Position,
            };
            self.cursor_position = self.focused_text_len();
        }
    }

    /// Focusable widgets in screen order.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![
            Focus::Text(FormField::FullName),
            Focus::Text(FormField::Email),
            Focus::Text(FormField::PhoneNumber),
            Focus::Position,
        ];
        order.extend(self.visible_conditional_fields().iter().map(|f| Focus::Text(*f)));
        order.extend(Skill::CATALOG.iter().map(|s| Focus::Skill(*s)));
        order.push(Focus::OtherSkillToggle);
        if self.show_other_skill_input {
            order.push(Focus::Text(FormField::OtherSkill));
        }
        order.push(Focus::Text(FormField::PreferredInterviewTime));
        order.push(Focus::Submit);
        order
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, step: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(order.len() as isize) as usize;
        self.focus = order[next];
        self.cursor_position = self.focused_text_len();
    }

    /// The text field under focus, if focus is on a text input.
    pub fn focused_text_field(&self) -> Option<FormField> {
        match self.focus {
            Focus::Text(field) => Some(field),
            _ => None,
        }
    }

    fn focused_text_len(&self) -> usize {
        self.focused_text_field()
            .and_then(|field| self.form.text(field))
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    /// Inserts a character at the cursor of the focused text input.
    pub fn insert_char(&mut self, c: char) {
        self.edit_focused(|chars, cursor| {
            chars.insert(cursor, c);
            cursor + 1
        });
    }

    /// Deletes the character before the cursor.
    pub fn delete_backward(&mut self) {
        self.edit_focused(|chars, cursor| {
            if cursor > 0 {
                chars.remove(cursor - 1);
                cursor - 1
            } else {
                cursor
            }
        });
    }

    /// Deletes the character under the cursor.
    pub fn delete_forward(&mut self) {
        self.edit_focused(|chars, cursor| {
            if cursor < chars.len() {
                chars.remove(cursor);
            }
            cursor
        });
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut Vec<char>, usize) -> usize) {
        let Some(field) = self.focused_text_field() else {
            return;
        };
        if !self.is_editable() {
            return;
        }
        let mut chars: Vec<char> = self.form.text(field).unwrap_or_default().chars().collect();
        let cursor = self.cursor_position.min(chars.len());
        let cursor = edit(&mut chars, cursor);
        if self.set_text(field, chars.into_iter().collect::<String>()) {
            self.cursor_position = cursor;
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_text_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_text_len();
    }

    /// Processes the result of copying the summary to the clipboard.
    pub fn set_copy_result(&mut self, result: Result<(), String>) {
        self.status_message = Some(match result {
            Ok(()) => "Summary copied to clipboard".to_string(),
            Err(error) => format!("Copy failed: {}", error),
        });
    }
}
