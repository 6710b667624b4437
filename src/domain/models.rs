use serde::{Deserialize, Serialize};
use std::fmt;

/// The role an applicant is applying for.
///
/// `Unset` is the placeholder shown before a choice is made; it can never be
/// picked again once a real position has been selected through the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    #[serde(rename = "")]
    Unset,
    Developer,
    Designer,
    Manager,
}

impl Position {
    /// Positions offered by the selector, in display order.
    pub const SELECTABLE: [Position; 3] = [Position::Developer, Position::Designer, Position::Manager];

    /// Text shown in the selector for this value.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Unset => "-- Select Position --",
            Position::Developer => "Developer",
            Position::Designer => "Designer",
            Position::Manager => "Manager",
        }
    }

    /// Whether choosing this position reveals the conditional info block.
    pub fn has_conditional_fields(&self) -> bool {
        !matches!(self, Position::Unset)
    }

    pub fn requires_relevant_experience(&self) -> bool {
        matches!(self, Position::Developer | Position::Designer)
    }

    /// Conditional fields shown in the info block, in display order.
    pub fn conditional_fields(&self) -> &'static [FormField] {
        match self {
            Position::Unset => &[],
            Position::Developer => &[FormField::RelevantExperience],
            Position::Designer => &[FormField::RelevantExperience, FormField::PortfolioUrl],
            Position::Manager => &[FormField::ManagementExperience],
        }
    }

    /// Next selectable position, wrapping around. `Unset` moves to the first entry.
    pub fn next(self) -> Position {
        match self {
            Position::Unset | Position::Manager => Position::Developer,
            Position::Developer => Position::Designer,
            Position::Designer => Position::Manager,
        }
    }

    /// Previous selectable position, wrapping around. `Unset` moves to the last entry.
    pub fn previous(self) -> Position {
        match self {
            Position::Unset | Position::Developer => Position::Manager,
            Position::Designer => Position::Developer,
            Position::Manager => Position::Designer,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Unset => Ok(()),
            other => f.write_str(other.label()),
        }
    }
}

/// One of the predefined skills offered as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    JavaScript,
    #[serde(rename = "CSS")]
    Css,
    Python,
    #[serde(rename = "HTML")]
    Html,
    React,
}

impl Skill {
    pub const CATALOG: [Skill; 5] = [Skill::JavaScript, Skill::Css, Skill::Python, Skill::Html, Skill::React];

    pub fn name(&self) -> &'static str {
        match self {
            Skill::JavaScript => "JavaScript",
            Skill::Css => "CSS",
            Skill::Python => "Python",
            Skill::Html => "HTML",
            Skill::React => "React",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a field of the application form.
///
/// Declaration order is display order, so maps keyed by `FormField` iterate
/// top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FullName,
    Email,
    PhoneNumber,
    Position,
    RelevantExperience,
    PortfolioUrl,
    ManagementExperience,
    AdditionalSkills,
    OtherSkill,
    PreferredInterviewTime,
}

impl FormField {
    /// Stable camelCase key, matching the serialized form.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Position => "position",
            FormField::RelevantExperience => "relevantExperience",
            FormField::PortfolioUrl => "portfolioUrl",
            FormField::ManagementExperience => "managementExperience",
            FormField::AdditionalSkills => "additionalSkills",
            FormField::OtherSkill => "otherSkill",
            FormField::PreferredInterviewTime => "preferredInterviewTime",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FullName => "Full Name",
            FormField::Email => "Email",
            FormField::PhoneNumber => "Phone Number",
            FormField::Position => "Applying for Position",
            FormField::RelevantExperience => "Relevant Experience (in years)",
            FormField::PortfolioUrl => "Portfolio URL",
            FormField::ManagementExperience => "Management Experience",
            FormField::AdditionalSkills => "Additional Skills (at least 1)",
            FormField::OtherSkill => "Other Skill",
            FormField::PreferredInterviewTime => "Preferred Interview Time",
        }
    }

    /// Placeholder shown in an empty input with no error.
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::RelevantExperience => "Relevant Experience",
            FormField::PreferredInterviewTime => "YYYY-MM-DDTHH:MM",
            other => other.label(),
        }
    }

    /// Whether the field is edited as free text.
    pub fn is_text(&self) -> bool {
        !matches!(self, FormField::Position | FormField::AdditionalSkills)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// All values collected by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub position: Position,
    pub relevant_experience: String,
    pub portfolio_url: String,
    pub management_experience: String,
    /// Catalog skills in the order they were checked, without duplicates.
    pub additional_skills: Vec<Skill>,
    pub other_skill: String,
    pub preferred_interview_time: String,
}

impl ApplicationForm {
    /// Returns the value of a text field, or `None` for non-text fields.
    pub fn text(&self, field: FormField) -> Option<&str> {
        let value = match field {
            FormField::FullName => &self.full_name,
            FormField::Email => &self.email,
            FormField::PhoneNumber => &self.phone_number,
            FormField::RelevantExperience => &self.relevant_experience,
            FormField::PortfolioUrl => &self.portfolio_url,
            FormField::ManagementExperience => &self.management_experience,
            FormField::OtherSkill => &self.other_skill,
            FormField::PreferredInterviewTime => &self.preferred_interview_time,
            FormField::Position | FormField::AdditionalSkills => return None,
        };
        Some(value.as_str())
    }

    /// Replaces a single text field, leaving every other field untouched.
    ///
    /// Returns `false` (and changes nothing) when `field` is not a text field.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let slot = match field {
            FormField::FullName => &mut self.full_name,
            FormField::Email => &mut self.email,
            FormField::PhoneNumber => &mut self.phone_number,
            FormField::RelevantExperience => &mut self.relevant_experience,
            FormField::PortfolioUrl => &mut self.portfolio_url,
            FormField::ManagementExperience => &mut self.management_experience,
            FormField::OtherSkill => &mut self.other_skill,
            FormField::PreferredInterviewTime => &mut self.preferred_interview_time,
            FormField::Position | FormField::AdditionalSkills => return false,
        };
        *slot = value.into();
        true
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.additional_skills.contains(&skill)
    }

    pub fn add_skill(&mut self, skill: Skill) {
        if !self.has_skill(skill) {
            self.additional_skills.push(skill);
        }
    }

    pub fn remove_skill(&mut self, skill: Skill) {
        self.additional_skills.retain(|s| *s != skill);
    }

    pub fn skills_display(&self) -> String {
        self.additional_skills
            .iter()
            .map(Skill::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Read-only copy of the form taken when a submission is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SubmittedSnapshot(ApplicationForm);

impl SubmittedSnapshot {
    pub fn capture(form: &ApplicationForm) -> Self {
        Self(form.clone())
    }

    pub fn form(&self) -> &ApplicationForm {
        &self.0
    }

    /// Label/value pairs shown in the summary panel.
    ///
    /// Conditional entries appear only for the position that asks for them.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let form = &self.0;
        let mut lines = vec![
            ("Full Name", form.full_name.clone()),
            ("Email", form.email.clone()),
            ("Phone Number", form.phone_number.clone()),
            ("Position", form.position.to_string()),
        ];

        if form.position.requires_relevant_experience() {
            lines.push(("Relevant Experience", format!("{} years", form.relevant_experience)));
        }
        if form.position == Position::Designer {
            lines.push(("Portfolio URL", form.portfolio_url.clone()));
        }
        if form.position == Position::Manager {
            lines.push(("Management Experience", form.management_experience.clone()));
        }

        lines.push(("Additional Skills", form.skills_display()));
        lines.push(("Other Skills", form.other_skill.clone()));
        lines.push(("Preferred Interview Time", form.preferred_interview_time.clone()));
        lines
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
