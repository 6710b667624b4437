//! Validation services for the job application form.
//!
//! Validation is a pure computation over an [`ApplicationForm`]: every call
//! evaluates every rule and returns a fresh set of errors.

use super::errors::ValidationErrors;
use super::models::{ApplicationForm, FormField, Position};
use regex::Regex;
use std::sync::LazyLock;

pub const FULL_NAME_REQUIRED: &str = "Full Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const PHONE_NUMBER_REQUIRED: &str = "Phone Number is required";
pub const RELEVANT_EXPERIENCE_INVALID: &str = "Relevant Experience must be a number greater than 0";
pub const PORTFOLIO_URL_REQUIRED: &str = "Portfolio URL is required";
pub const PORTFOLIO_URL_INVALID: &str = "Portfolio URL is invalid";
pub const MANAGEMENT_EXPERIENCE_REQUIRED: &str = "Management Experience is required";
pub const SKILLS_REQUIRED: &str = "At least one skill must be selected";
pub const INTERVIEW_TIME_REQUIRED: &str = "Preferred Interview Time is required";

/// Whitespace as browsers define it for `\s`, which includes U+FEFF and
/// leaves out U+0085.
const WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{00A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// Characters a browser `.` refuses to match.
const LINE_TERMINATORS: &str = r"\n\r\x{2028}\x{2029}";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let word = format!("[^{WHITESPACE}]+");
    Regex::new(&format!(r"{word}@{word}\.{word}")).expect("email pattern compiles")
});

static PORTFOLIO_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let any = format!("[^{LINE_TERMINATORS}]+");
    Regex::new(&format!(r"^https?://{any}\.{any}$")).expect("portfolio url pattern compiles")
});

/// Checks an application form against the submission rules.
///
/// Rules are independent: one form can fail several at once, and each
/// failing field gets exactly one message.
///
/// # Examples
///
/// ```
/// use jobform::domain::{ApplicationForm, FormField, FormValidator};
///
/// let form = ApplicationForm::default();
/// let errors = FormValidator::validate(&form);
///
/// assert!(!errors.is_empty());
/// assert_eq!(errors.get(FormField::FullName), Some("Full Name is required"));
/// ```
pub struct FormValidator;

impl FormValidator {
    /// Runs every rule and collects the failures.
    pub fn validate(form: &ApplicationForm) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if form.full_name.is_empty() {
            errors.insert(FormField::FullName, FULL_NAME_REQUIRED);
        }

        if form.email.is_empty() {
            errors.insert(FormField::Email, EMAIL_REQUIRED);
        } else if !Self::is_valid_email(&form.email) {
            errors.insert(FormField::Email, EMAIL_INVALID);
        }

        if form.phone_number.is_empty() {
            errors.insert(FormField::PhoneNumber, PHONE_NUMBER_REQUIRED);
        }

        if form.position.requires_relevant_experience()
            && !Self::is_positive_number(&form.relevant_experience)
        {
            errors.insert(FormField::RelevantExperience, RELEVANT_EXPERIENCE_INVALID);
        }

        if form.position == Position::Designer && form.portfolio_url.is_empty() {
            errors.insert(FormField::PortfolioUrl, PORTFOLIO_URL_REQUIRED);
        } else if !form.portfolio_url.is_empty() && !Self::is_valid_portfolio_url(&form.portfolio_url) {
            errors.insert(FormField::PortfolioUrl, PORTFOLIO_URL_INVALID);
        }

        if form.position == Position::Manager && form.management_experience.is_empty() {
            errors.insert(FormField::ManagementExperience, MANAGEMENT_EXPERIENCE_REQUIRED);
        }

        if form.additional_skills.is_empty() && form.other_skill.is_empty() {
            errors.insert(FormField::AdditionalSkills, SKILLS_REQUIRED);
        }

        if form.preferred_interview_time.is_empty() {
            errors.insert(FormField::PreferredInterviewTime, INTERVIEW_TIME_REQUIRED);
        }

        errors
    }

    /// Convenience wrapper returning only whether the form passes.
    pub fn is_valid(form: &ApplicationForm) -> bool {
        Self::validate(form).is_empty()
    }

    /// Loose address check: some non-blank text, `@`, non-blank text, a dot,
    /// and non-blank text, all within one whitespace-free run.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobform::domain::FormValidator;
    ///
    /// assert!(FormValidator::is_valid_email("a@b.c"));
    /// assert!(!FormValidator::is_valid_email("abc"));
    /// assert!(!FormValidator::is_valid_email("a@b"));
    /// ```
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_PATTERN.is_match(email)
    }

    /// Accepts `http://` or `https://` followed by text containing a dot
    /// with at least one character on each side.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobform::domain::FormValidator;
    ///
    /// assert!(FormValidator::is_valid_portfolio_url("http://a.b"));
    /// assert!(FormValidator::is_valid_portfolio_url("https://portfolio.example.com"));
    /// assert!(!FormValidator::is_valid_portfolio_url("notaurl"));
    /// ```
    pub fn is_valid_portfolio_url(url: &str) -> bool {
        PORTFOLIO_URL_PATTERN.is_match(url)
    }

    /// True when `value` is a finite number strictly greater than zero.
    ///
    /// Empty, non-numeric, zero and negative inputs are all rejected alike.
    /// Only decimal notation counts: `0x10` and `Infinity` are not numbers here.
    pub fn is_positive_number(value: &str) -> bool {
        match value.trim().parse::<f64>() {
            Ok(number) => number.is_finite() && number > 0.0,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Skill;

    fn create_valid_developer_form() -> ApplicationForm {
        ApplicationForm {
            full_name: "Linus Example".to_string(),
            email: "linus@example.org".to_string(),
            phone_number: "555-0100".to_string(),
            position: Position::Developer,
            relevant_experience: "3".to_string(),
            additional_skills: vec![Skill::Python],
            preferred_interview_time: "2026-11-02T10:30".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = FormValidator::validate(&ApplicationForm::default());

        assert_eq!(errors.get(FormField::FullName), Some(FULL_NAME_REQUIRED));
        assert_eq!(errors.get(FormField::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(FormField::PhoneNumber), Some(PHONE_NUMBER_REQUIRED));
        assert_eq!(errors.get(FormField::AdditionalSkills), Some(SKILLS_REQUIRED));
        assert_eq!(errors.get(FormField::PreferredInterviewTime), Some(INTERVIEW_TIME_REQUIRED));
        // No position chosen, so no conditional rules fire
        assert!(!errors.contains(FormField::RelevantExperience));
        assert!(!errors.contains(FormField::PortfolioUrl));
        assert!(!errors.contains(FormField::ManagementExperience));
        assert_eq!(errors.len(), 5);
        assert!(!FormValidator::is_valid(&ApplicationForm::default()));
    }

    #[test]
    fn test_valid_developer_form_passes() {
        let form = create_valid_developer_form();
        assert!(FormValidator::validate(&form).is_empty());
        assert!(FormValidator::is_valid(&form));
    }

    #[test]
    fn test_email_patterns() {
        assert!(FormValidator::is_valid_email("a@b.c"));
        assert!(FormValidator::is_valid_email("first.last@mail.example.com"));
        assert!(!FormValidator::is_valid_email("abc"));
        assert!(!FormValidator::is_valid_email("a@b"));
        assert!(!FormValidator::is_valid_email("@b.c"));
        assert!(!FormValidator::is_valid_email("a@.c"));
        assert!(!FormValidator::is_valid_email("a@b."));
        assert!(!FormValidator::is_valid_email("a @b.c"));
        assert!(!FormValidator::is_valid_email("a@b .c"));
        // Any whitespace-free run with the right shape is enough
        assert!(FormValidator::is_valid_email("see x@y.z please"));
    }

    #[test]
    fn test_email_uses_browser_whitespace() {
        assert!(!FormValidator::is_valid_email("a\u{feff}@b.c"));
        assert!(!FormValidator::is_valid_email("a@b\u{feff}.c"));
        assert!(!FormValidator::is_valid_email("a@b.\u{3000}"));
        assert!(!FormValidator::is_valid_email("a\u{2028}@b.c"));
        assert!(!FormValidator::is_valid_email("a@b\r.c"));
        // NEL is not whitespace for a browser
        assert!(FormValidator::is_valid_email("a\u{0085}@b.c"));
    }

    #[test]
    fn test_invalid_email_message() {
        let mut form = create_valid_developer_form();
        form.email = "a@b".to_string();
        let errors = FormValidator::validate(&form);
        assert_eq!(errors.get(FormField::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_relevant_experience_for_developer() {
        let mut form = create_valid_developer_form();

        for bad in ["", "0", "-5", "abc", "   "] {
            form.relevant_experience = bad.to_string();
            let errors = FormValidator::validate(&form);
            assert_eq!(
                errors.get(FormField::RelevantExperience),
                Some(RELEVANT_EXPERIENCE_INVALID),
                "expected error for {bad:?}"
            );
            assert_eq!(errors.len(), 1);
        }

        for good in ["3", "0.5", " 7 "] {
            form.relevant_experience = good.to_string();
            assert!(!FormValidator::validate(&form).contains(FormField::RelevantExperience));
        }
    }

    #[test]
    fn test_relevant_experience_ignored_for_manager() {
        let mut form = create_valid_developer_form();
        form.position = Position::Manager;
        form.management_experience = "Led a team of 6".to_string();
        form.relevant_experience = "abc".to_string();
        assert!(FormValidator::validate(&form).is_empty());
    }

    #[test]
    fn test_designer_portfolio_url() {
        let mut form = create_valid_developer_form();
        form.position = Position::Designer;

        form.portfolio_url = String::new();
        assert_eq!(FormValidator::validate(&form).get(FormField::PortfolioUrl), Some(PORTFOLIO_URL_REQUIRED));

        form.portfolio_url = "notaurl".to_string();
        assert_eq!(FormValidator::validate(&form).get(FormField::PortfolioUrl), Some(PORTFOLIO_URL_INVALID));

        form.portfolio_url = "http://a.b".to_string();
        assert!(FormValidator::validate(&form).is_empty());
    }

    #[test]
    fn test_portfolio_url_checked_for_any_position_when_present() {
        let mut form = create_valid_developer_form();
        form.portfolio_url = "ftp://files.example".to_string();
        assert_eq!(FormValidator::validate(&form).get(FormField::PortfolioUrl), Some(PORTFOLIO_URL_INVALID));

        form.portfolio_url = String::new();
        assert!(!FormValidator::validate(&form).contains(FormField::PortfolioUrl));
    }

    #[test]
    fn test_portfolio_url_patterns() {
        assert!(FormValidator::is_valid_portfolio_url("https://a.b"));
        assert!(!FormValidator::is_valid_portfolio_url("http://ab"));
        assert!(!FormValidator::is_valid_portfolio_url("http://.b"));
        assert!(!FormValidator::is_valid_portfolio_url("http://a."));
        assert!(!FormValidator::is_valid_portfolio_url("www.example.com"));
        assert!(!FormValidator::is_valid_portfolio_url("http://a.b\nc"));
        assert!(!FormValidator::is_valid_portfolio_url(" http://a.b"));
        assert!(FormValidator::is_valid_portfolio_url("http://a b.c d"));
    }

    #[test]
    fn test_portfolio_url_rejects_line_terminators() {
        assert!(!FormValidator::is_valid_portfolio_url("http://a.b\r"));
        assert!(!FormValidator::is_valid_portfolio_url("http://a.\u{2028}b"));
        assert!(!FormValidator::is_valid_portfolio_url("http://a\u{2029}.b"));
        assert!(!FormValidator::is_valid_portfolio_url("https://\ra.b"));
        // Only line terminators are excluded, other whitespace is fine
        assert!(FormValidator::is_valid_portfolio_url("http://a.b\u{feff}"));
    }

    #[test]
    fn test_manager_requires_management_experience() {
        let mut form = create_valid_developer_form();
        form.position = Position::Manager;

        assert_eq!(
            FormValidator::validate(&form).get(FormField::ManagementExperience),
            Some(MANAGEMENT_EXPERIENCE_REQUIRED)
        );

        form.management_experience = "5 years running a platform team".to_string();
        assert!(!FormValidator::validate(&form).contains(FormField::ManagementExperience));
    }

    #[test]
    fn test_skills_rule() {
        let mut form = create_valid_developer_form();

        form.additional_skills.clear();
        form.other_skill.clear();
        assert_eq!(FormValidator::validate(&form).get(FormField::AdditionalSkills), Some(SKILLS_REQUIRED));

        form.additional_skills = vec![Skill::Css];
        assert!(!FormValidator::validate(&form).contains(FormField::AdditionalSkills));

        form.additional_skills.clear();
        form.other_skill = "Welding".to_string();
        assert!(!FormValidator::validate(&form).contains(FormField::AdditionalSkills));
    }

    #[test]
    fn test_multiple_rules_fire_together() {
        let form = ApplicationForm {
            email: "nope".to_string(),
            position: Position::Designer,
            portfolio_url: "notaurl".to_string(),
            relevant_experience: "-1".to_string(),
            ..Default::default()
        };
        let errors = FormValidator::validate(&form);

        assert_eq!(errors.get(FormField::Email), Some(EMAIL_INVALID));
        assert_eq!(errors.get(FormField::PortfolioUrl), Some(PORTFOLIO_URL_INVALID));
        assert_eq!(errors.get(FormField::RelevantExperience), Some(RELEVANT_EXPERIENCE_INVALID));
        assert!(errors.contains(FormField::FullName));
        assert!(errors.contains(FormField::PreferredInterviewTime));
    }
}
