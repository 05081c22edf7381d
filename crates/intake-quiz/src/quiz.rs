use intake_core::config::EngineConfig;
use intake_schema::{RetypePolicy, Schema};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{QuizError, QuizIssue};
use crate::frequency::{Frequency, Interval, MAX_CUSTOM_DAYS};
use crate::question::QuestionItem;

/// A patient questionnaire: metadata, schedule descriptor and questions.
///
/// `study_id` and `site_id` are opaque references to records owned
/// elsewhere; they are never resolved here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuizDefinition {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub study_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_frequency_days: Option<u32>,
    pub start_date: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(default)]
    #[ts(as = "Vec<QuestionItem>")]
    pub questions: Schema<QuestionItem>,
}

impl QuizDefinition {
    pub fn new(title: impl Into<String>, study_id: impl Into<String>, start_date: Date) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            study_id: study_id.into(),
            site_id: None,
            frequency: Frequency::Daily,
            custom_frequency_days: None,
            start_date,
            end_date: None,
            questions: Schema::new(),
        }
    }

    pub fn configure(&mut self, config: &EngineConfig) {
        self.questions.set_policy(RetypePolicy::from(config));
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::Invalid(vec![QuizIssue::MissingTitle]));
        }
        self.title = title;
        Ok(())
    }

    /// Switch frequency. Custom days are kept only for [`Frequency::Custom`].
    pub fn set_frequency(
        &mut self,
        frequency: Frequency,
        custom_days: Option<u32>,
    ) -> Result<(), QuizError> {
        if frequency == Frequency::Custom
            && let Some(days) = custom_days
            && !(1..=MAX_CUSTOM_DAYS).contains(&days)
        {
            return Err(QuizError::Invalid(vec![QuizIssue::CustomDaysOutOfRange {
                days,
                max: MAX_CUSTOM_DAYS,
            }]));
        }
        self.frequency = frequency;
        self.custom_frequency_days = custom_days.filter(|_| frequency == Frequency::Custom);
        Ok(())
    }

    /// Set the active window. With `enforce_date_order` an end date before the
    /// start date is rejected and nothing changes.
    pub fn set_dates(
        &mut self,
        start: Date,
        end: Option<Date>,
        config: &EngineConfig,
    ) -> Result<(), QuizError> {
        if config.enforce_date_order
            && let Some(end) = end
            && end < start
        {
            return Err(QuizError::Invalid(vec![QuizIssue::EndBeforeStart { start, end }]));
        }
        self.start_date = start;
        self.end_date = end;
        Ok(())
    }

    /// Days between runs for a custom schedule, falling back to the
    /// configured default when none was entered.
    pub fn effective_custom_days(&self, config: &EngineConfig) -> u32 {
        self.custom_frequency_days
            .unwrap_or(config.custom_frequency_fallback_days)
    }

    pub fn interval(&self, config: &EngineConfig) -> Interval {
        self.frequency.interval(self.effective_custom_days(config))
    }

    /// Copy with the schedule normalized the way it is persisted.
    pub fn finalized(&self, config: &EngineConfig) -> QuizDefinition {
        let mut quiz = self.clone();
        quiz.custom_frequency_days = match quiz.frequency {
            Frequency::Custom => Some(self.effective_custom_days(config)),
            _ => None,
        };
        quiz
    }

    pub fn issues(&self, config: &EngineConfig) -> Vec<QuizIssue> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push(QuizIssue::MissingTitle);
        }
        if self.study_id.trim().is_empty() {
            issues.push(QuizIssue::MissingStudyId);
        }
        if self.frequency == Frequency::Custom {
            let days = self.effective_custom_days(config);
            if !(1..=MAX_CUSTOM_DAYS).contains(&days) {
                issues.push(QuizIssue::CustomDaysOutOfRange {
                    days,
                    max: MAX_CUSTOM_DAYS,
                });
            }
        }
        if config.enforce_date_order
            && let Some(end) = self.end_date
            && end < self.start_date
        {
            issues.push(QuizIssue::EndBeforeStart {
                start: self.start_date,
                end,
            });
        }
        if self.questions.is_empty() {
            issues.push(QuizIssue::NoQuestions);
        }
        issues.extend(
            self.questions
                .iter()
                .filter(|q| q.question.trim().is_empty())
                .map(|q| QuizIssue::BlankQuestion { id: q.id }),
        );
        issues
    }

    pub fn validate(&self, config: &EngineConfig) -> Result<(), QuizError> {
        let issues = self.issues(config);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(QuizError::Invalid(issues))
        }
    }

    /// Finalize, validate, then hand the quiz to the persistence collaborator.
    ///
    /// The callback receives the finalized copy; `self` is left as it was.
    pub fn save<F, E>(&self, config: &EngineConfig, on_save: F) -> Result<(), E>
    where
        F: FnOnce(&QuizDefinition) -> Result<(), E>,
        E: From<QuizError>,
    {
        let quiz = self.finalized(config);
        if let Err(e) = quiz.validate(config) {
            tracing::warn!(title = %self.title, error = %e, "quiz save rejected");
            return Err(e.into());
        }
        on_save(&quiz)?;
        tracing::info!(
            title = %quiz.title,
            study_id = %quiz.study_id,
            frequency = %quiz.frequency,
            questions = quiz.questions.len(),
            "quiz saved"
        );
        Ok(())
    }
}
