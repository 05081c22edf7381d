use std::fmt;

use intake_core::models::{ItemId, OptionList};
use intake_schema::{ItemType, RawShape, RetypePolicy, SchemaItem};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lowest point of a `scale` question.
pub const SCALE_MIN: u8 = 1;
/// Highest point of a `scale` question.
pub const SCALE_MAX: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    Text,
    Scale,
}

impl ItemType for QuestionType {
    const ALL: &'static [Self] = &[
        QuestionType::SingleChoice,
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::Text,
        QuestionType::Scale,
    ];

    fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::Text => "text",
            QuestionType::Scale => "scale",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "Single Choice",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::TrueFalse => "True / False",
            QuestionType::Text => "Text",
            QuestionType::Scale => "Scale",
        }
    }

    fn carries_options(self) -> bool {
        matches!(self, QuestionType::SingleChoice | QuestionType::MultipleChoice)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(
    tag = "type",
    rename_all = "snake_case",
    try_from = "RawShape<QuestionType>"
)]
#[ts(export)]
pub enum QuestionShape {
    SingleChoice { options: OptionList },
    MultipleChoice { options: OptionList },
    TrueFalse,
    Text,
    Scale,
}

impl QuestionShape {
    pub fn question_type(&self) -> QuestionType {
        match self {
            QuestionShape::SingleChoice { .. } => QuestionType::SingleChoice,
            QuestionShape::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionShape::TrueFalse => QuestionType::TrueFalse,
            QuestionShape::Text => QuestionType::Text,
            QuestionShape::Scale => QuestionType::Scale,
        }
    }

    pub fn options(&self) -> Option<&OptionList> {
        match self {
            QuestionShape::SingleChoice { options } | QuestionShape::MultipleChoice { options } => {
                Some(options)
            }
            QuestionShape::TrueFalse | QuestionShape::Text | QuestionShape::Scale => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut OptionList> {
        match self {
            QuestionShape::SingleChoice { options } | QuestionShape::MultipleChoice { options } => {
                Some(options)
            }
            QuestionShape::TrueFalse | QuestionShape::Text | QuestionShape::Scale => None,
        }
    }

    fn build(question_type: QuestionType, options: impl FnOnce() -> OptionList) -> Self {
        match question_type {
            QuestionType::SingleChoice => QuestionShape::SingleChoice { options: options() },
            QuestionType::MultipleChoice => QuestionShape::MultipleChoice { options: options() },
            QuestionType::TrueFalse => QuestionShape::TrueFalse,
            QuestionType::Text => QuestionShape::Text,
            QuestionType::Scale => QuestionShape::Scale,
        }
    }
}

impl TryFrom<RawShape<QuestionType>> for QuestionShape {
    type Error = String;

    fn try_from(raw: RawShape<QuestionType>) -> Result<Self, String> {
        let (question_type, options) = raw.checked()?;
        Ok(Self::build(question_type, || {
            options.unwrap_or_else(|| OptionList::numbered(1))
        }))
    }
}

/// A single question of a patient questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuestionItem {
    pub id: ItemId,
    #[serde(flatten)]
    pub shape: QuestionShape,
    pub question: String,
    #[serde(default)]
    pub required: bool,
}

impl QuestionItem {
    pub fn question_type(&self) -> QuestionType {
        self.shape.question_type()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl SchemaItem for QuestionItem {
    type Type = QuestionType;
    type Patch = QuestionPatch;

    fn create(id: ItemId, item_type: QuestionType) -> Self {
        Self {
            id,
            shape: QuestionShape::build(item_type, || OptionList::numbered(3)),
            question: "New question".to_string(),
            required: false,
        }
    }

    fn id(&self) -> ItemId {
        self.id
    }

    fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }

    fn item_type(&self) -> QuestionType {
        self.question_type()
    }

    fn text(&self) -> &str {
        &self.question
    }

    fn set_text(&mut self, text: String) {
        self.question = text;
    }

    fn options(&self) -> Option<&OptionList> {
        self.shape.options()
    }

    fn options_mut(&mut self) -> Option<&mut OptionList> {
        self.shape.options_mut()
    }

    // Questions carry no validation bag, so the policy has nothing to purge.
    fn retype(&mut self, to: QuestionType, _policy: RetypePolicy) {
        let carried = self.shape.options().cloned();
        self.shape = QuestionShape::build(to, || {
            carried.unwrap_or_else(|| OptionList::numbered(1))
        });
    }

    fn apply_patch(&mut self, patch: QuestionPatch) -> Result<bool, String> {
        if let Some(question) = &patch.question
            && question.trim().is_empty()
        {
            return Err("question text must not be blank".to_string());
        }

        let mut changed = false;
        if let Some(question) = patch.question
            && question != self.question
        {
            self.question = question;
            changed = true;
        }
        if let Some(required) = patch.required
            && required != self.required
        {
            self.required = required;
            changed = true;
        }
        Ok(changed)
    }
}
