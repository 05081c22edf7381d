use intake_core::models::OptionList;
use intake_core::validation::{Violation, ViolationKind};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::question::{QuestionItem, QuestionShape, SCALE_MAX, SCALE_MIN};

/// A patient's response to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Answer {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl Answer {
    pub fn is_blank(&self) -> bool {
        match self {
            Answer::Text(text) => text.trim().is_empty(),
            Answer::List(values) => values.is_empty(),
            Answer::Flag(_) | Answer::Number(_) => false,
        }
    }
}

pub fn validate_answer(question: &QuestionItem, answer: Option<&Answer>) -> Vec<Violation> {
    let id = question.id;
    let Some(answer) = answer.filter(|a| !a.is_blank()) else {
        return if question.required {
            vec![Violation::required(id, &question.question)]
        } else {
            Vec::new()
        };
    };

    let not_an_option = |options: &OptionList, value: &String| {
        (!options.contains(value)).then(|| {
            Violation::new(
                id,
                ViolationKind::NotAnOption {
                    value: value.clone(),
                },
                format!("'{value}' is not one of the options"),
            )
        })
    };

    match (&question.shape, answer) {
        (QuestionShape::SingleChoice { options }, Answer::Text(choice)) => {
            not_an_option(options, choice).into_iter().collect()
        }
        (QuestionShape::SingleChoice { .. }, Answer::List(_)) => vec![Violation::new(
            id,
            ViolationKind::SingleChoiceOnly,
            "only one option may be selected",
        )],
        (QuestionShape::MultipleChoice { options }, Answer::List(choices)) => choices
            .iter()
            .filter_map(|choice| not_an_option(options, choice))
            .collect(),
        (QuestionShape::MultipleChoice { options }, Answer::Text(choice)) => {
            not_an_option(options, choice).into_iter().collect()
        }
        (QuestionShape::TrueFalse, Answer::Flag(_)) => Vec::new(),
        (QuestionShape::Text, Answer::Text(_)) => Vec::new(),
        (QuestionShape::Scale, Answer::Number(point)) => check_scale(question, *point),
        _ => vec![Violation::new(
            id,
            ViolationKind::WrongValueKind,
            "answer does not match the question type",
        )],
    }
}

fn check_scale(question: &QuestionItem, point: f64) -> Vec<Violation> {
    let id = question.id;
    let (min, max) = (f64::from(SCALE_MIN), f64::from(SCALE_MAX));
    if point.fract() != 0.0 {
        return vec![Violation::new(
            id,
            ViolationKind::InvalidFormat {
                expected: "a whole number".to_string(),
            },
            format!("{point} is not a point on the scale"),
        )];
    }
    if point < min {
        return vec![Violation::new(
            id,
            ViolationKind::BelowMin { min },
            format!("{point} is below the scale minimum of {min}"),
        )];
    }
    if point > max {
        return vec![Violation::new(
            id,
            ViolationKind::AboveMax { max },
            format!("{point} is above the scale maximum of {max}"),
        )];
    }
    Vec::new()
}
