//! intake-quiz
//!
//! The patient questionnaire engine: question types and items, answer
//! validation, and the quiz aggregate with its scheduling descriptor.

pub mod answer;
pub mod error;
pub mod frequency;
pub mod question;
pub mod quiz;

pub use answer::{Answer, validate_answer};
pub use error::{QuizError, QuizIssue};
pub use frequency::{Frequency, Interval};
pub use question::{QuestionItem, QuestionPatch, QuestionShape, QuestionType, SCALE_MAX, SCALE_MIN};
pub use quiz::QuizDefinition;
