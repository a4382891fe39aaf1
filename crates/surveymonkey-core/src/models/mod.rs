mod input;
mod question;
mod survey;

pub use input::{AnswerSubmission, NewSurvey, QuestionDraft, QuestionType, StoredAnswer};
pub use question::{Answer, Question, QuestionAnswers, QuestionKind};
pub use survey::{Survey, SurveySummary};
