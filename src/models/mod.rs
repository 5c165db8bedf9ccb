mod question;
mod result;

pub use question::{parse_answer_set, Question, RawQuestion};
pub use result::{calculate_percentage, classify_option, GradeReport, OptionState, QuestionResult};
