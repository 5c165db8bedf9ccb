mod loader;

pub use loader::{
    load_question_bank, load_questions, sample_questions, LoadError, DEFAULT_QUESTIONS_PATH,
};
