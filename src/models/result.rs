use std::collections::BTreeSet;

/// How an option is highlighted on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// One of the right answers, whether or not it was picked.
    Correct,
    /// Picked, but not a right answer.
    Wrong,
    /// Neither picked nor right.
    Normal,
}

impl OptionState {
    /// CSS class used by the results view.
    pub fn css_class(self) -> &'static str {
        match self {
            OptionState::Correct => "correct",
            OptionState::Wrong => "wrong",
            OptionState::Normal => "normal",
        }
    }
}

/// Classify a single option against the correct and selected sets.
pub fn classify_option(
    option: &str,
    correct: &BTreeSet<String>,
    selected: &BTreeSet<String>,
) -> OptionState {
    if correct.contains(option) {
        OptionState::Correct
    } else if selected.contains(option) {
        OptionState::Wrong
    } else {
        OptionState::Normal
    }
}

/// Grading outcome for one submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question: String,
    pub all_options: Vec<String>,
    pub user_answers: BTreeSet<String>,
    pub correct_answers: BTreeSet<String>,
}

impl QuestionResult {
    pub fn is_correct(&self) -> bool {
        self.user_answers == self.correct_answers
    }

    /// Each displayable option with its highlight state.
    pub fn option_states(&self) -> impl Iterator<Item = (&str, OptionState)> {
        self.all_options
            .iter()
            .filter(|opt| !opt.is_empty())
            .map(|opt| {
                (
                    opt.as_str(),
                    classify_option(opt, &self.correct_answers, &self.user_answers),
                )
            })
    }
}

/// Outcome of grading a whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeReport {
    pub results: Vec<QuestionResult>,
    pub score: usize,
    pub total: usize,
}

impl GradeReport {
    pub fn record(&mut self, result: QuestionResult) {
        self.total += 1;
        if result.is_correct() {
            self.score += 1;
        }
        self.results.push(result);
    }

    pub fn percentage(&self) -> f64 {
        calculate_percentage(self.score, self.total)
    }
}

/// Score as a percentage; an empty quiz scores 0.
pub fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
