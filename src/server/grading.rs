//! Scoring of a submitted quiz form.

use std::collections::BTreeSet;

use log::warn;

use crate::models::{parse_answer_set, GradeReport, QuestionResult};
use crate::protocol::{split_options, Field, FormFields, SigningKey, MAX_QUESTIONS};

/// Grade every question index present in `form`.
///
/// Indices without a non-empty `answer{i}` and `options{i}` were not on
/// the page and are skipped, as are indices whose options field does not
/// decode. With a signing key, indices whose `sig{i}` does not match their
/// hidden fields are skipped as well.
pub fn grade(form: &FormFields, key: Option<&SigningKey>) -> GradeReport {
    let mut report = GradeReport::default();

    for index in 0..MAX_QUESTIONS {
        let (Some(answer_raw), Some(options_raw)) = (
            form.non_empty(&Field::Answer.name(index)),
            form.non_empty(&Field::Options.name(index)),
        ) else {
            continue;
        };
        let text = form.first(&Field::Text.name(index)).unwrap_or_default();

        if let Some(key) = key {
            let tag = form.first(&Field::Signature.name(index)).unwrap_or_default();
            if !key.verify(text, answer_raw, options_raw, tag) {
                warn!("Ignoring question {}: integrity tag mismatch", index);
                continue;
            }
        }

        let Some(all_options) = split_options(options_raw) else {
            warn!("Ignoring question {}: malformed options field", index);
            continue;
        };

        let user_answers: BTreeSet<String> = form
            .all(&Field::Selection.name(index))
            .iter()
            .cloned()
            .collect();

        report.record(QuestionResult {
            question: text.to_string(),
            all_options,
            user_answers,
            correct_answers: parse_answer_set(answer_raw),
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use url::form_urlencoded::Serializer;

    use super::*;
    use crate::models::OptionState;
    use crate::protocol::{encode_options, HiddenFields};

    fn hidden(index: usize, text: &str, answer: &str, options: &str) -> Vec<(String, String)> {
        vec![
            (Field::Text.name(index), text.to_string()),
            (Field::Answer.name(index), answer.to_string()),
            (Field::Options.name(index), options.to_string()),
        ]
    }

    fn abcd() -> String {
        encode_options(["A", "B", "C", "D"])
    }

    fn form_from(pairs: Vec<(String, String)>) -> FormFields {
        let body = Serializer::new(String::new()).extend_pairs(&pairs).finish();
        FormFields::parse(body.as_bytes())
    }

    #[test]
    fn test_round_trip_single_answer() {
        let options = encode_options(["Paris", "London", "", "", ""]);
        let mut pairs = hidden(0, "Capital of France?", "Paris", &options);
        pairs.push((Field::Selection.name(0), "Paris".to_string()));

        let report = grade(&form_from(pairs), None);
        assert_eq!((report.score, report.total), (1, 1));

        let result = &report.results[0];
        assert_eq!(result.question, "Capital of France?");
        assert_eq!(result.all_options, vec!["Paris", "London"]);
        let states: Vec<_> = result.option_states().collect();
        assert_eq!(
            states,
            vec![("Paris", OptionState::Correct), ("London", OptionState::Normal)]
        );
    }

    #[test]
    fn test_multi_answer_is_order_independent() {
        for selection in [["A", "B"], ["B", "A"]] {
            let mut pairs = hidden(0, "q", "A;B", &abcd());
            for value in selection {
                pairs.push((Field::Selection.name(0), value.to_string()));
            }
            let report = grade(&form_from(pairs), None);
            assert_eq!(report.score, 1);
        }
    }

    #[test]
    fn test_duplicate_selections_collapse() {
        let mut pairs = hidden(0, "q", "A", &abcd());
        pairs.push((Field::Selection.name(0), "A".to_string()));
        pairs.push((Field::Selection.name(0), "A".to_string()));

        assert_eq!(grade(&form_from(pairs), None).score, 1);
    }

    #[test]
    fn test_partial_and_wrong_selections() {
        let mut pairs = hidden(0, "q0", "A;B", &abcd());
        pairs.push((Field::Selection.name(0), "A".to_string()));
        pairs.extend(hidden(1, "q1", "C", &abcd()));
        pairs.push((Field::Selection.name(1), "D".to_string()));

        let report = grade(&form_from(pairs), None);
        assert_eq!((report.score, report.total), (0, 2));

        let states: Vec<_> = report.results[1].option_states().collect();
        assert!(states.contains(&("C", OptionState::Correct)));
        assert!(states.contains(&("D", OptionState::Wrong)));
        assert!(states.contains(&("A", OptionState::Normal)));
    }

    #[test]
    fn test_no_selection_counts_as_attempt() {
        let report = grade(&form_from(hidden(0, "q", "A", &abcd())), None);
        assert_eq!((report.score, report.total), (0, 1));
        assert!(report.results[0].user_answers.is_empty());
    }

    #[test]
    fn test_missing_or_empty_hidden_fields_are_skipped() {
        let mut pairs = hidden(0, "kept", "A", &abcd());
        pairs.extend(hidden(1, "empty answer", "", &abcd()));
        pairs.push((Field::Answer.name(2), "A".to_string()));
        pairs.push((Field::Selection.name(3), "A".to_string()));
        pairs.extend(hidden(MAX_QUESTIONS, "out of range", "A", &abcd()));

        let report = grade(&form_from(pairs), None);
        assert_eq!(report.total, 1);
        assert_eq!(report.results[0].question, "kept");
    }

    #[test]
    fn test_malformed_options_are_skipped() {
        let mut pairs = hidden(0, "legacy", "A", "A||B||C||D||");
        pairs.push((Field::Selection.name(0), "A".to_string()));
        pairs.extend(hidden(1, "kept", "A", &abcd()));

        let report = grade(&form_from(pairs), None);
        assert_eq!(report.total, 1);
        assert_eq!(report.results[0].question, "kept");
    }

    #[test]
    fn test_shell_operator_options() {
        let options = encode_options(["|", "||", "&&", ";", ""]);
        let mut pairs = hidden(0, "Which operator pipes output?", "|", &options);
        pairs.push((Field::Selection.name(0), "|".to_string()));

        let report = grade(&form_from(pairs), None);
        assert_eq!(report.score, 1);
        let states: Vec<_> = report.results[0].option_states().collect();
        assert_eq!(
            states,
            vec![
                ("|", OptionState::Correct),
                ("||", OptionState::Normal),
                ("&&", OptionState::Normal),
                (";", OptionState::Normal),
            ]
        );
    }

    #[test]
    fn test_multiline_values_posted_with_crlf() {
        let key = SigningKey::new("secret");
        let fields = HiddenFields {
            text: "Line one\nline two".to_string(),
            answer: "first\nanswer".to_string(),
            options: encode_options(["first\nanswer", "B", "C", "D"]),
        };
        let tag = key.sign_fields(&fields);

        // Browsers resubmit LF as CRLF.
        let crlf = |value: &str| value.replace('\n', "\r\n");
        let mut pairs = hidden(0, &crlf(&fields.text), &crlf(&fields.answer), &fields.options);
        pairs.push((Field::Selection.name(0), crlf("first\nanswer")));
        pairs.push((Field::Signature.name(0), tag));

        let report = grade(&form_from(pairs), Some(&key));
        assert_eq!((report.score, report.total), (1, 1));
        assert_eq!(report.results[0].question, "Line one\nline two");
    }

    #[test]
    fn test_sparse_indices() {
        let mut pairs = Vec::new();
        for index in [0, 1, 2] {
            pairs.extend(hidden(index, "q", "A", &abcd()));
            pairs.push((Field::Selection.name(index), "A".to_string()));
        }

        let report = grade(&form_from(pairs), None);
        assert_eq!((report.score, report.total), (3, 3));
    }

    #[test]
    fn test_empty_form() {
        let report = grade(&FormFields::default(), None);
        assert_eq!((report.score, report.total), (0, 0));
        assert_eq!(report.percentage(), 0.0);
    }

    #[test]
    fn test_signed_questions() {
        let key = SigningKey::new("secret");
        let fields = HiddenFields {
            text: "q".to_string(),
            answer: "A".to_string(),
            options: abcd(),
        };
        let tag = key.sign_fields(&fields);

        let mut pairs = hidden(0, &fields.text, &fields.answer, &fields.options);
        pairs.push((Field::Signature.name(0), tag.clone()));
        // Same tag, but the client rewrote the answer.
        pairs.extend(hidden(1, &fields.text, "B", &fields.options));
        pairs.push((Field::Signature.name(1), tag));
        // No tag at all.
        pairs.extend(hidden(2, &fields.text, &fields.answer, &fields.options));

        let form = form_from(pairs);
        assert_eq!(grade(&form, Some(&key)).total, 1);
        assert_eq!(grade(&form, None).total, 3);
    }
}
