use maud::{html, Markup};

use crate::models::Question;
use crate::protocol::{Field, HiddenFields, SigningKey};

use super::page;

/// The quiz form, or an empty state when there is nothing to ask.
pub fn render(questions: &[Question], key: Option<&SigningKey>) -> Markup {
    if questions.is_empty() {
        return page(html! {
            p class="summary" { "No questions available." }
            div class="buttons" {
                a href="/" { button type="button" { "Refresh" } }
            }
        });
    }

    page(html! {
        form method="POST" action="/" {
            @for (index, question) in questions.iter().enumerate() {
                (render_question(index, question, key))
            }
            div class="buttons" {
                button type="submit" { "Submit" }
                a href="/" { button type="button" { "Refresh" } }
            }
        }
    })
}

fn render_question(index: usize, question: &Question, key: Option<&SigningKey>) -> Markup {
    let hidden = HiddenFields::for_question(question);
    let selection = Field::Selection.name(index);

    html! {
        div class="question-block" {
            p { strong { (index + 1) ". " (question.text) } }
            @for option in question.visible_options() {
                label {
                    input type="checkbox" name=(selection) value=(option);
                    " " (option)
                }
                br;
            }
            input type="hidden" name=(Field::Answer.name(index)) value=(hidden.answer);
            input type="hidden" name=(Field::Text.name(index)) value=(hidden.text);
            input type="hidden" name=(Field::Options.name(index)) value=(hidden.options);
            @if let Some(key) = key {
                input type="hidden" name=(Field::Signature.name(index)) value=(key.sign_fields(&hidden));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawQuestion;

    fn question(text: &str, options: [&str; 5], answer: &str) -> Question {
        Question::from_raw(RawQuestion {
            question: text.to_string(),
            option1: options[0].to_string(),
            option2: options[1].to_string(),
            option3: options[2].to_string(),
            option4: options[3].to_string(),
            option5: options[4].to_string(),
            answer: answer.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_render_hidden_fields() {
        let questions = vec![question(
            "Capital of France?",
            ["Paris", "London", "Rome", "Berlin", ""],
            "Paris",
        )];
        let html = render(&questions, None).into_string();

        assert!(html.contains(r#"<input type="checkbox" name="q0" value="Paris">"#));
        assert!(html.contains(r#"<input type="hidden" name="answer0" value="Paris">"#));
        assert!(html.contains(r#"<input type="hidden" name="text0" value="Capital of France?">"#));
        assert!(html.contains(
            r#"<input type="hidden" name="options0" value="[&quot;Paris&quot;,&quot;London&quot;,&quot;Rome&quot;,&quot;Berlin&quot;]">"#
        ));
        assert!(!html.contains("sig0"));
        assert_eq!(html.matches(r#"type="checkbox""#).count(), 4);
    }

    #[test]
    fn test_render_escapes_text() {
        let questions = vec![question(
            "Is <script> \"safe\"?",
            ["<b>yes</b>", "no", "maybe", "never", ""],
            "no",
        )];
        let html = render(&questions, None).into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;yes&lt;/b&gt;"));
        assert!(html.contains("&quot;safe&quot;"));
    }

    #[test]
    fn test_render_signed_fields() {
        let key = SigningKey::new("secret");
        let questions = vec![question("q", ["a", "b", "c", "d", "e"], "a")];
        let html = render(&questions, Some(&key)).into_string();

        let tag = key.sign("q", "a", r#"["a","b","c","d","e"]"#);
        assert!(html.contains(&format!(r#"name="sig0" value="{}""#, tag)));
    }

    #[test]
    fn test_render_empty_state() {
        let html = render(&[], None).into_string();
        assert!(html.contains("No questions available."));
        assert!(!html.contains("<form"));
    }
}
