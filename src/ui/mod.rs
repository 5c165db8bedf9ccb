//! HTML views.

mod quiz;
mod result;

use maud::{html, Markup, PreEscaped, DOCTYPE};

pub use quiz::render as render_quiz;
pub use result::render as render_results;

const TITLE: &str = "Ethical Hacking MCQ Test";

const STYLE: &str = "\
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #e0f7fa; padding: 20px; }
.container { max-width: 960px; margin: auto; background: white; padding: 30px; border-radius: 10px; box-shadow: 0 4px 8px rgba(0,0,0,0.1); }
h1 { text-align: center; color: #00695c; }
.question-block { margin-bottom: 30px; padding: 20px; border-radius: 8px; border: 1px solid #ccc; background-color: #fdfdfd; }
.correct { background-color: #d4edda; padding: 5px; border-radius: 5px; }
.wrong { background-color: #f8d7da; padding: 5px; border-radius: 5px; }
.normal { padding: 5px; border-radius: 5px; }
.buttons { margin-top: 30px; text-align: center; }
.summary { text-align: center; font-size: 18px; margin-top: 20px; color: #333; }
button { padding: 12px 24px; margin: 10px; border: none; background-color: #007BFF; color: white; font-size: 16px; border-radius: 6px; cursor: pointer; }
button:hover { background-color: #0056b3; }
";

/// Wrap `body` in the shared page shell.
fn page(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (TITLE) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div class="container" {
                    h1 { (TITLE) }
                    (body)
                }
            }
        }
    }
}

/// Page shown when the question source cannot be read.
pub fn render_error(message: &str) -> Markup {
    page(html! {
        h2 { "Questions are unavailable" }
        p class="summary" { (message) }
        div class="buttons" {
            a href="/" { button type="button" { "Try again" } }
        }
    })
}
