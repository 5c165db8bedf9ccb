use maud::{html, Markup};

use crate::models::GradeReport;

use super::page;

pub fn render(report: &GradeReport) -> Markup {
    page(html! {
        h2 { "Your Score: " (report.score) " / " (report.total) }
        div class="summary" {
            "Percentage: " (format!("{:.2}", report.percentage())) "%"
        }
        @for (index, result) in report.results.iter().enumerate() {
            div class="question-block" {
                p { strong { (index + 1) ". " (result.question) } }
                @for (option, state) in result.option_states() {
                    div class=(state.css_class()) { (option) }
                }
            }
        }
        div class="buttons" {
            a href="/" { button type="button" { "Try Another Set" } }
        }
    })
}
