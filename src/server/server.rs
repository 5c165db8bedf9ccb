//! HTTP server implementation.

use std::sync::Arc;

use log::{error, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::{Filter, Rejection, Reply};

use crate::config::QuizConfig;
use crate::data::{load_question_bank, load_questions};
use crate::protocol::FormFields;
use crate::ui;
use crate::QuizError;

use super::grading::grade;

/// Largest form body accepted on submit.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Shared read-only configuration.
type SharedConfig = Arc<QuizConfig>;

/// Raised when the question source cannot be read for a quiz request.
#[derive(Debug)]
struct DataSourceUnavailable;

impl warp::reject::Reject for DataSourceUnavailable {}

/// Run the quiz server until Ctrl-C.
pub async fn run(config: SharedConfig) -> Result<(), QuizError> {
    // Only a startup hint; each quiz request reloads the source.
    match load_question_bank(&config.questions_path) {
        Ok(bank) => info!(
            "{} questions available in {}",
            bank.len(),
            config.questions_path.display()
        ),
        Err(e) => warn!("{}; quiz requests will fail until it is readable", e),
    }
    if config.signing_key.is_some() {
        info!("Integrity tags enabled for hidden fields");
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };
    let (addr, server) = warp::serve(routes(Arc::clone(&config)))
        .try_bind_with_graceful_shutdown(config.addr, shutdown)?;

    info!("Server listening on http://{}", addr);
    server.await;
    info!("Server stopped");
    Ok(())
}

/// `GET /` renders a fresh quiz, `POST /` grades a submission.
pub fn routes(
    config: SharedConfig,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let render = warp::path::end()
        .and(warp::get())
        .and(with_config(Arc::clone(&config)))
        .and_then(render_quiz);

    let submit = warp::path::end()
        .and(warp::post())
        .and(with_config(config))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .map(grade_submission);

    render
        .or(submit)
        .recover(handle_rejection)
        .with(warp::log("quiz_web"))
}

fn with_config(
    config: SharedConfig,
) -> impl Filter<Extract = (SharedConfig,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || Arc::clone(&config))
}

async fn render_quiz(config: SharedConfig) -> Result<impl Reply, Rejection> {
    let path = config.questions_path.clone();
    let sample_size = config.sample_size;

    let questions = tokio::task::spawn_blocking(move || load_questions(path, sample_size))
        .await
        .map_err(|e| {
            error!("Question loader task failed: {}", e);
            warp::reject::custom(DataSourceUnavailable)
        })?
        .map_err(|e| {
            error!("Could not load questions: {}", e);
            warp::reject::custom(DataSourceUnavailable)
        })?;

    let page = ui::render_quiz(&questions, config.signing_key.as_ref());
    Ok(warp::reply::html(page.into_string()))
}

fn grade_submission(config: SharedConfig, body: Bytes) -> impl Reply {
    let form = FormFields::parse(&body);
    let report = grade(&form, config.signing_key.as_ref());
    info!(
        "Graded submission: {}/{} ({:.2}%)",
        report.score,
        report.total,
        report.percentage()
    );
    warp::reply::html(ui::render_results(&report).into_string())
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Rejection> {
    if err.find::<DataSourceUnavailable>().is_some() {
        let page = ui::render_error("The question bank could not be loaded.");
        Ok(warp::reply::with_status(
            warp::reply::html(page.into_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else {
        Err(err)
    }
}
