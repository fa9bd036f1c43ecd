use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use shopscope_core::AnswerStore;
use shopscope_core::GenerationRequest;
use shopscope_core::SubmissionResult;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::client::GenerationClient;

/// Runs one submission end to end. Never fails: every error is logged and
/// folded into [`SubmissionResult::failure`].
pub fn submit(client: &dyn GenerationClient, answers: &AnswerStore) -> SubmissionResult {
    let request = match GenerationRequest::from_answers(answers) {
        Ok(request) => request,
        Err(err) => {
            error!(error = %err, "failed to serialize answers");
            return SubmissionResult::failure();
        }
    };

    info!(client = client.label(), payload_bytes = request.answers_json.len(), "requesting scope brief");
    match client.generate(&request) {
        Ok(text) => {
            let result = SubmissionResult::from_response_text(text);
            if result.text() == shopscope_core::NO_RESPONSE_TEXT {
                warn!(client = client.label(), "generation returned no text");
            }
            result
        }
        Err(err) => {
            error!(client = client.label(), error = %err, "scope generation failed");
            SubmissionResult::failure()
        }
    }
}

/// Runs [`submit`] on a worker thread and hands the result to `on_done`.
pub fn spawn_submission<F>(
    client: Arc<dyn GenerationClient>,
    answers: AnswerStore,
    on_done: F,
) -> JoinHandle<()>
where
    F: FnOnce(SubmissionResult) + Send + 'static,
{
    thread::spawn(move || {
        let result = submit(client.as_ref(), &answers);
        on_done(result);
    })
}
