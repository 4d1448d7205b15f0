//! Twilio Webhook Routes
//!
//! Every webhook answers with TwiML. Malformed forms never surface as 4xx;
//! they render the apology program so the caller is not left in silence.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Form, Router,
};

use receptionist::VoiceResponse;

use crate::adapters::formatters::{render_twiml, TWIML_CONTENT_TYPE};
use crate::application::TurnOrchestrator;
use crate::models::{CallStatusForm, InitialCallForm, SpeechTurnForm};
use crate::AppState;

fn twiml(response: &VoiceResponse) -> Response {
    (
        [(header::CONTENT_TYPE, TWIML_CONTENT_TYPE)],
        render_twiml(response),
    )
        .into_response()
}

/// Initial incoming-call webhook
pub async fn incoming_call(
    State(state): State<AppState>,
    form: Result<Form<InitialCallForm>, FormRejection>,
) -> Response {
    let response = match form {
        Ok(Form(form)) => state.orchestrator.answer_call(&form.into()),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed incoming-call webhook");
            TurnOrchestrator::call_failure_response()
        }
    };

    twiml(&response)
}

/// Speech-turn webhook (gather callback)
pub async fn process_speech(
    State(state): State<AppState>,
    form: Result<Form<SpeechTurnForm>, FormRejection>,
) -> Response {
    let response = match form {
        // The notification handle is dropped: fan-out keeps running detached
        Ok(Form(form)) => state.orchestrator.handle_speech_turn(form.into()).await.response,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed speech webhook");
            TurnOrchestrator::turn_failure_response()
        }
    };

    twiml(&response)
}

/// Call status callback - back-fills the final call duration
pub async fn call_status(
    State(state): State<AppState>,
    form: Result<Form<CallStatusForm>, FormRejection>,
) -> StatusCode {
    match form {
        Ok(Form(CallStatusForm {
            call_sid,
            call_duration: Some(duration),
            ..
        })) => {
            state.call_logs.backfill_duration(&call_sid, duration).await;
        }
        Ok(Form(form)) => {
            tracing::debug!(
                call_sid = %form.call_sid,
                status = form.call_status.as_deref().unwrap_or("unknown"),
                "Status callback without duration"
            );
        }
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed status callback");
        }
    }

    StatusCode::NO_CONTENT
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/twilio", post(incoming_call))
        .route("/api/twilio/process-speech", post(process_speech))
        .route("/api/twilio/call-status", post(call_status))
}
