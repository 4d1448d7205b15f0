//! OpenAPI Documentation
//!
//! Covers the JSON endpoints; the Twilio webhooks speak TwiML.

use utoipa::OpenApi;

use crate::models::{CallLogsResponse, CallRecordResponse, CallStatsResponse};

#[derive(OpenApi)]
#[openapi(
    paths(super::call_logs::list_call_logs),
    info(
        title = "Receptionist API",
        version = "0.1.0",
        description = "AI phone receptionist - answers calls, logs them, and alerts the owner about important ones.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "CallLogs", description = "Call log and statistics for the dashboard"),
    ),
    components(schemas(CallLogsResponse, CallRecordResponse, CallStatsResponse)),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_call_logs() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/call-logs"));
    }
}
