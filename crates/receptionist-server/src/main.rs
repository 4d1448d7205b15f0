use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::{EmailChannel, JsonFileCallLogRepository, OpenAiProvider, WhatsAppChannel};
use application::{
    CallLogService, NotificationService, ReplyGenerator, TranscriptClassifier, TurnOrchestrator,
};
use config::Config;
use receptionist::{CallLogRepository, LlmProvider, NotificationChannel};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TurnOrchestrator>,
    pub call_logs: Arc<CallLogService>,
}

impl AppState {
    pub fn new(
        config: &Config,
        provider: Option<Arc<dyn LlmProvider>>,
        repo: Arc<dyn CallLogRepository>,
        channels: Vec<Arc<dyn NotificationChannel>>,
    ) -> Self {
        let call_logs = Arc::new(CallLogService::new(repo));
        let notifications = Arc::new(NotificationService::new(channels));

        let orchestrator = TurnOrchestrator::new(
            TranscriptClassifier::new(provider.clone(), config.llm_timeout, &config.persona),
            ReplyGenerator::new(provider, config.llm_timeout, &config.persona),
            call_logs.clone(),
            notifications,
            config.persona.clone(),
            config.turn_budget,
        );

        Self {
            orchestrator: Arc::new(orchestrator),
            call_logs,
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Receptionist API is running - calls are being answered".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn build_router(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::twilio::router())
        .merge(routes::call_logs::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed by the host
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    init_tracing();
    tracing::info!("📞 Receptionist API initializing...");

    let config = Config::from_lookup(|key| secrets.get(key));

    // Language model
    let provider = config
        .openai
        .clone()
        .map(|settings| Arc::new(OpenAiProvider::new(settings)) as Arc<dyn LlmProvider>);

    match &provider {
        Some(llm) => tracing::info!(
            "🧠 Language model: {} ({}), {}s per call, {}s per turn",
            llm.model_id(),
            llm.provider_name(),
            config.llm_timeout.as_secs(),
            config.turn_budget.as_secs()
        ),
        None => tracing::warn!("⚠️  No OPENAI_API_KEY set - call analysis uses fallback replies"),
    }

    // Notification channels
    if config.email.is_some() {
        tracing::info!("📧 Email notifications enabled");
    } else {
        tracing::warn!("⚠️  No GMAIL_USER/GMAIL_APP_PASSWORD set - email notifications disabled");
    }

    if config.whatsapp.is_some() {
        tracing::info!("💬 WhatsApp notifications enabled");
    } else {
        tracing::warn!("⚠️  No WhatsApp credentials set - WhatsApp notifications disabled");
    }

    let assistant = config.persona.assistant_name.as_str();
    let channels: Vec<Arc<dyn NotificationChannel>> = vec![
        Arc::new(EmailChannel::new(config.email.clone(), assistant)) as Arc<dyn NotificationChannel>,
        Arc::new(WhatsAppChannel::new(config.whatsapp.clone(), assistant)),
    ];

    // Call log
    let repo = JsonFileCallLogRepository::new(&config.call_log_path);
    if let Err(e) = repo.snapshot().await {
        tracing::warn!("⚠️  Call log unreadable, dashboard will be empty: {}", e);
    }
    tracing::info!("🗂️  Call log: {}", repo.path().display());

    let state = AppState::new(&config, provider, Arc::new(repo), channels);
    let router = build_router(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Receptionist API ready - {} is answering calls", config.persona.assistant_name);

    Ok(router.into())
}
