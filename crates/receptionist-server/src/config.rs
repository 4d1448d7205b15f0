//! Server Configuration
//!
//! Every option is independently optional. Missing credentials disable the
//! feature they gate instead of failing startup.

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4-turbo-preview";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;
/// Twilio abandons a webhook after 15s
const DEFAULT_TURN_BUDGET_SECS: u64 = 12;
const DEFAULT_CALL_LOG_PATH: &str = "data/call-logs.json";

/// Language model credentials
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// SMTP (Gmail) credentials and destination
#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub user: String,
    pub app_password: String,
    /// Recipient; defaults to the sending account
    pub recipient: String,
}

/// WhatsApp Cloud API credentials and destination
#[derive(Debug, Clone)]
pub struct WhatsAppSettings {
    pub access_token: String,
    pub phone_number_id: String,
    pub recipient: String,
}

/// Who the assistant is and whom it answers for
#[derive(Debug, Clone)]
pub struct Persona {
    pub assistant_name: String,
    pub owner_name: String,
    /// Name used in short spoken lines
    pub owner_short_name: String,
    pub voice: String,
    pub language: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            assistant_name: "Iqra".to_string(),
            owner_name: "Syed Eman Ali Shah".to_string(),
            owner_short_name: "Eman".to_string(),
            voice: "Polly.Joanna".to_string(),
            language: "en-US".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: Option<OpenAiSettings>,
    /// Hard limit on each language-model call
    pub llm_timeout: Duration,
    /// Deadline shared by every language-model call of one speech turn
    pub turn_budget: Duration,
    pub email: Option<EmailSettings>,
    pub whatsapp: Option<WhatsAppSettings>,
    pub call_log_path: PathBuf,
    pub persona: Persona,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: None,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            turn_budget: Duration::from_secs(DEFAULT_TURN_BUDGET_SECS),
            email: None,
            whatsapp: None,
            call_log_path: PathBuf::from(DEFAULT_CALL_LOG_PATH),
            persona: Persona::default(),
        }
    }
}

impl Config {
    /// Build configuration from a key lookup (secret store, env, map).
    ///
    /// Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let persona_defaults = Persona::default();

        let openai = get("OPENAI_API_KEY").map(|api_key| OpenAiSettings {
            api_key,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
        });

        let seconds = |key: &str, default: Duration| match get(key).map(|s| s.parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => Duration::from_secs(secs),
            Some(_) => {
                tracing::warn!("⚠️  Invalid {} - using {}s", key, default.as_secs());
                default
            }
            None => default,
        };
        let llm_timeout = seconds("LLM_TIMEOUT_SECS", defaults.llm_timeout);
        let turn_budget = seconds("TURN_BUDGET_SECS", defaults.turn_budget);

        let email = match (get("GMAIL_USER"), get("GMAIL_APP_PASSWORD")) {
            (Some(user), Some(app_password)) => Some(EmailSettings {
                recipient: get("NOTIFICATION_EMAIL").unwrap_or_else(|| user.clone()),
                user,
                app_password,
            }),
            _ => None,
        };

        let whatsapp = match (
            get("WHATSAPP_ACCESS_TOKEN"),
            get("WHATSAPP_PHONE_NUMBER_ID"),
            get("OWNER_WHATSAPP"),
        ) {
            (Some(access_token), Some(phone_number_id), Some(recipient)) => {
                Some(WhatsAppSettings {
                    access_token,
                    phone_number_id,
                    recipient,
                })
            }
            _ => None,
        };

        let persona = Persona {
            assistant_name: get("ASSISTANT_NAME").unwrap_or(persona_defaults.assistant_name),
            owner_name: get("OWNER_NAME").unwrap_or(persona_defaults.owner_name),
            owner_short_name: get("OWNER_SHORT_NAME").unwrap_or(persona_defaults.owner_short_name),
            voice: get("VOICE").unwrap_or(persona_defaults.voice),
            language: get("VOICE_LANGUAGE").unwrap_or(persona_defaults.language),
        };

        Self {
            openai,
            llm_timeout,
            turn_budget,
            email,
            whatsapp,
            call_log_path: get("CALL_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.call_log_path),
            persona,
        }
    }
}
