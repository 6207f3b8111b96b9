//! Server configuration, loaded from environment variables at startup.

/// Instruction wrapped around every user message before it reaches the model.
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"Antworte kurz und auf Deutsch: "{{ message }}""#;

/// Runtime configuration for nexus-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set. The provider credential is not
/// stored here; it is looked up per request through
/// [`crate::provider::CredentialSource`].
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated list of allowed CORS origins. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve the Swagger UI and the OpenAPI document.
    pub enable_swagger: bool,

    /// Name of the environment variable holding the provider API key.
    pub api_key_env: String,

    /// Base URL of the OpenAI-compatible provider (no trailing `/v1`).
    pub provider_base_url: String,

    /// Model identifier sent to the provider.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Upper bound on generated tokens per answer.
    pub max_tokens: u32,

    /// minijinja template rendered with `message` in scope.
    pub prompt_template: String,

    /// Largest accepted request body in bytes.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            cors_allowed_origins: None,
            enable_swagger: true,
            api_key_env: "OPENAI_API_KEY".to_owned(),
            provider_base_url: "https://api.openai.com".to_owned(),
            model: "gpt-4o-mini".to_owned(),
            temperature: 0.2,
            max_tokens: 200,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_owned(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build [`Config`] from any key/value source, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        Self {
            bind_address: env_or("NEXUS_BIND", &defaults.bind_address),
            log_level: env_or("NEXUS_LOG", &defaults.log_level),
            log_json: parse_bool(lookup("NEXUS_LOG_JSON"), defaults.log_json),
            cors_allowed_origins: lookup("NEXUS_CORS_ORIGINS").filter(|v| !v.trim().is_empty()),
            enable_swagger: parse_bool(lookup("NEXUS_ENABLE_SWAGGER"), defaults.enable_swagger),
            api_key_env: env_or("NEXUS_API_KEY_ENV", &defaults.api_key_env),
            provider_base_url: env_or("NEXUS_PROVIDER_BASE_URL", &defaults.provider_base_url),
            model: env_or("NEXUS_MODEL", &defaults.model),
            temperature: parse_env(lookup("NEXUS_TEMPERATURE"), defaults.temperature),
            max_tokens: parse_env(lookup("NEXUS_MAX_TOKENS"), defaults.max_tokens),
            prompt_template: env_or("NEXUS_PROMPT_TEMPLATE", &defaults.prompt_template),
            max_body_bytes: parse_env(lookup("NEXUS_MAX_BODY_BYTES"), defaults.max_body_bytes),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn parse_env<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
