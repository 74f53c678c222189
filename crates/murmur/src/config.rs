//! Agent configuration.
//!
//! Settings are layered the usual way: bundled defaults, then the user's
//! `~/.config/murmur/murmur.toml`, then `./murmur.toml`, then an explicit
//! file. A fixed set of environment variables can override individual values
//! afterwards (see [`AgentConfig::apply_env_overrides`]). Credentials are
//! never read from these files.

use derive_getters::Getters;
use murmur_content::{
    DEFAULT_DENYLIST, DEFAULT_FALLBACK_TEMPLATES, DEFAULT_STYLES, DEFAULT_TOPICS,
    GenerationConfig, SanitizerConfig,
};
use murmur_error::{ConfigError, MurmurResult};
use murmur_schedule::ScheduleConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../murmur.toml");

/// Topic, style, template and denylist vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ContentConfig {
    /// Candidate topics, in configured order.
    #[serde(default = "default_topics")]
    topics: Vec<String>,

    /// Style templates containing `{topic}`.
    #[serde(default = "default_styles")]
    styles: Vec<String>,

    /// Last-resort templates containing `{topic}`.
    #[serde(default = "default_fallback_templates")]
    fallback_templates: Vec<String>,

    /// Case-insensitive regular expressions that reject a text.
    #[serde(default = "default_denylist")]
    denylist: Vec<String>,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_topics() -> Vec<String> {
    owned(DEFAULT_TOPICS)
}

fn default_styles() -> Vec<String> {
    owned(DEFAULT_STYLES)
}

fn default_fallback_templates() -> Vec<String> {
    owned(DEFAULT_FALLBACK_TEMPLATES)
}

fn default_denylist() -> Vec<String> {
    owned(DEFAULT_DENYLIST)
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            topics: default_topics(),
            styles: default_styles(),
            fallback_templates: default_fallback_templates(),
            denylist: default_denylist(),
        }
    }
}

/// Backend family of a provider entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum ProviderKind {
    /// api.openai.com chat completions
    #[serde(rename = "openai")]
    #[display("openai")]
    OpenAI,
    /// Groq's OpenAI-compatible endpoint
    #[serde(rename = "groq")]
    #[display("groq")]
    Groq,
    /// Anthropic Messages API
    #[serde(rename = "anthropic")]
    #[display("anthropic")]
    Anthropic,
    /// Local Ollama server
    #[serde(rename = "ollama")]
    #[display("ollama")]
    Ollama,
    /// Any other OpenAI-compatible server; `endpoint` is required
    #[serde(rename = "openai_compatible")]
    #[display("openai_compatible")]
    OpenAICompatible,
}

impl ProviderKind {
    /// Environment variable holding the key when none is configured.
    pub fn default_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Groq => Some("GROQ_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Ollama | Self::OpenAICompatible => None,
        }
    }
}

/// One entry of the ordered provider list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ProviderConfig {
    /// Backend family
    kind: ProviderKind,

    /// Model identifier
    model: String,

    /// Environment variable holding the API key
    #[serde(default)]
    api_key_env: Option<String>,

    /// Override for the backend URL
    #[serde(default)]
    endpoint: Option<String>,

    /// Request deadline in seconds
    #[serde(default = "default_provider_timeout_secs")]
    timeout_secs: u64,
}

fn default_provider_timeout_secs() -> u64 {
    murmur_models::DEFAULT_TIMEOUT_SECS
}

impl ProviderConfig {
    /// Create an entry with default key variable and timeout.
    pub fn new(kind: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            kind,
            model: model.into(),
            api_key_env: None,
            endpoint: None,
            timeout_secs: default_provider_timeout_secs(),
        }
    }

    /// Point the entry at another URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Variable the key is read from, if this backend takes one.
    pub fn key_variable(&self) -> Option<&str> {
        self.api_key_env
            .as_deref()
            .or_else(|| self.kind.default_key_env())
    }
}

/// Topic selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SelectionConfig {
    /// Days a published topic stays off limits.
    #[serde(default = "default_recency_window_days")]
    recency_window_days: u32,

    /// Load previously published texts into the duplicate set at startup.
    #[serde(default)]
    seed_seen_from_log: bool,
}

fn default_recency_window_days() -> u32 {
    2
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            recency_window_days: default_recency_window_days(),
            seed_seen_from_log: false,
        }
    }
}

/// Where posts go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublisherKind {
    /// X/Twitter v2 API
    #[default]
    Twitter,
    /// Log and return a synthetic id
    DryRun,
}

/// Publisher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PublisherConfig {
    /// Publisher implementation
    #[serde(default)]
    kind: PublisherKind,

    /// Override for the create endpoint
    #[serde(default)]
    endpoint: Option<String>,

    /// Request deadline in seconds
    #[serde(default = "default_publisher_timeout_secs")]
    timeout_secs: u64,
}

fn default_publisher_timeout_secs() -> u64 {
    30
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            kind: PublisherKind::default(),
            endpoint: None,
            timeout_secs: default_publisher_timeout_secs(),
        }
    }
}

/// Publication log backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogBackend {
    /// No log; every topic is always eligible
    #[serde(rename = "none")]
    Disabled,
    /// Process memory only
    Memory,
    /// JSON-lines file
    #[default]
    Jsonl,
    /// Spreadsheet range via the Sheets values API
    Sheets,
}

/// Publication log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LogConfig {
    /// Backend
    #[serde(default)]
    backend: LogBackend,

    /// File used by the `jsonl` backend
    #[serde(default = "default_log_path")]
    path: String,

    /// Spreadsheet used by the `sheets` backend
    #[serde(default)]
    spreadsheet_id: Option<String>,

    /// Cell range used by the `sheets` backend
    #[serde(default = "default_range")]
    range: String,

    /// Environment variable holding the `sheets` bearer token
    #[serde(default = "default_token_env")]
    token_env: String,
}

fn default_log_path() -> String {
    "murmur-log.jsonl".to_string()
}

fn default_range() -> String {
    "Sheet1!A:D".to_string()
}

fn default_token_env() -> String {
    "SHEETS_ACCESS_TOKEN".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            backend: LogBackend::default(),
            path: default_log_path(),
            spreadsheet_id: None,
            range: default_range(),
            token_env: default_token_env(),
        }
    }
}

impl LogConfig {
    /// Use `backend` with otherwise default settings.
    pub fn with_backend(backend: LogBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }
}

/// Everything the agent needs apart from credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct AgentConfig {
    /// Vocabularies
    #[serde(default)]
    content: ContentConfig,

    /// Text cleanup
    #[serde(default)]
    sanitizer: SanitizerConfig,

    /// Retry budget and request shaping
    #[serde(default)]
    generation: GenerationConfig,

    /// Providers, tried in order
    #[serde(default)]
    providers: Vec<ProviderConfig>,

    /// Topic selection
    #[serde(default)]
    selection: SelectionConfig,

    /// Scheduling window
    #[serde(default)]
    schedule: ScheduleConfig,

    /// Publisher
    #[serde(default)]
    publisher: PublisherConfig,

    /// Publication log
    #[serde(default)]
    log: LogConfig,

    /// Seed for the random source; omitted means entropy.
    #[serde(default)]
    seed: Option<u64>,
}

impl AgentConfig {
    /// Load the layered configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a present file cannot be read or the
    /// merged result does not deserialize.
    pub fn load(explicit: Option<&Path>) -> MurmurResult<Self> {
        use ::config::{Config, File, FileFormat};

        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/murmur/murmur.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("murmur").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }

    /// Parse a single TOML document, without layering.
    pub fn from_toml_str(toml: &str) -> MurmurResult<Self> {
        use ::config::{Config, File, FileFormat};

        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        Ok(config)
    }

    /// The bundled defaults on their own.
    pub fn bundled() -> MurmurResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Apply the environment overrides found through `lookup`.
    ///
    /// | Variable | Setting |
    /// |---|---|
    /// | `TOPICS` | `content.topics` (JSON list) |
    /// | `TWEET_STYLES` | `content.styles` (JSON list) |
    /// | `SCHEDULE_TIMES` | `schedule.times` (JSON list) |
    /// | `MAX_TWEET_GENERATION_RETRIES` | `generation.retry_budget` |
    /// | `MAX_TWEET_LENGTH` | `sanitizer.max_length` |
    /// | `RUN_DURATION_HOURS` | `schedule.run_duration_hours` |
    /// | `POST_IMMEDIATELY` | `schedule.run_immediately` |
    /// | `RECENCY_WINDOW_DAYS` | `selection.recency_window_days` |
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// A value that does not parse is a configuration error naming the
    /// variable.
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> MurmurResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(value) = get("TOPICS") {
            self.content.topics = parse_json("TOPICS", &value)?;
        }
        if let Some(value) = get("TWEET_STYLES") {
            self.content.styles = parse_json("TWEET_STYLES", &value)?;
        }
        if let Some(value) = get("SCHEDULE_TIMES") {
            self.schedule = self
                .schedule
                .with_times(parse_json("SCHEDULE_TIMES", &value)?);
        }
        if let Some(value) = get("MAX_TWEET_GENERATION_RETRIES") {
            self.generation = self
                .generation
                .with_retry_budget(parse_value("MAX_TWEET_GENERATION_RETRIES", &value)?);
        }
        if let Some(value) = get("MAX_TWEET_LENGTH") {
            self.sanitizer = self
                .sanitizer
                .with_max_length(parse_value("MAX_TWEET_LENGTH", &value)?);
        }
        if let Some(value) = get("RUN_DURATION_HOURS") {
            self.schedule = self
                .schedule
                .with_run_duration_hours(parse_value("RUN_DURATION_HOURS", &value)?);
        }
        if let Some(value) = get("POST_IMMEDIATELY") {
            self.schedule = self
                .schedule
                .with_run_immediately(parse_flag("POST_IMMEDIATELY", &value)?);
        }
        if let Some(value) = get("RECENCY_WINDOW_DAYS") {
            self.selection.recency_window_days = parse_value("RECENCY_WINDOW_DAYS", &value)?;
        }
        Ok(self)
    }

    /// Check that every component can be built from these settings.
    ///
    /// # Errors
    ///
    /// Returns the first construction failure: empty topic, style or
    /// template lists, a bad denylist pattern, or inconsistent length bounds.
    pub fn validate(&self) -> MurmurResult<()> {
        crate::wiring::build_selector(self)?;
        crate::wiring::build_pipeline(self, Vec::new())?;
        Ok(())
    }

    /// Replace the content vocabularies.
    pub fn with_content(
        mut self,
        topics: Vec<String>,
        styles: Vec<String>,
        fallback_templates: Vec<String>,
    ) -> Self {
        self.content.topics = topics;
        self.content.styles = styles;
        self.content.fallback_templates = fallback_templates;
        self
    }

    /// Replace the sanitizer settings.
    pub fn with_sanitizer(mut self, sanitizer: SanitizerConfig) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Replace the generation settings.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Replace the provider list.
    pub fn with_providers(mut self, providers: Vec<ProviderConfig>) -> Self {
        self.providers = providers;
        self
    }

    /// Replace the recency window.
    pub fn with_recency_window_days(mut self, days: u32) -> Self {
        self.selection.recency_window_days = days;
        self
    }

    /// Toggle duplicate-set seeding from the log.
    pub fn with_seed_seen_from_log(mut self, enabled: bool) -> Self {
        self.selection.seed_seen_from_log = enabled;
        self
    }

    /// Replace the schedule.
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Replace the log settings.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Fix the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn parse_json<T: DeserializeOwned>(name: &str, value: &str) -> Result<T, ConfigError> {
    serde_json::from_str(value)
        .map_err(|e| ConfigError::new(format!("{} must be a JSON list of strings: {}", name, e)))
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::new(format!("{} has invalid value '{}': {}", name, value, e)))
}

fn parse_flag(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::new(format!(
            "{} must be true or false, got '{}'",
            name, other
        ))),
    }
}
