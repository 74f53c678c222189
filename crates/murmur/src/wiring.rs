//! Builds components from [`AgentConfig`].
//!
//! A component whose credentials are missing degrades instead of failing the
//! whole agent: providers are skipped, the log is disabled, and the publisher
//! is replaced with one that rejects every post.

use crate::{AgentConfig, LogBackend, ProviderConfig, ProviderKind, PublisherKind};
use async_trait::async_trait;
use murmur_content::{
    Denylist, FallbackTemplates, GenerationPipeline, Sanitizer, TopicSelector,
};
use murmur_core::{ExternalId, SanitizedTweet, StylePrompt, Topic};
use murmur_error::{
    LogError, LogErrorKind, LogResult, MurmurResult, ProviderError, ProviderErrorKind,
    ProviderResult, PublishError, PublishErrorKind, PublishResult,
};
use murmur_interface::{PublicationLog, Publisher, TextProvider};
use murmur_log::{InMemoryPublicationLog, JsonlPublicationLog, SheetsPublicationLog};
use murmur_models::{
    ANTHROPIC_API_URL, AnthropicClient, DEFAULT_OLLAMA_URL, GROQ_API_URL, OPENAI_API_URL,
    OllamaClient, OpenAICompatibleClient,
};
use murmur_social::{DryRunPublisher, OAuthCredentials, TWITTER_CREATE_URL, TwitterPublisher};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Topic selector over the configured topics.
pub fn build_selector(config: &AgentConfig) -> MurmurResult<TopicSelector> {
    let topics = config
        .content()
        .topics()
        .iter()
        .map(|t| Topic::new(t.as_str()))
        .collect();
    Ok(TopicSelector::new(
        topics,
        *config.selection().recency_window_days(),
    )?)
}

/// Generation pipeline over `providers`.
pub fn build_pipeline(
    config: &AgentConfig,
    providers: Vec<Arc<dyn TextProvider>>,
) -> MurmurResult<GenerationPipeline> {
    let content = config.content();
    let styles = content
        .styles()
        .iter()
        .map(|s| StylePrompt::new(s.as_str()))
        .collect();
    let pipeline = GenerationPipeline::new(
        providers,
        styles,
        Sanitizer::new(config.sanitizer().clone())?,
        Denylist::new(content.denylist().as_slice())?,
        FallbackTemplates::new(content.fallback_templates().as_slice())?,
        config.generation().clone(),
    )?;
    Ok(pipeline)
}

/// Construct the configured providers, skipping any that cannot be built.
pub fn build_providers<F>(config: &AgentConfig, lookup: F) -> Vec<Arc<dyn TextProvider>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut providers: Vec<Arc<dyn TextProvider>> = Vec::new();
    for entry in config.providers() {
        match build_provider(entry, &lookup) {
            Ok(provider) => {
                info!(provider = %entry.kind(), model = %entry.model(), "Provider ready");
                providers.push(provider);
            }
            Err(e) => {
                warn!(provider = %entry.kind(), error = %e.kind, "Skipping provider");
            }
        }
    }
    if providers.is_empty() {
        warn!("No providers available, every post will come from fallback templates");
    }
    providers
}

fn build_provider<F>(entry: &ProviderConfig, lookup: &F) -> ProviderResult<Arc<dyn TextProvider>>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = match entry.key_variable() {
        Some(var) => lookup(var)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::Configuration(format!("{} is not set", var)))
            })?,
        None => String::new(),
    };
    let model = entry.model().as_str();
    let timeout = *entry.timeout_secs();
    let endpoint = entry.endpoint().as_deref();

    let provider: Arc<dyn TextProvider> = match entry.kind() {
        ProviderKind::OpenAI => Arc::new(OpenAICompatibleClient::with_timeout(
            api_key,
            model,
            endpoint.unwrap_or(OPENAI_API_URL),
            "openai",
            timeout,
        )?),
        ProviderKind::Groq => Arc::new(OpenAICompatibleClient::with_timeout(
            api_key,
            model,
            endpoint.unwrap_or(GROQ_API_URL),
            "groq",
            timeout,
        )?),
        ProviderKind::OpenAICompatible => {
            let endpoint = endpoint.ok_or_else(|| {
                ProviderError::new(ProviderErrorKind::Configuration(
                    "openai_compatible provider needs an endpoint".to_string(),
                ))
            })?;
            Arc::new(OpenAICompatibleClient::with_timeout(
                api_key,
                model,
                endpoint,
                "openai_compatible",
                timeout,
            )?)
        }
        ProviderKind::Anthropic => Arc::new(AnthropicClient::with_endpoint(
            api_key,
            model,
            endpoint.unwrap_or(ANTHROPIC_API_URL),
            timeout,
        )?),
        ProviderKind::Ollama => Arc::new(OllamaClient::with_base_url(
            model,
            endpoint.unwrap_or(DEFAULT_OLLAMA_URL),
            timeout,
        )?),
    };
    Ok(provider)
}

/// Publisher that rejects every post, standing in for one whose
/// configuration is unusable.
#[derive(Debug, Clone)]
pub struct UnavailablePublisher {
    reason: String,
}

impl UnavailablePublisher {
    /// Reject posts with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Publisher for UnavailablePublisher {
    async fn publish(&self, _tweet: &SanitizedTweet) -> PublishResult<ExternalId> {
        Err(PublishError::new(PublishErrorKind::Configuration(
            self.reason.clone(),
        )))
    }

    fn platform_name(&self) -> &str {
        "unavailable"
    }
}

/// The configured publisher, or a dry-run one when `dry_run` is set.
pub fn build_publisher<F>(config: &AgentConfig, dry_run: bool, lookup: F) -> Arc<dyn Publisher>
where
    F: Fn(&str) -> Option<String>,
{
    if dry_run || *config.publisher().kind() == PublisherKind::DryRun {
        info!("Using dry-run publisher");
        return Arc::new(DryRunPublisher::new());
    }

    let settings = config.publisher();
    let built = OAuthCredentials::from_lookup(lookup).and_then(|credentials| {
        TwitterPublisher::with_endpoint(
            credentials,
            settings.endpoint().as_deref().unwrap_or(TWITTER_CREATE_URL),
            *settings.timeout_secs(),
        )
    });
    match built {
        Ok(publisher) => Arc::new(publisher),
        Err(e) => {
            error!(error = %e.kind, "Publisher unavailable, cycles will fail at publish");
            Arc::new(UnavailablePublisher::new(e.kind.to_string()))
        }
    }
}

/// The configured publication log, or `None` if it is disabled or unusable.
pub fn build_log<F>(config: &AgentConfig, lookup: F) -> Option<Arc<dyn PublicationLog>>
where
    F: Fn(&str) -> Option<String>,
{
    match try_build_log(config, lookup) {
        Ok(log) => log,
        Err(e) => {
            warn!(error = %e.kind, "Publication log unavailable, continuing without it");
            None
        }
    }
}

fn try_build_log<F>(config: &AgentConfig, lookup: F) -> LogResult<Option<Arc<dyn PublicationLog>>>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = config.log();
    let log: Arc<dyn PublicationLog> = match settings.backend() {
        LogBackend::Disabled => return Ok(None),
        LogBackend::Memory => Arc::new(InMemoryPublicationLog::new()),
        LogBackend::Jsonl => Arc::new(JsonlPublicationLog::new(settings.path())),
        LogBackend::Sheets => {
            let spreadsheet_id = settings.spreadsheet_id().as_deref().ok_or_else(|| {
                LogError::new(LogErrorKind::Configuration(
                    "sheets backend needs a spreadsheet_id".to_string(),
                ))
            })?;
            let token = lookup(settings.token_env()).ok_or_else(|| {
                LogError::new(LogErrorKind::Configuration(format!(
                    "{} is not set",
                    settings.token_env()
                )))
            })?;
            Arc::new(SheetsPublicationLog::new(
                spreadsheet_id,
                settings.range().as_str(),
                token,
            )?)
        }
    };
    info!(log = log.log_name(), "Publication log ready");
    Ok(Some(log))
}
