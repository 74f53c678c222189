//! One select, generate, publish and record cycle per trigger.

use crate::{AgentConfig, wiring};
use async_trait::async_trait;
use murmur_content::{GeneratedTweet, GenerationPipeline, TopicSelector};
use murmur_core::{PublicationRecord, SeenContentSet, Topic};
use murmur_error::MurmurResult;
use murmur_interface::{Clock, PublicationLog, Publisher, TextProvider};
use murmur_schedule::CycleRunner;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Owns every component and the per-process duplicate set.
///
/// Cycles never overlap: [`Orchestrator::generate_and_publish`] takes
/// `&mut self` and runs to completion before returning.
pub struct Orchestrator {
    selector: TopicSelector,
    pipeline: GenerationPipeline,
    publisher: Arc<dyn Publisher>,
    log: Option<Arc<dyn PublicationLog>>,
    clock: Arc<dyn Clock>,
    seen: SeenContentSet,
    rng: StdRng,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("selector", &self.selector)
            .field("pipeline", &self.pipeline)
            .field("publisher", &self.publisher.platform_name())
            .field("log", &self.log.as_ref().map(|l| l.log_name().to_string()))
            .field("seen", &self.seen.len())
            .finish()
    }
}

impl Orchestrator {
    /// Assemble an orchestrator from ready components.
    pub fn new(
        selector: TopicSelector,
        pipeline: GenerationPipeline,
        publisher: Arc<dyn Publisher>,
        log: Option<Arc<dyn PublicationLog>>,
        clock: Arc<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            selector,
            pipeline,
            publisher,
            log,
            clock,
            seen: SeenContentSet::new(),
            rng,
        }
    }

    /// Build the content components from `config` around the given
    /// collaborators.
    ///
    /// # Errors
    ///
    /// Fails only if the content configuration itself is invalid.
    pub fn from_config(
        config: &AgentConfig,
        providers: Vec<Arc<dyn TextProvider>>,
        publisher: Arc<dyn Publisher>,
        log: Option<Arc<dyn PublicationLog>>,
        clock: Arc<dyn Clock>,
    ) -> MurmurResult<Self> {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::new(
            wiring::build_selector(config)?,
            wiring::build_pipeline(config, providers)?,
            publisher,
            log,
            clock,
            rng,
        ))
    }

    /// Texts published so far.
    pub fn seen(&self) -> &SeenContentSet {
        &self.seen
    }

    /// Add every text already in the log to the duplicate set.
    ///
    /// Returns how many texts were added. A missing or failing log adds none.
    pub async fn seed_seen_from_log(&mut self) -> usize {
        let Some(log) = self.log.as_ref() else {
            return 0;
        };
        match log.records().await {
            Ok(records) => {
                let before = self.seen.len();
                self.seen
                    .extend(records.into_iter().map(|r| r.content().clone()));
                let added = self.seen.len() - before;
                info!(log = log.log_name(), added, "Seeded duplicate set from log");
                added
            }
            Err(e) => {
                warn!(log = log.log_name(), error = %e, "Could not read log for seeding");
                0
            }
        }
    }

    /// Generate text without publishing or recording it.
    ///
    /// Picks a topic the usual way unless one is given.
    pub async fn preview(&mut self, topic: Option<Topic>) -> (Topic, GeneratedTweet) {
        let topic = match topic {
            Some(topic) => topic,
            None => self.select_topic().await,
        };
        let generated = self.pipeline.generate(&topic, &self.seen, &mut self.rng).await;
        (topic, generated)
    }

    /// Run one cycle for `trigger_label`.
    ///
    /// Returns the published text, or `None` if publishing failed. Nothing is
    /// retried within the cycle.
    #[instrument(skip(self), fields(trigger = %trigger_label))]
    pub async fn generate_and_publish(&mut self, trigger_label: &str) -> Option<String> {
        let topic = self.select_topic().await;
        info!(topic = %topic, "Topic selected");

        let generated = self.pipeline.generate(&topic, &self.seen, &mut self.rng).await;
        info!(origin = %generated.origin(), chars = generated.tweet().char_len(), "Text ready");
        let tweet = generated.into_tweet();

        let external_id = match self.publisher.publish(&tweet).await {
            Ok(id) => id,
            Err(e) => {
                error!(
                    trigger = %trigger_label,
                    platform = self.publisher.platform_name(),
                    error = %e.kind,
                    "Publish failed, cycle produced no post"
                );
                return None;
            }
        };
        info!(external_id = %external_id, platform = self.publisher.platform_name(), "Published");

        let record = PublicationRecord::new(
            self.clock.now().date(),
            topic,
            tweet.as_str(),
            external_id,
        );
        match &self.log {
            Some(log) => match log.append(&record).await {
                Ok(()) => debug!(log = log.log_name(), "Publication recorded"),
                Err(e) => warn!(log = log.log_name(), error = %e, "Could not record publication"),
            },
            None => debug!("No publication log configured"),
        }

        let text = tweet.into_inner();
        self.seen.insert(text.clone());
        Some(text)
    }

    async fn select_topic(&mut self) -> Topic {
        let today = self.clock.now().date();
        self.selector
            .select(self.log.as_deref(), today, &mut self.rng)
            .await
    }
}

#[async_trait]
impl CycleRunner for Orchestrator {
    async fn run_cycle(&mut self, label: &str) -> Option<String> {
        self.generate_and_publish(label).await
    }
}
