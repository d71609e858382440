use async_trait::async_trait;
use futures_util::future::join;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::{AggregatedResult, CandidateResult, SourceMethod};
use crate::error::{MediaError, Result};
use crate::rank::rank_all;
use crate::twitter::fxtwitter::FxTwitterSource;
use crate::twitter::scrape::PageScanSource;
use crate::twitter::syndication::SyndicationSource;
use crate::twitter::utils::parse_id;

/// One upstream strategy for resolving a tweet id.
///
/// Sources never fail loudly: any internal fault comes back as `None`.
#[async_trait]
pub trait TweetSource: Send + Sync {
    fn method(&self) -> SourceMethod;

    async fn fetch(&self, id: &str) -> Option<CandidateResult>;
}

/// Runs the sources in priority order and merges what they return
pub struct Merger {
    primary: Box<dyn TweetSource>,
    secondary: Box<dyn TweetSource>,
    fallback: Box<dyn TweetSource>,
}

impl Merger {
    pub fn new(
        primary: Box<dyn TweetSource>,
        secondary: Box<dyn TweetSource>,
        fallback: Box<dyn TweetSource>,
    ) -> Self {
        Self {
            primary,
            secondary,
            fallback,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(SyndicationSource::new(config.clone())),
            Box::new(FxTwitterSource::new(config.clone())),
            Box::new(PageScanSource::new(config.clone())),
        )
    }

    /// Resolve one tweet id into a ranked candidate.
    ///
    /// The two structured sources run concurrently and both are awaited.
    /// The page scan only runs when neither produced media.
    pub async fn resolve(&self, id: &str) -> Result<CandidateResult> {
        let (primary, secondary) = join(self.primary.fetch(id), self.secondary.fetch(id)).await;
        debug!(
            id,
            primary = primary.as_ref().is_some_and(CandidateResult::has_media),
            secondary = secondary.as_ref().is_some_and(CandidateResult::has_media),
            "structured sources settled"
        );

        let mut candidates = vec![primary, secondary];
        if !candidates.iter().flatten().any(CandidateResult::has_media) {
            info!(id, method = ?self.fallback.method(), "structured sources empty, falling back");
            candidates.push(self.fallback.fetch(id).await);
        }

        // Primary media always wins, even when another source is the base.
        let primary_media = candidates[0]
            .as_ref()
            .filter(|c| c.has_media())
            .map(|c| c.media.clone());

        let mut base = candidates
            .into_iter()
            .flatten()
            .find(CandidateResult::has_media)
            .ok_or_else(|| MediaError::ContentUnavailable { id: id.to_string() })?;

        if let Some(media) = primary_media {
            base.media = media;
        }
        base.media = rank_all(base.media);
        info!(id, method = ?base.method, media = base.media.len(), "tweet resolved");
        Ok(base)
    }
}

/// Parse the reference, resolve it, and build the final payload
pub async fn resolve_tweet(reference: &str, merger: &Merger) -> Result<AggregatedResult> {
    let id = parse_id(reference)?;
    let candidate = merger.resolve(&id).await?;
    Ok(AggregatedResult::new(reference, &id, candidate))
}
