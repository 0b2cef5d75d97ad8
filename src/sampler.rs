//! Random sampling of distinct characters from the paginated character list
//!
//! Each attempt draws one random page and one random character from it.
//! Attempts are strictly sequential: the next request is only issued once the
//! previous one has resolved.

use std::collections::HashSet;

use rand::Rng;

use crate::api::CharacterSource;
use crate::error::ApiError;
use crate::state::{Character, SampleRequest, StatusFilter};

/// How a sampling cycle ended
#[derive(Debug)]
pub enum SampleOutcome {
    /// Exactly `count` characters with distinct ids, in draw order
    Complete(Vec<Character>),
    /// The attempt budget ran out first; nothing is delivered
    Exhausted { collected: usize, attempts: u32 },
    /// A request failed; the cycle was abandoned
    Failed(ApiError),
}

impl SampleOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, SampleOutcome::Complete(_))
    }
}

/// Fetch page `page` and pick one of its characters uniformly at random.
///
/// Returns `Ok(None)` when the page has no results.
pub async fn fetch_one_character<S, R>(
    source: &S,
    page: u32,
    status: StatusFilter,
    rng: &mut R,
) -> Result<Option<Character>, ApiError>
where
    S: CharacterSource + ?Sized,
    R: Rng,
{
    let mut characters = source.fetch_page(page, status).await?;
    if characters.is_empty() {
        return Ok(None);
    }
    let index = rng.gen_range(0..characters.len());
    Ok(Some(characters.swap_remove(index)))
}

/// Draw from random pages in `[1, total_pages]` until `request.count`
/// distinct characters are collected or `request.max_attempts` is spent.
pub async fn sample_unique_characters<S, R>(
    source: &S,
    request: &SampleRequest,
    total_pages: u32,
    rng: &mut R,
) -> SampleOutcome
where
    S: CharacterSource + ?Sized,
    R: Rng,
{
    let target = request.count.max(1) as usize;
    let mut seen: HashSet<u32> = HashSet::with_capacity(target);
    let mut collected: Vec<Character> = Vec::with_capacity(target);

    if total_pages == 0 {
        tracing::warn!(status = request.status.label(), "no pages to sample from");
        return SampleOutcome::Exhausted {
            collected: 0,
            attempts: 0,
        };
    }

    let mut attempts = 0u32;
    while attempts < request.max_attempts {
        attempts += 1;
        let page = rng.gen_range(1..=total_pages);

        let character = match fetch_one_character(source, page, request.status, rng).await {
            Ok(Some(character)) => character,
            Ok(None) => {
                tracing::warn!(page, attempt = attempts, "page had no results, skipping");
                continue;
            }
            Err(err) => {
                tracing::error!(page, attempt = attempts, error = %err, "error fetching character");
                return SampleOutcome::Failed(err);
            }
        };

        if !seen.insert(character.id) {
            tracing::debug!(id = character.id, attempt = attempts, "duplicate draw");
            continue;
        }

        tracing::debug!(id = character.id, name = %character.name, page, "collected character");
        collected.push(character);
        if collected.len() >= target {
            tracing::info!(count = collected.len(), attempts, "sampling complete");
            return SampleOutcome::Complete(collected);
        }
    }

    tracing::warn!(
        collected = collected.len(),
        target,
        attempts,
        "attempt budget exhausted"
    );
    SampleOutcome::Exhausted {
        collected: collected.len(),
        attempts,
    }
}

/// Look up the page count for the request's filter, then sample.
pub async fn run_sample_cycle<S, R>(
    source: &S,
    request: &SampleRequest,
    rng: &mut R,
) -> SampleOutcome
where
    S: CharacterSource + ?Sized,
    R: Rng,
{
    tracing::info!(
        count = request.count,
        status = request.status.label(),
        max_attempts = request.max_attempts,
        "starting sampling cycle"
    );

    let total_pages = match source.page_count(request.status).await {
        Ok(pages) => pages,
        Err(err) => {
            tracing::error!(error = %err, "error fetching pages");
            return SampleOutcome::Failed(err);
        }
    };

    sample_unique_characters(source, request, total_pages, rng).await
}
