//! Episode lookups for the detail modal

use futures_util::future::join_all;

use crate::api::CharacterSource;
use crate::state::Episode;

/// Resolve every reference concurrently and wait for all of them.
///
/// Results keep the order of `references`. Failed lookups are logged and left
/// out without affecting the others.
pub async fn resolve_episodes<S>(source: &S, references: &[String]) -> Vec<Episode>
where
    S: CharacterSource + ?Sized,
{
    let lookups = references
        .iter()
        .map(|reference| async move { (reference, source.fetch_episode(reference).await) });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(reference, result)| match result {
            Ok(episode) => Some(episode),
            Err(err) => {
                tracing::error!(reference = %reference, error = %err, "error fetching episode");
                None
            }
        })
        .collect()
}
