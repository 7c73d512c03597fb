//! The provider fallback loop.
//!
//! One removal call walks the registry starting at the rotation cursor,
//! wrapping around the full list exactly once — each provider is tried at
//! most once per call, strictly in sequence. Quota-style failures
//! (402/429/"quota"/"credits") are logged distinctly from generic ones
//! but handled identically: both fall through to the next provider. Only
//! total exhaustion surfaces, carrying every provider's reason so the
//! user can see each attempted path.
//!
//! There is no mid-flight cancellation: once a provider call is issued it
//! completes or errors. One removal per image at a time is the caller's
//! contract.

use thiserror::Error;

#[cfg(test)]
use super::provider::BackgroundProvider;
use super::registry::ProviderRegistry;
use crate::bitmap::Bitmap;
use crate::export;

#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("no background removal providers configured")]
    NoProvidersConfigured,
    #[error("failed to prepare source image: {0}")]
    SourceFetch(String),
    #[error("all providers failed:\n{}", .0.join("\n"))]
    AllProvidersExhausted(Vec<String>),
}

/// A successful removal: the cut-out image and who produced it.
#[derive(Debug)]
pub struct RemovalOutcome {
    pub image: Bitmap,
    /// Display name of the provider that succeeded.
    pub provider: String,
}

/// Remove the background of `image` using the registry's providers.
///
/// `progress` receives `("Trying <name>...", name)` before each attempt.
/// On success the registry cursor moves to the winning provider, so the
/// next call starts there.
pub fn remove_background<F>(
    registry: &mut ProviderRegistry,
    image: &Bitmap,
    mut progress: F,
) -> Result<RemovalOutcome, RemovalError>
where
    F: FnMut(&str, &str),
{
    if registry.is_empty() {
        return Err(RemovalError::NoProvidersConfigured);
    }

    let source =
        export::to_png_bytes(image).map_err(|e| RemovalError::SourceFetch(e.to_string()))?;

    let count = registry.len();
    let mut errors = Vec::new();

    for attempt in 0..count {
        let index = (registry.cursor() + attempt) % count;
        let provider = registry.get(index);
        let name = provider.name().to_string();

        progress(&format!("Trying {name}..."), &name);

        match provider.remove(&source) {
            Ok(result) => match Bitmap::decode(&result) {
                Ok(cut_out) => {
                    registry.set_cursor(index);
                    return Ok(RemovalOutcome {
                        image: cut_out,
                        provider: name,
                    });
                }
                // An undecodable response is a provider failure like any
                // other: record it and move on.
                Err(e) => {
                    log::warn!("{name} returned an undecodable image: {e}");
                    errors.push(format!("{name}: undecodable response: {e}"));
                }
            },
            Err(e) => {
                if e.is_quota_exhausted() {
                    log::debug!("{name} credits exhausted, trying next provider");
                } else {
                    log::warn!("{name} failed: {e}");
                }
                errors.push(format!("{name}: {e}"));
            }
        }
    }

    Err(RemovalError::AllProvidersExhausted(errors))
}
