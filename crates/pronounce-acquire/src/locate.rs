use crate::browser::{Browser, BrowserSession};
use pronounce_model::{PronounceError, PronunciationRequest};
use std::time::Duration;

/// CSS marker of a "play audio" control on a rendered dictionary page.
pub const PLAY_CONTROL_SELECTOR: &str = "a.mw-tmh-play";

/// Render the request's page and return the computed target of its first
/// playback control.
///
/// The session is launched here and closed before returning on every path,
/// success or failure. A failed close is logged and does not change the
/// outcome.
pub async fn resolve_audio_target<B: Browser>(
    browser: &B,
    request: &PronunciationRequest,
    wait_timeout: Duration,
) -> Result<String, PronounceError> {
    let mut session = browser.launch().await?;
    tracing::debug!(stage = "session_started", word = %request.word);

    let outcome = locate_audio_target(&mut session, request, wait_timeout).await;

    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "Failed to close browser session");
    }
    outcome
}

/// Drive an open session from page load to the control's resolved `href`.
pub async fn locate_audio_target<S: BrowserSession>(
    session: &mut S,
    request: &PronunciationRequest,
    wait_timeout: Duration,
) -> Result<String, PronounceError> {
    tracing::info!(url = %request.source, "Loading page");
    session.navigate(request.source.as_str()).await?;

    let section = session
        .find_by_id(&request.language, wait_timeout)
        .await?
        .ok_or_else(|| PronounceError::SectionNotFound {
            language: request.language.clone(),
        })?;
    tracing::info!(language = %request.language, "Found language section");

    session.scroll_into_view(&section).await?;

    // Controls are searched across the whole document, not just the section.
    let controls = session.find_all(PLAY_CONTROL_SELECTOR, wait_timeout).await?;
    let first = controls.first().ok_or(PronounceError::NoAudioControl)?;
    tracing::debug!(stage = "control_found", controls = controls.len());

    let href = session
        .property(first, "href")
        .await?
        .filter(|href| !href.is_empty())
        .ok_or(PronounceError::UnresolvedHref)?;
    tracing::info!(href = %href, "Found first pronunciation link");

    Ok(href)
}
