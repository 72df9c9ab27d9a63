use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can stop a single pronunciation request.
///
/// None of these are fatal to a batch: the pipeline logs the error, records
/// the failure and moves on to the next URL.
#[derive(Debug, Error)]
pub enum PronounceError {
    #[error("URL must include a language anchor (e.g., #French): {url}")]
    MissingLanguage { url: String },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to start browser session: {0}")]
    BrowserInit(String),

    #[error("could not find {language} section on page")]
    SectionNotFound { language: String },

    #[error("could not find any pronunciation audio buttons")]
    NoAudioControl,

    #[error("could not extract href from audio button")]
    UnresolvedHref,

    #[error("browser error while {stage}: {reason}")]
    Render { stage: &'static str, reason: String },

    #[error("error fetching file page {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("could not find audio file download link on {url}")]
    NoDownloadLink { url: String },

    #[error("error downloading audio file {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Stable, serializable name for each error variant, used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingLanguage,
    InvalidUrl,
    BrowserInit,
    SectionNotFound,
    NoAudioControl,
    UnresolvedHref,
    Render,
    Fetch,
    NoDownloadLink,
    Download,
    Write,
}

impl PronounceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PronounceError::MissingLanguage { .. } => FailureKind::MissingLanguage,
            PronounceError::InvalidUrl { .. } => FailureKind::InvalidUrl,
            PronounceError::BrowserInit(_) => FailureKind::BrowserInit,
            PronounceError::SectionNotFound { .. } => FailureKind::SectionNotFound,
            PronounceError::NoAudioControl => FailureKind::NoAudioControl,
            PronounceError::UnresolvedHref => FailureKind::UnresolvedHref,
            PronounceError::Render { .. } => FailureKind::Render,
            PronounceError::Fetch { .. } => FailureKind::Fetch,
            PronounceError::NoDownloadLink { .. } => FailureKind::NoDownloadLink,
            PronounceError::Download { .. } => FailureKind::Download,
            PronounceError::Write { .. } => FailureKind::Write,
        }
    }

    /// True for errors raised before any browser or network activity.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PronounceError::MissingLanguage { .. } | PronounceError::InvalidUrl { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&FailureKind::NoDownloadLink).unwrap();
        assert_eq!(json, "\"no_download_link\"");
    }

    #[test]
    fn test_input_errors() {
        let missing = PronounceError::MissingLanguage { url: "https://x/wiki/a".into() };
        assert!(missing.is_input_error());
        assert_eq!(missing.kind(), FailureKind::MissingLanguage);
        assert!(!PronounceError::NoAudioControl.is_input_error());
    }

    #[test]
    fn test_section_message_names_language() {
        let err = PronounceError::SectionNotFound { language: "French".into() };
        assert_eq!(err.to_string(), "could not find French section on page");
    }
}
