use crate::browser::Browser;
use crate::download::download_audio;
use crate::http::HttpClient;
use crate::locate::resolve_audio_target;
use crate::media::{resolve_media_url, MediaFilter};
use pronounce_model::{BatchReport, FetchRecord, PronounceError, PronunciationRequest};
use std::path::PathBuf;
use std::time::Duration;

/// Knobs shared by every request in a run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Where audio files are written.
    pub output_dir: PathBuf,
    /// Upper bound for each condition wait on the rendered page.
    pub wait_timeout: Duration,
    pub filter: MediaFilter,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            wait_timeout: Duration::from_secs(10),
            filter: MediaFilter::default(),
        }
    }
}

/// Sequential fetch pipeline: render, resolve, download, save.
pub struct Pipeline<B> {
    browser: B,
    http: HttpClient,
    settings: PipelineSettings,
}

impl<B: Browser> Pipeline<B> {
    pub fn new(browser: B, http: HttpClient, settings: PipelineSettings) -> Self {
        Self {
            browser,
            http,
            settings,
        }
    }

    /// Fetch the pronunciation for one URL and return the saved filename.
    pub async fn process(&self, url: &str) -> Result<String, PronounceError> {
        let request = PronunciationRequest::parse(url)?;
        tracing::info!(word = %request.word, language = %request.language, "Processing");

        let target =
            resolve_audio_target(&self.browser, &request, self.settings.wait_timeout).await?;
        let media_url =
            resolve_media_url(&self.http, &target, &request, &self.settings.filter).await?;
        download_audio(&self.http, &media_url, &request, &self.settings.output_dir).await
    }

    /// Process every URL in order, one at a time. Failures are logged and
    /// recorded; they never stop the batch.
    pub async fn run_batch<S: AsRef<str>>(&self, urls: &[S]) -> BatchReport {
        tracing::info!(count = urls.len(), "Processing URL(s)");
        let mut report = BatchReport::new();

        for url in urls {
            let url = url.as_ref();
            let record = match self.process(url).await {
                Ok(filename) => FetchRecord::saved(url, filename),
                Err(e) => {
                    tracing::error!(url = %url, kind = ?e.kind(), "{e}");
                    FetchRecord::failed(url, &e)
                }
            };
            report.push(record);
        }

        tracing::info!(
            total = report.total(),
            successful = report.successful(),
            failed = report.failed(),
            "Batch finished"
        );
        report
    }
}
