use crate::http::HttpClient;
use pronounce_model::{PronounceError, PronunciationRequest};
use scraper::{Html, Selector};
use url::Url;

/// Which anchors on a media-description page count as the downloadable file.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    /// Substring the href must contain (the media hosting domain).
    pub host_marker: String,
    /// Accepted suffixes, matched case-sensitively against the whole href.
    pub extensions: Vec<String>,
}

impl Default for MediaFilter {
    fn default() -> Self {
        Self {
            host_marker: "upload.wikimedia.org".to_string(),
            extensions: vec![".ogg".to_string(), ".wav".to_string()],
        }
    }
}

impl MediaFilter {
    pub fn accepts(&self, href: &str) -> bool {
        self.extensions.iter().any(|ext| href.ends_with(ext.as_str()))
            && href.contains(self.host_marker.as_str())
    }
}

/// Fetch the media-description page at `target` and return the absolute URL
/// of the hosted audio file it links to.
pub async fn resolve_media_url(
    http: &HttpClient,
    target: &str,
    request: &PronunciationRequest,
    filter: &MediaFilter,
) -> Result<Url, PronounceError> {
    tracing::info!(url = %target, "Fetching audio file page");
    let html = http
        .fetch_text(target)
        .await
        .map_err(|e| PronounceError::Fetch {
            url: target.to_string(),
            reason: e.to_string(),
        })?;
    tracing::debug!(stage = "page_fetched", bytes = html.len());

    let href = find_download_link(&html, filter).ok_or_else(|| PronounceError::NoDownloadLink {
        url: target.to_string(),
    })?;
    tracing::debug!(href = %href, "Matched download anchor");

    let media_url = absolutize(&href, request)?;
    tracing::info!(url = %media_url, "Found download link");
    Ok(media_url)
}

/// First `<a href>` in document order that the filter accepts.
pub fn find_download_link(html: &str, filter: &MediaFilter) -> Option<String> {
    let document = Html::parse_document(html);
    let anchor_sel = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| filter.accepts(href))
        .map(str::to_string)
}

/// Make `href` absolute against the *source request's* scheme and host.
///
/// Anything already starting with `http` is taken as-is; protocol-relative
/// links pick up the source scheme.
pub fn absolutize(href: &str, request: &PronunciationRequest) -> Result<Url, PronounceError> {
    let invalid = |e: url::ParseError| PronounceError::InvalidUrl {
        url: href.to_string(),
        reason: e.to_string(),
    };

    if href.starts_with("http") {
        return Url::parse(href).map_err(invalid);
    }
    let base = Url::parse(&request.origin()).map_err(invalid)?;
    base.join(href).map_err(invalid)
}
