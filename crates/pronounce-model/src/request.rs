use crate::error::PronounceError;
use url::Url;

/// One word/language pair to fetch, taken from a dictionary page URL.
///
/// `https://en.wiktionary.org/wiki/dinde#French` yields word `dinde` and
/// language `French`. The language doubles as the id of the page section
/// the browser looks for.
#[derive(Debug, Clone, PartialEq)]
pub struct PronunciationRequest {
    pub source: Url,
    pub word: String,
    pub language: String,
}

impl PronunciationRequest {
    /// Parse a source URL into a request.
    ///
    /// Fails without touching the network when the URL has no language
    /// fragment or no word in its path.
    pub fn parse(input: &str) -> Result<Self, PronounceError> {
        let source = Url::parse(input.trim()).map_err(|e| PronounceError::InvalidUrl {
            url: input.to_string(),
            reason: e.to_string(),
        })?;

        if !source.has_host() {
            return Err(PronounceError::InvalidUrl {
                url: input.to_string(),
                reason: "URL has no host".into(),
            });
        }

        // Word and language come from the text as written; `Url` would
        // percent-encode non-ASCII characters.
        let (before_fragment, fragment) = match input.trim().split_once('#') {
            Some((before, fragment)) if !fragment.is_empty() => (before, fragment),
            _ => {
                return Err(PronounceError::MissingLanguage {
                    url: input.to_string(),
                })
            }
        };
        let language = fragment.to_string();

        let word = raw_path(before_fragment).rsplit('/').next().unwrap_or_default().to_string();
        if word.is_empty() {
            return Err(PronounceError::InvalidUrl {
                url: input.to_string(),
                reason: "no word in URL path".into(),
            });
        }

        Ok(Self {
            source,
            word,
            language,
        })
    }

    /// `scheme://host[:port]` of the source page, used to absolutize
    /// relative media links.
    pub fn origin(&self) -> String {
        self.source.origin().ascii_serialization()
    }

    /// Local filename for this request's audio: `{word}_{language lowercase}{ext}`.
    pub fn output_filename(&self, extension: &str) -> String {
        format!("{}_{}{}", self.word, self.language.to_lowercase(), extension)
    }
}

/// Path portion of an unparsed URL: after the authority, before any `?query`.
fn raw_path(input: &str) -> &str {
    let without_query = input.split('?').next().unwrap_or_default();
    let rest = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest);
    rest.find('/').map_or("", |idx| &rest[idx..])
}

/// Extension of the last path segment of `url`, including the leading dot.
///
/// Names made only of leading dots (`.ogg`) have no extension; a name with no
/// dot yields an empty string.
pub fn media_extension(url: &Url) -> &str {
    let name = url.path().rsplit('/').next().unwrap_or_default();
    match name.rfind('.') {
        Some(idx) if !name[..idx].chars().all(|c| c == '.') => &name[idx..],
        _ => "",
    }
}
