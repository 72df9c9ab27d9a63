use crate::http::HttpClient;
use pronounce_model::{media_extension, PronounceError, PronunciationRequest};
use std::fs;
use std::path::Path;
use url::Url;

/// Download the audio at `media_url` and save it as
/// `{word}_{language lowercase}{ext}` in `output_dir`.
///
/// An existing file of the same name is overwritten. Returns the filename.
pub async fn download_audio(
    http: &HttpClient,
    media_url: &Url,
    request: &PronunciationRequest,
    output_dir: &Path,
) -> Result<String, PronounceError> {
    tracing::info!(url = %media_url, "Downloading audio file");
    let bytes = http
        .fetch_bytes(media_url.as_str())
        .await
        .map_err(|e| PronounceError::Download {
            url: media_url.to_string(),
            reason: e.to_string(),
        })?;
    tracing::debug!(stage = "downloaded", bytes = bytes.len());

    let filename = request.output_filename(media_extension(media_url));
    write_audio(output_dir, &filename, &bytes)?;
    Ok(filename)
}

/// Write `bytes` verbatim to `output_dir/filename`, replacing any existing file.
pub fn write_audio(output_dir: &Path, filename: &str, bytes: &[u8]) -> Result<(), PronounceError> {
    let path = output_dir.join(filename);
    fs::write(&path, bytes).map_err(|source| PronounceError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Successfully saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_audio(dir.path(), "dinde_french.ogg", b"first take, longer").unwrap();
        write_audio(dir.path(), "dinde_french.ogg", b"second").unwrap();
        let saved = fs::read(dir.path().join("dinde_french.ogg")).unwrap();
        assert_eq!(saved, b"second");
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_audio(&missing, "dinde_french.ogg", b"x").unwrap_err();
        assert!(matches!(err, PronounceError::Write { .. }));
    }
}
