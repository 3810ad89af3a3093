//! Media source descriptors and playback queue assembly
//!
//! Progressive sources are identified by their URI suffix. Manifest-based
//! adaptive formats (DASH, HLS, SmoothStreaming) typically serve from
//! extension-less URIs, so those require an explicit MIME hint; building a
//! queue fails when neither is available.

use crate::error::{Error, Result};
use crate::types::SourceSpec;
use serde::{Deserialize, Serialize};
use url::Url;

/// MIME hints understood by the queue builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    #[serde(rename = "application/dash+xml")]
    Dash,
    #[serde(rename = "application/x-mpegURL", alias = "application/vnd.apple.mpegurl")]
    Hls,
    #[serde(rename = "application/vnd.ms-sstr+xml")]
    SmoothStreaming,
}

impl MimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Dash => "application/dash+xml",
            MimeType::Hls => "application/x-mpegURL",
            MimeType::SmoothStreaming => "application/vnd.ms-sstr+xml",
        }
    }

    /// The media format this hint selects
    pub fn format(&self) -> MediaFormat {
        match self {
            MimeType::Dash => MediaFormat::Dash,
            MimeType::Hls => MediaFormat::Hls,
            MimeType::SmoothStreaming => MediaFormat::SmoothStreaming,
        }
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Media container/delivery formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFormat {
    /// Single-file source, format derived from the container suffix
    Progressive,
    Dash,
    Hls,
    SmoothStreaming,
}

impl MediaFormat {
    /// Whether this format adapts quality across tracks
    pub fn is_adaptive(&self) -> bool {
        !matches!(self, MediaFormat::Progressive)
    }

    /// Infer the format from a URI path suffix, if there is one
    pub fn infer(uri: &Url) -> Option<MediaFormat> {
        let suffix = path_suffix(uri)?.to_ascii_lowercase();
        match suffix.as_str() {
            "mpd" => Some(MediaFormat::Dash),
            "m3u8" | "m3u" => Some(MediaFormat::Hls),
            "ism" | "isml" => Some(MediaFormat::SmoothStreaming),
            "mp4" | "m4v" | "m4a" | "mp3" | "aac" | "webm" | "mkv" | "ogg" | "oga" | "wav"
            | "flac" | "ts" => Some(MediaFormat::Progressive),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaFormat::Progressive => write!(f, "progressive"),
            MediaFormat::Dash => write!(f, "dash"),
            MediaFormat::Hls => write!(f, "hls"),
            MediaFormat::SmoothStreaming => write!(f, "smooth-streaming"),
        }
    }
}

/// Last path segment suffix of a URL, e.g. "mpd" for ".../manifest.mpd"
fn path_suffix(uri: &Url) -> Option<&str> {
    let name = uri.path().rsplit('/').next()?;
    let (stem, suffix) = name.rsplit_once('.')?;
    if stem.is_empty() || suffix.is_empty() {
        return None;
    }
    Some(suffix)
}

/// One resolved entry of a playback queue, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub uri: Url,
    pub mime_hint: Option<MimeType>,
    pub format: MediaFormat,
}

impl MediaSource {
    /// Build a source from a URI alone, inferring the format from its suffix
    pub fn new(uri: Url) -> Result<Self> {
        let format = MediaFormat::infer(&uri).ok_or_else(|| Error::MissingFormatHint {
            uri: uri.to_string(),
        })?;
        Ok(Self {
            uri,
            mime_hint: None,
            format,
        })
    }

    /// Build a source with an explicit MIME hint. The hint wins over suffix
    /// inference when both are available.
    pub fn with_mime(uri: Url, mime: MimeType) -> Self {
        Self {
            uri,
            format: mime.format(),
            mime_hint: Some(mime),
        }
    }

    /// Resolve a configured spec into a source descriptor
    pub fn from_spec(spec: &SourceSpec) -> Result<Self> {
        let uri = Url::parse(&spec.uri).map_err(|source| Error::InvalidSourceUri {
            uri: spec.uri.clone(),
            source,
        })?;
        match spec.mime {
            Some(mime) => Ok(Self::with_mime(uri, mime)),
            None => Self::new(uri),
        }
    }
}

/// Ordered playback queue. Insertion order is playback order; the queue is
/// rebuilt wholesale on every session acquire and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackQueue {
    items: Vec<MediaSource>,
}

impl PlaybackQueue {
    /// Resolve a configured source list into a queue, preserving order
    pub fn from_specs(specs: &[SourceSpec]) -> Result<Self> {
        if specs.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let items = specs
            .iter()
            .map(MediaSource::from_spec)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaSource> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MediaSource> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_infer_progressive() {
        assert_eq!(
            MediaFormat::infer(&url("https://example.com/media/clip.mp4")),
            Some(MediaFormat::Progressive)
        );
        assert_eq!(
            MediaFormat::infer(&url("https://example.com/media/track.MP3")),
            Some(MediaFormat::Progressive)
        );
    }

    #[test]
    fn test_infer_manifests() {
        assert_eq!(
            MediaFormat::infer(&url("https://example.com/stream/manifest.mpd")),
            Some(MediaFormat::Dash)
        );
        assert_eq!(
            MediaFormat::infer(&url("https://example.com/stream/master.m3u8")),
            Some(MediaFormat::Hls)
        );
    }

    #[test]
    fn test_infer_fails_without_suffix() {
        assert_eq!(MediaFormat::infer(&url("https://example.com/stream/tears")), None);
        assert_eq!(MediaFormat::infer(&url("https://example.com/")), None);
    }

    #[test]
    fn test_source_requires_hint_without_suffix() {
        let spec = SourceSpec::new("https://example.com/stream/tears");
        assert!(matches!(
            MediaSource::from_spec(&spec),
            Err(Error::MissingFormatHint { .. })
        ));
    }

    #[test]
    fn test_hint_wins_over_suffix() {
        let spec = SourceSpec::with_mime("https://example.com/stream/index.m3u8", MimeType::Dash);
        let source = MediaSource::from_spec(&spec).unwrap();
        assert_eq!(source.format, MediaFormat::Dash);
    }

    #[test]
    fn test_source_with_suffix_accepts_optional_hint() {
        let plain = SourceSpec::new("https://example.com/clip.mp4");
        assert!(MediaSource::from_spec(&plain).is_ok());

        let hinted = SourceSpec::with_mime("https://example.com/live/stream", MimeType::Hls);
        let source = MediaSource::from_spec(&hinted).unwrap();
        assert_eq!(source.format, MediaFormat::Hls);
        assert!(source.format.is_adaptive());
    }

    #[test]
    fn test_queue_preserves_order() {
        let specs = vec![
            SourceSpec::new("https://example.com/a.mp4"),
            SourceSpec::with_mime("https://example.com/b", MimeType::Dash),
            SourceSpec::new("https://example.com/c.mp3"),
        ];
        let queue = PlaybackQueue::from_specs(&specs).unwrap();
        assert_eq!(queue.len(), 3);
        let uris: Vec<_> = queue.iter().map(|s| s.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![
                "https://example.com/a.mp4",
                "https://example.com/b",
                "https://example.com/c.mp3"
            ]
        );
    }

    #[test]
    fn test_empty_queue_rejected() {
        assert!(matches!(
            PlaybackQueue::from_specs(&[]),
            Err(Error::EmptyQueue)
        ));
    }

    #[test]
    fn test_queue_fails_on_any_unresolvable_source() {
        let specs = vec![
            SourceSpec::new("https://example.com/a.mp4"),
            SourceSpec::new("https://example.com/no-suffix"),
        ];
        assert!(PlaybackQueue::from_specs(&specs).is_err());
    }
}
