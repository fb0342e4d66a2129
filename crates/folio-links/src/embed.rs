//! Embedded media classification.

use std::fmt;

use regex::Regex;

use crate::path::{extension, is_markdown_extension};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3"];

/// Media category of an embed target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EmbedCategory {
    Image,
    Video,
    Audio,
    Pdf,
    /// Another note embedded inline.
    MarkdownTransclusion,
    Unsupported,
}

impl EmbedCategory {
    /// Stable kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::MarkdownTransclusion => "markdown-transclusion",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for EmbedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an embed by file extension using the default media tables.
///
/// The extension is matched case-insensitively and may carry a leading dot.
///
/// # Examples
///
/// ```
/// use folio_links::{EmbedCategory, classify_embed};
///
/// assert_eq!(classify_embed("PNG"), EmbedCategory::Image);
/// assert_eq!(classify_embed(".pdf"), EmbedCategory::Pdf);
/// assert_eq!(classify_embed(""), EmbedCategory::MarkdownTransclusion);
/// assert_eq!(classify_embed("xyz"), EmbedCategory::Unsupported);
/// ```
pub fn classify_embed(ext: &str) -> EmbedCategory {
    EmbedClassifier::default().classify(ext)
}

/// Extension → [`EmbedCategory`] with configurable extra video/audio types.
#[derive(Clone, Debug, Default)]
pub struct EmbedClassifier {
    video: Vec<String>,
    audio: Vec<String>,
}

impl EmbedClassifier {
    /// Create a classifier recognising extra video and audio extensions.
    #[must_use]
    pub fn new<V, A>(video: V, audio: A) -> Self
    where
        V: IntoIterator,
        V::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            video: video.into_iter().map(|e| normalize_ext(e.as_ref())).collect(),
            audio: audio.into_iter().map(|e| normalize_ext(e.as_ref())).collect(),
        }
    }

    /// Classify an extension.
    #[must_use]
    pub fn classify(&self, ext: &str) -> EmbedCategory {
        let ext = normalize_ext(ext);
        let ext = ext.as_str();
        if ext.is_empty() || is_markdown_extension(ext) {
            EmbedCategory::MarkdownTransclusion
        } else if IMAGE_EXTENSIONS.contains(&ext) {
            EmbedCategory::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) || self.video.iter().any(|v| v == ext) {
            EmbedCategory::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) || self.audio.iter().any(|a| a == ext) {
            EmbedCategory::Audio
        } else if ext == "pdf" {
            EmbedCategory::Pdf
        } else {
            EmbedCategory::Unsupported
        }
    }

    /// Classify the file a path points at.
    #[must_use]
    pub fn classify_path(&self, path: &str) -> EmbedCategory {
        self.classify(extension(path).unwrap_or_default())
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// A recognised YouTube video link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YoutubeEmbed {
    /// 11-character video id.
    pub video_id: String,
    /// Start offset in seconds from a `t=` parameter.
    pub start: Option<u32>,
    /// `https://www.youtube.com/embed/...` player URL.
    pub embed_url: String,
}

/// Recognises YouTube watch and short links.
#[derive(Clone, Debug)]
pub struct YoutubeMatcher {
    pattern: Regex,
}

impl Default for YoutubeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl YoutubeMatcher {
    /// Compile the URL pattern.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(
                r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([\w-]{11})",
            )
            .expect("invalid YouTube URL regex"),
        }
    }

    /// Match a URL, returning the embed player details.
    ///
    /// Query parameters other than `v` are carried over to the player URL;
    /// `t` is renamed to `start` with any trailing `s` removed.
    #[must_use]
    pub fn match_url(&self, url: &str) -> Option<YoutubeEmbed> {
        let url = url.trim();
        let captures = self.pattern.captures(url)?;
        let video_id = captures.get(1)?.as_str().to_owned();

        let query = url.split_once('?').map_or("", |(_, q)| q);
        let query = query.split_once('#').map_or(query, |(q, _)| q);

        let mut start = None;
        let mut params: Vec<String> = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "v" => {}
                "t" | "start" => {
                    let seconds = value.trim_end_matches('s');
                    if let Ok(seconds) = seconds.parse::<u32>() {
                        start = Some(seconds);
                        params.push(format!("start={seconds}"));
                    }
                }
                _ => params.push(pair.to_owned()),
            }
        }

        let mut embed_url = format!("https://www.youtube.com/embed/{video_id}");
        if !params.is_empty() {
            embed_url.push('?');
            embed_url.push_str(&params.join("&"));
        }

        Some(YoutubeEmbed {
            video_id,
            start,
            embed_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classify_embed_defaults() {
        assert_eq!(classify_embed("jpeg"), EmbedCategory::Image);
        assert_eq!(classify_embed("svg"), EmbedCategory::Image);
        assert_eq!(classify_embed("mp4"), EmbedCategory::Video);
        assert_eq!(classify_embed("mp3"), EmbedCategory::Audio);
        assert_eq!(classify_embed("pdf"), EmbedCategory::Pdf);
        assert_eq!(classify_embed("md"), EmbedCategory::MarkdownTransclusion);
        assert_eq!(classify_embed("MDX"), EmbedCategory::MarkdownTransclusion);
        assert_eq!(classify_embed("xyz"), EmbedCategory::Unsupported);
        assert_eq!(classify_embed("webm"), EmbedCategory::Unsupported);
    }

    #[test]
    fn test_classifier_extra_extensions() {
        let classifier = EmbedClassifier::new([".webm", "MOV"], ["ogg"]);

        assert_eq!(classifier.classify("webm"), EmbedCategory::Video);
        assert_eq!(classifier.classify("mov"), EmbedCategory::Video);
        assert_eq!(classifier.classify(".OGG"), EmbedCategory::Audio);
        assert_eq!(classifier.classify("mp4"), EmbedCategory::Video);
    }

    #[test]
    fn test_classify_path() {
        let classifier = EmbedClassifier::default();

        assert_eq!(classifier.classify_path("/a/b.PNG"), EmbedCategory::Image);
        assert_eq!(
            classifier.classify_path("/notes/idea"),
            EmbedCategory::MarkdownTransclusion
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(
            EmbedCategory::MarkdownTransclusion.to_string(),
            "markdown-transclusion"
        );
    }

    #[test]
    fn test_youtube_watch_url() {
        let matcher = YoutubeMatcher::new();

        let embed = matcher
            .match_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();

        assert_eq!(
            embed,
            YoutubeEmbed {
                video_id: "dQw4w9WgXcQ".to_owned(),
                start: None,
                embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_owned(),
            }
        );
    }

    #[test]
    fn test_youtube_short_url_with_time() {
        let matcher = YoutubeMatcher::new();

        let embed = matcher.match_url("https://youtu.be/dQw4w9WgXcQ?t=42s").unwrap();

        assert_eq!(embed.start, Some(42));
        assert_eq!(
            embed.embed_url,
            "https://www.youtube.com/embed/dQw4w9WgXcQ?start=42"
        );
    }

    #[test]
    fn test_youtube_keeps_other_params() {
        let matcher = YoutubeMatcher::new();

        let embed = matcher
            .match_url("youtube.com/watch?v=dQw4w9WgXcQ&list=PL1&t=10")
            .unwrap();

        assert_eq!(
            embed.embed_url,
            "https://www.youtube.com/embed/dQw4w9WgXcQ?list=PL1&start=10"
        );
    }

    #[test]
    fn test_youtube_rejects_other_urls() {
        let matcher = YoutubeMatcher::new();

        assert!(matcher.match_url("https://vimeo.com/123").is_none());
        assert!(matcher.match_url("https://youtu.be/short").is_none());
    }
}
