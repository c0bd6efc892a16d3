use regex::Regex;
use url::Url;

/// URL shapes that can carry a video ID, tried in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlPattern {
    Shorts,
    ShortLink,
    Watch,
}

const PATTERNS: [UrlPattern; 3] = [
    UrlPattern::Shorts,
    UrlPattern::ShortLink,
    UrlPattern::Watch,
];

/// Extract the video ID from a YouTube URL.
///
/// Handles /shorts/ URLs, youtu.be short links, and /watch?v= URLs.
/// Returns `None` for anything else; callers are expected to warn and
/// skip, not abort.
pub fn extract_video_id(url: &str) -> Option<String> {
    PATTERNS.iter().filter_map(|pattern| pattern.extract(url)).next()
}

impl UrlPattern {
    fn extract(self, url: &str) -> Option<String> {
        match self {
            UrlPattern::Shorts => {
                lazy_static! {
                    static ref SHORTS_RE: Regex =
                        Regex::new(r"/shorts/([A-Za-z0-9_-]+)").unwrap();
                }
                Some(SHORTS_RE.captures(url)?.get(1)?.as_str().to_string())
            },
            UrlPattern::ShortLink => {
                let parsed = Url::parse(url).ok()?;
                if parsed.host_str() != Some("youtu.be") {
                    return None;
                }
                let id = parsed.path().trim_matches('/');
                if id.is_empty() {
                    None
                } else {
                    Some(id.to_string())
                }
            },
            UrlPattern::Watch => {
                if !url.contains("youtube.com/watch") {
                    return None;
                }
                let parsed = Url::parse(url).ok()?;
                parsed.query_pairs()
                    .find(|(key, _)| *key == "v")
                    .map(|(_, value)| value.into_owned())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_watch_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123"),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?list=PL123&v=xyz"),
            Some("xyz".to_string())
        );
        // no v parameter
        assert_eq!(extract_video_id("https://www.youtube.com/watch?list=PL123"), None);
    }

    #[test]
    fn extracts_short_links() {
        assert_eq!(
            extract_video_id("https://youtu.be/xyz789"),
            Some("xyz789".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/xyz789/"),
            Some("xyz789".to_string())
        );
        // bare host, empty path
        assert_eq!(extract_video_id("https://youtu.be/"), None);
    }

    #[test]
    fn extracts_shorts_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/AbC-12_xyz"),
            Some("AbC-12_xyz".to_string())
        );
        // the ID ends at the first character outside [A-Za-z0-9_-]
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/AbC123?feature=share"),
            Some("AbC123".to_string())
        );
    }

    #[test]
    fn shorts_rule_wins_over_watch() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch/shorts/abc?v=def"),
            Some("abc".to_string())
        );
    }

    #[test]
    fn rejects_unrecognized_urls() {
        assert_eq!(extract_video_id("not-a-youtube-link"), None);
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(
            extract_video_id("https://www.youtube.com/playlist?list=PL5AC656794EE191C1"),
            None
        );
    }
}
