//! First-match dispatch over the registered services

use tracing::{debug, trace};

use crate::config::VideoConfig;
use crate::fragment::Fragment;
use crate::guard;
use crate::service::Service;

/// A recognized video URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMatch {
    pub service: Service,
    /// The matched URL text
    pub url: String,
    /// Bytes consumed from the candidate position
    pub len: usize,
    /// Character before the URL, `None` at start of text
    pub preceding: Option<char>,
    pub fragment: Fragment,
}

/// Try every service at byte offset `pos` of `src`, in registration order
///
/// `end` bounds the candidate span. The context guard runs first; a service
/// whose own leading-character rule rejects the position is skipped, and a
/// service whose captures cannot be used declines without affecting the
/// others.
pub fn recognize(src: &str, pos: usize, end: usize, config: &VideoConfig) -> Option<VideoMatch> {
    let candidate = src.get(pos..end)?;
    if !candidate.starts_with("http") || guard::is_escaped(src, pos) {
        return None;
    }
    let preceding = guard::preceding_char(src, pos);

    for service in Service::ALL {
        let Some(caps) = service.pattern().captures(candidate) else {
            continue;
        };
        if !guard::allows(src, pos, service.forbidden_leading()) {
            trace!(%service, ?preceding, "video url rejected by leading context");
            return None;
        }
        let Some(fragment) = service.build(&caps, config) else {
            debug!(%service, url = &caps[0], "video url has unusable captures");
            continue;
        };

        let url = caps[0].to_string();
        trace!(%service, %url, "video url recognized");
        return Some(VideoMatch {
            service,
            len: url.len(),
            url,
            preceding,
            fragment,
        });
    }
    None
}

/// Recognize a URL that is the whole of `text`
pub fn recognize_url(text: &str, config: &VideoConfig) -> Option<VideoMatch> {
    recognize(text, 0, text.len(), config).filter(|m| m.len == text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(src: &str) -> Option<VideoMatch> {
        let pos = src.find("http")?;
        recognize(src, pos, src.len(), &VideoConfig::default())
    }

    #[test]
    fn test_match_consumes_only_url() {
        let m = find("watch http://www.vimeo.com/1496152 now").unwrap();
        assert_eq!(m.service, Service::Vimeo);
        assert_eq!(m.url, "http://www.vimeo.com/1496152");
        assert_eq!(m.len, m.url.len());
        assert_eq!(m.preceding, Some(' '));
    }

    #[test]
    fn test_start_of_text() {
        let m = find("http://youtu.be/abc123").unwrap();
        assert_eq!(m.service, Service::YoutubeShort);
        assert_eq!(m.preceding, None);
        assert_eq!(m.fragment.attr("src"), Some("http://www.youtube.com/v/abc123"));
    }

    #[test]
    fn test_rejected_contexts() {
        assert!(find("(http://www.vimeo.com/1496152)").is_none());
        assert!(find("\"http://www.vimeo.com/1496152\"").is_none());
        assert!(find(r"\http://www.vimeo.com/1496152").is_none());
        assert!(find("'http://youtu.be/abc123'").is_none());
    }

    #[test]
    fn test_single_quote_allowed_for_other_hosts() {
        let m = find("'http://www.vimeo.com/1496152").unwrap();
        assert_eq!(m.preceding, Some('\''));
    }

    #[test]
    fn test_escaped_backslash_does_not_escape_url() {
        assert!(find(r"\\http://www.vimeo.com/1496152").is_some());
    }

    #[test]
    fn test_span_end_is_respected() {
        let src = "http://www.vimeo.com/1496152";
        assert!(recognize(src, 0, 15, &VideoConfig::default()).is_none());
    }

    #[test]
    fn test_unrelated_urls_pass() {
        assert!(find("http://example.com/video/1").is_none());
        assert!(find("https://player.vimeo.com/video/1496152").is_none());
        assert!(find("http://www.youtube.com/v/").is_none());
    }

    #[test]
    fn test_recognize_url_requires_whole_text() {
        let config = VideoConfig::default();
        assert!(recognize_url("http://video.yahoo.com/watch/1/2", &config).is_some());
        assert!(recognize_url("http://www.gametrailers.com/video/a/1 x", &config).is_none());
    }
}
