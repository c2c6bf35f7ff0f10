//! Supported video hosts
//!
//! Each [`Service`] owns an anchored URL pattern and knows how to turn the
//! pattern's captures into an embed fragment. [`Service::ALL`] is the fixed
//! registration order; the first service whose pattern matches wins.

use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::builders::{flash_object, iframe, param};
use crate::config::{Size, VideoConfig};
use crate::fragment::Fragment;
use crate::guard::LINK_CONTEXT;

const VEOH_PLAYER: &str = "http://www.veoh.com/swf/webplayer/WebPlayer.swf";
const YAHOO_PLAYER: &str = "http://d.yimg.com/static.video.yahoo.com/yep/YV_YEP.swf?ver=2.2.40";

/// Leading characters rejected for youtube forms, which also appear inside
/// single-quoted attributes
const QUOTED_CONTEXT: &[char] = &['(', '"', '\''];

/// Which builder a service uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    Iframe,
    FlashObject,
}

/// A video host recognized in bare text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Dailymotion,
    Gametrailers,
    Metacafe,
    Veoh,
    Vimeo,
    Yahoo,
    YahooScreen,
    Youtube,
    YoutubeShort,
}

impl Service {
    /// Registration order
    pub const ALL: [Service; 9] = [
        Service::Dailymotion,
        Service::Gametrailers,
        Service::Metacafe,
        Service::Veoh,
        Service::Vimeo,
        Service::Yahoo,
        Service::YahooScreen,
        Service::Youtube,
        Service::YoutubeShort,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Service::Dailymotion => "dailymotion",
            Service::Gametrailers => "gametrailers",
            Service::Metacafe => "metacafe",
            Service::Veoh => "veoh",
            Service::Vimeo => "vimeo",
            Service::Yahoo => "yahoo",
            Service::YahooScreen => "yahooscreen",
            Service::Youtube => "youtube",
            Service::YoutubeShort => "youtubeshort",
        }
    }

    pub fn markup_kind(self) -> MarkupKind {
        match self {
            Service::Gametrailers | Service::Veoh | Service::Yahoo => MarkupKind::FlashObject,
            _ => MarkupKind::Iframe,
        }
    }

    /// Characters that must not precede the URL
    pub fn forbidden_leading(self) -> &'static [char] {
        match self {
            Service::Youtube | Service::YoutubeShort => QUOTED_CONTEXT,
            _ => LINK_CONTEXT,
        }
    }

    /// Configured dimensions for this service
    pub fn size(self, config: &VideoConfig) -> &Size {
        match self {
            Service::Dailymotion => &config.dailymotion,
            Service::Gametrailers => &config.gametrailers,
            Service::Metacafe => &config.metacafe,
            Service::Veoh => &config.veoh,
            Service::Vimeo => &config.vimeo,
            Service::Yahoo | Service::YahooScreen => &config.yahoo,
            Service::Youtube | Service::YoutubeShort => &config.youtube,
        }
    }

    /// Anchored URL pattern, compiled on first use
    pub fn pattern(self) -> &'static Regex {
        static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
        let patterns = PATTERNS.get_or_init(|| {
            Service::ALL
                .iter()
                .map(|service| {
                    Regex::new(service.pattern_source()).expect("video url pattern is valid")
                })
                .collect()
        });
        &patterns[self as usize]
    }

    fn pattern_source(self) -> &'static str {
        match self {
            Service::Dailymotion => {
                r"^https?://www\.dailymotion\.com/video/(?P<id>[^_\s]+)_\S+"
            }
            Service::Gametrailers => {
                r"^https?://www\.gametrailers\.com/video/[a-z0-9-]+/(?P<id>\d+)"
            }
            Service::Metacafe => r"^https?://www\.metacafe\.com/watch/(?P<id>[-\w]+)/\S+",
            Service::Veoh => r"^https?://www\.veoh\.com/\S*(?:#watch%3D|watch/)(?P<id>\w+)",
            // The `\S*` tails here and below swallow trailing punctuation too,
            // so `*http://vimeo.com/1*` leaves the closing `*` inside the match
            Service::Vimeo => r"^https?://(?:www\.)?vimeo\.com/(?P<id>\d+)\S*",
            Service::Yahoo => r"^https?://video\.yahoo\.com/watch/(?P<vid>\d+)/(?P<id>\d+)",
            Service::YahooScreen => r"^https?://screen\.yahoo\.com/(?P<id>[-\w/]+)\.html",
            Service::Youtube => {
                r"^https?://www\.youtube\.com/(?:watch\?(?:\S*?&)?v=|v/)(?P<id>[A-Za-z0-9_&=-]+)\S*"
            }
            Service::YoutubeShort => r"^https?://youtu\.be/(?P<id>\S+)",
        }
    }

    /// Build the embed for a successful match
    ///
    /// Returns `None` when a required capture is missing or empty, in which
    /// case the span is left untouched.
    pub fn build(self, caps: &Captures<'_>, config: &VideoConfig) -> Option<Fragment> {
        let id = caps.name("id").map(|m| m.as_str()).filter(|s| !s.is_empty())?;
        let size = self.size(config);

        let fragment = match self {
            Service::Dailymotion => {
                iframe(&format!("http://www.dailymotion.com/embed/video/{id}"), size)
            }
            Service::Gametrailers => flash_object(
                &format!("http://www.gametrailers.com/remote_wrap.php?mid={id}"),
                size,
            ),
            Service::Metacafe => iframe(&format!("http://www.metacafe.com/embed/{id}/"), size),
            Service::Veoh => {
                let url = format!(
                    "{VEOH_PLAYER}?version=AFrontend.5.7.0.1509&permalinkId={id}\
                     &player=videodetailsembedded&videoAutoPlay=0&id=anonymous"
                );
                let mut object = flash_object(&url, size);
                object.push_child(
                    Fragment::new("embed")
                        .with_attr("src", url.as_str())
                        .with_attr("type", "application/x-shockwave-flash")
                        .with_attr("allowfullscreen", "true")
                        .with_attr("width", size.width.as_str())
                        .with_attr("height", size.height.as_str())
                        .with_attr("name", "veohFlashPlayerEmbed"),
                );
                object
            }
            Service::Vimeo => iframe(&format!("https://player.vimeo.com/video/{id}"), size),
            Service::Yahoo => {
                let vid = caps.name("vid").map(|m| m.as_str()).filter(|s| !s.is_empty())?;
                let mut object = flash_object(YAHOO_PLAYER, size);
                object.push_child(param("flashVars", &format!("id={id}&vid={vid}")));
                object
            }
            Service::YahooScreen => {
                let mut frame = iframe(
                    &format!("https://screen.yahoo.com/{id}.html?format=embed"),
                    size,
                );
                frame.set_attr("scrolling", "no");
                frame
            }
            Service::Youtube | Service::YoutubeShort => {
                iframe(&format!("http://www.youtube.com/v/{id}"), size)
            }
        };
        Some(fragment)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
