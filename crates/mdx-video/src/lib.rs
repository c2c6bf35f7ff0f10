//! Video embeds for markdown-it
//!
//! Finds bare URLs pointing at supported video hosts and replaces them with
//! player markup:
//! - iframe players for Dailymotion, Metacafe, Vimeo, Yahoo! Screen and YouTube
//! - flash `<object>` players for Gametrailers, Veoh and Yahoo! Video
//!
//! URLs that are already link targets, sit inside code, or are escaped with a
//! backslash are left alone.
//!
//! ```rust
//! use mdx_video::{render, VideoConfig};
//!
//! let config: VideoConfig = "video(vimeo_width=640)".parse().unwrap();
//! let html = render("http://www.vimeo.com/1496152", &config);
//! assert!(html.contains(r#"src="https://player.vimeo.com/video/1496152""#));
//! assert!(html.contains(r#"width="640""#));
//! ```

pub mod builders;
pub mod config;
pub mod error;
pub mod fragment;
pub mod guard;
pub mod plugin;
pub mod recognizer;
pub mod service;

pub use config::{option_spec, OptionSpec, Size, VideoConfig, OPTIONS};
pub use error::{ConfigError, ConfigResult};
pub use fragment::Fragment;
pub use plugin::{
    add_video_plugin, add_video_plugin_with, render, EscapedVideoUrl, VideoEmbedNode,
    VideoExtension,
};
pub use recognizer::{recognize, recognize_url, VideoMatch};
pub use service::{MarkupKind, Service};

/// Version of the extension
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
