//! Video embed plugin for markdown-it
//!
//! Registers two inline rules ahead of the built-in ones:
//! - `VideoScanner` replaces a bare video URL with its player markup
//! - `EscapedVideoScanner` turns `\http://...` into the literal URL text
//!
//! Because they run first, a recognized URL is consumed before linkify can
//! turn it into a plain link. Markdown links, autolinks, raw HTML tags and
//! code spans start with `[`, `<` or a backtick and are consumed whole by
//! their own rules, so a URL inside them is never offered to the scanner.
//!
//! Neither rule matches in validation mode (`check`), which markdown-it uses
//! to find where a link label ends; the URL tails are greedy and would run
//! past the closing `]`. Inside link text (`link_level > 0`) URLs stay text.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use tracing::debug;

use crate::config::VideoConfig;
use crate::error::ConfigResult;
use crate::fragment::Fragment;
use crate::guard;
use crate::recognizer::{recognize, VideoMatch};
use crate::service::Service;

/// AST node for an embedded video
#[derive(Debug, Clone)]
pub struct VideoEmbedNode {
    pub service: Service,
    /// The source URL that was replaced
    pub url: String,
    pub fragment: Fragment,
}

impl From<VideoMatch> for VideoEmbedNode {
    fn from(m: VideoMatch) -> Self {
        Self {
            service: m.service,
            url: m.url,
            fragment: m.fragment,
        }
    }
}

impl NodeValue for VideoEmbedNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        self.fragment.render(fmt);
    }
}

/// AST node for a backslash-escaped video URL, rendered as plain text
#[derive(Debug, Clone)]
pub struct EscapedVideoUrl {
    pub url: String,
}

impl NodeValue for EscapedVideoUrl {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text(&self.url);
    }
}

/// Scanner for bare video URLs
pub struct VideoScanner;

impl InlineRule for VideoScanner {
    const MARKER: char = 'h';

    fn check(_: &mut InlineState) -> Option<usize> {
        None
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        if state.link_level > 0 {
            return None;
        }
        let config = state.md.ext.get::<VideoConfig>()?;
        let found = recognize(&state.src, state.pos, state.pos_max, config)?;
        let len = found.len;
        Some((Node::new(VideoEmbedNode::from(found)), len))
    }
}

/// Scanner for `\` followed by a video URL
pub struct EscapedVideoScanner;

impl InlineRule for EscapedVideoScanner {
    const MARKER: char = '\\';

    fn check(_: &mut InlineState) -> Option<usize> {
        None
    }

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = state.src.get(state.pos..state.pos_max)?;
        let rest = input.strip_prefix('\\')?;
        if guard::is_escaped(&state.src, state.pos) {
            return None;
        }

        let config = state.md.ext.get::<VideoConfig>()?;
        let found = recognize(rest, 0, rest.len(), config)?;
        let len = found.len + 1;
        Some((Node::new(EscapedVideoUrl { url: found.url }), len))
    }
}

/// Add the video plugin with default dimensions
pub fn add_video_plugin(md: &mut MarkdownIt) {
    add_video_plugin_with(md, VideoConfig::default());
}

/// Add the video plugin with the given dimensions
///
/// Calling this again on the same parser only replaces the configuration.
pub fn add_video_plugin_with(md: &mut MarkdownIt, config: VideoConfig) {
    let registered = md.ext.get::<VideoConfig>().is_some();
    md.ext.insert(config);
    if registered {
        debug!("video plugin already registered, configuration replaced");
        return;
    }

    md.inline.add_rule::<EscapedVideoScanner>().before_all();
    md.inline.add_rule::<VideoScanner>().before_all();
    debug!(services = Service::ALL.len(), "video plugin registered");
}

/// Owned extension object, the counterpart of a host extension instance
#[derive(Debug, Clone, Default)]
pub struct VideoExtension {
    config: VideoConfig,
}

impl VideoExtension {
    pub fn new(config: VideoConfig) -> Self {
        Self { config }
    }

    /// Build from `(option, value)` overrides, failing on unknown options
    pub fn from_overrides<I, K, V>(overrides: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: std::fmt::Display,
    {
        VideoConfig::from_overrides(overrides).map(Self::new)
    }

    pub fn config(&self) -> &VideoConfig {
        &self.config
    }

    /// Register with an existing parser
    pub fn extend(&self, md: &mut MarkdownIt) {
        add_video_plugin_with(md, self.config.clone());
    }

    /// A CommonMark parser with raw HTML and this extension enabled
    pub fn parser(&self) -> MarkdownIt {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        markdown_it::plugins::html::add(&mut md);
        self.extend(&mut md);
        md
    }

    /// Like [`VideoExtension::parser`], also autolinking remaining bare URLs
    pub fn parser_with_linkify(&self) -> MarkdownIt {
        let mut md = self.parser();
        markdown_it::plugins::extra::linkify::add(&mut md);
        md
    }

    /// Convert a markdown document to HTML
    pub fn render(&self, text: &str) -> String {
        self.parser().parse(text).render()
    }
}

/// Convert a markdown document to HTML with the video extension enabled
pub fn render(text: &str, config: &VideoConfig) -> String {
    VideoExtension::new(config.clone()).render(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_parser() -> MarkdownIt {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_video_plugin(&mut md);
        md
    }

    fn embeds(md: &MarkdownIt, input: &str) -> Vec<VideoEmbedNode> {
        fn walk(node: &Node, out: &mut Vec<VideoEmbedNode>) {
            if let Some(embed) = node.cast::<VideoEmbedNode>() {
                out.push(embed.clone());
            }
            for child in &node.children {
                walk(child, out);
            }
        }

        let mut out = Vec::new();
        walk(&md.parse(input), &mut out);
        out
    }

    #[test]
    fn test_bare_url_becomes_embed_node() {
        let md = setup_parser();
        let found = embeds(&md, "Look: http://www.vimeo.com/1496152 !");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].service, Service::Vimeo);
        assert_eq!(found[0].url, "http://www.vimeo.com/1496152");
    }

    #[test]
    fn test_surrounding_text_survives() {
        let md = setup_parser();
        let html = md.parse("before http://youtu.be/abc123 after").render();

        assert!(html.starts_with("<p>before <iframe "));
        assert!(html.contains("></iframe> after</p>"));
    }

    #[test]
    fn test_two_urls_in_one_paragraph() {
        let md = setup_parser();
        let found = embeds(
            &md,
            "http://www.vimeo.com/1 and http://video.yahoo.com/watch/1981791/4769603",
        );

        let services: Vec<_> = found.iter().map(|e| e.service).collect();
        assert_eq!(services, vec![Service::Vimeo, Service::Yahoo]);
    }

    #[test]
    fn test_code_span_is_untouched() {
        let md = setup_parser();
        assert!(embeds(&md, "`http://www.vimeo.com/1496152`").is_empty());
    }

    #[test]
    fn test_link_destination_is_untouched() {
        let md = setup_parser();
        assert!(embeds(&md, "[clip](http://www.vimeo.com/1496152)").is_empty());
        assert!(embeds(&md, "<http://www.vimeo.com/1496152>").is_empty());
    }

    #[test]
    fn test_link_text_is_untouched() {
        let md = setup_parser();
        assert!(embeds(&md, "[http://www.vimeo.com/1496152](http://example.com/)").is_empty());
        assert!(embeds(&md, "[see http://youtu.be/abc123 here](http://example.com/)").is_empty());
    }

    #[test]
    fn test_fenced_code_is_untouched() {
        let md = setup_parser();
        assert!(embeds(&md, "```\nhttp://www.vimeo.com/1496152\n```").is_empty());
    }

    #[test]
    fn test_escaped_url_renders_literal_text() {
        let md = setup_parser();
        let input = r"\http://www.vimeo.com/1496152";

        assert!(embeds(&md, input).is_empty());
        assert_eq!(
            md.parse(input).render(),
            "<p>http://www.vimeo.com/1496152</p>\n"
        );
    }

    #[test]
    fn test_reregistering_replaces_config() {
        let mut md = setup_parser();
        let config = VideoConfig::from_overrides([("vimeo_width", 1)]).unwrap();
        add_video_plugin_with(&mut md, config);

        let found = embeds(&md, "http://vimeo.com/2");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fragment.attr("width"), Some("1"));
    }

    #[test]
    fn test_extension_parser_renders() {
        let ext = VideoExtension::from_overrides([("youtube_width", 200)]).unwrap();
        let html = ext.render("http://youtu.be/x");

        assert!(html.contains(r#"width="200""#));
        assert!(html.contains(r#"height="315""#));
    }
}
