//! Command-line front end for the mdx-video markdown extension

pub mod cli;

use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use mdx_video::{VideoConfig, VideoExtension};
use tracing::debug;

use crate::cli::Cli;

/// Build the video configuration from config file, extension spec and `--set`
/// overrides, in that order
pub fn build_config(cli: &Cli) -> Result<VideoConfig> {
    let mut config = match &cli.config {
        Some(path) => VideoConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => VideoConfig::default(),
    };

    if let Some(spec) = &cli.extension {
        config
            .apply_spec(spec)
            .with_context(|| format!("Invalid extension spec `{spec}`"))?;
    }

    for pair in &cli.set {
        config
            .apply_pairs(pair)
            .with_context(|| format!("Invalid --set `{pair}`"))?;
    }

    Ok(config)
}

/// Option table for `--list-options`
pub fn describe_options(config: &VideoConfig) -> String {
    let mut out = String::new();
    for (name, value, description) in config.options() {
        let _ = writeln!(out, "{name:<20} {value:<6} {description}");
    }
    out
}

/// Convert markdown text to HTML
pub fn convert(markdown: &str, config: &VideoConfig, linkify: bool) -> String {
    let extension = VideoExtension::new(config.clone());
    let md = if linkify {
        extension.parser_with_linkify()
    } else {
        extension.parser()
    };
    md.parse(markdown).render()
}

/// Read the input document from a file or stdin
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Run one conversion as described by the command line
pub fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;

    if cli.list_options {
        print!("{}", describe_options(&config));
        return Ok(());
    }

    let markdown = read_input(cli.input.as_deref())?;
    let html = convert(&markdown, &config, cli.linkify);
    debug!(input_bytes = markdown.len(), output_bytes = html.len(), "converted");

    match &cli.output {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("mdx-video").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_set_overrides_extension_spec() {
        let config = build_config(&cli(&[
            "-x",
            "video(youtube_width=200,youtube_height=100)",
            "-s",
            "youtube_width=300",
        ]))
        .unwrap();

        assert_eq!(config.youtube.width, "300");
        assert_eq!(config.youtube.height, "100");
    }

    #[test]
    fn test_extension_spec_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("video.toml");
        std::fs::write(&path, "vimeo_width = 1\nvimeo_height = 2\n").unwrap();

        let config = build_config(&cli(&[
            "-C",
            path.to_str().unwrap(),
            "-x",
            "video(vimeo_height=3)",
        ]))
        .unwrap();

        assert_eq!(config.vimeo.width, "1");
        assert_eq!(config.vimeo.height, "3");
    }

    #[test]
    fn test_unknown_option_fails() {
        let err = build_config(&cli(&["-s", "vine_width=1"])).unwrap_err();
        assert!(format!("{err:#}").contains("unknown option `vine_width`"));
    }

    #[test]
    fn test_describe_options_lists_everything() {
        let table = describe_options(&VideoConfig::default());
        assert_eq!(table.lines().count(), mdx_video::OPTIONS.len());
        assert!(table.contains("youtube_width"));
        assert!(table.contains("Width for Youtube videos"));
    }

    #[test]
    fn test_convert_with_linkify() {
        let html = convert("see http://example.com", &VideoConfig::default(), true);
        assert!(html.contains(r#"<a href="http://example.com">"#));
    }
}
