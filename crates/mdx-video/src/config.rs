//! Per-service embed dimensions
//!
//! Every supported host has a `<service>_width` / `<service>_height` option
//! pair. Values are kept as strings because they are written verbatim into
//! the generated `width` and `height` attributes.
//!
//! Overrides can come from code, from an extension spec string such as
//! `video(youtube_width=640,youtube_height=360)`, or from a TOML file:
//!
//! ```toml
//! [video]
//! youtube_width = 640
//! vimeo_height = "321"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use markdown_it::parser::extset::MarkdownItExt;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Width and height written onto an embed element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: String,
    pub height: String,
}

impl Size {
    fn new(width: &str, height: &str) -> Self {
        Self {
            width: width.to_string(),
            height: height.to_string(),
        }
    }
}

/// Documentation entry for one configuration option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Every known option with its default and description
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec { name: "dailymotion_width", default: "480", description: "Width for Dailymotion videos" },
    OptionSpec { name: "dailymotion_height", default: "270", description: "Height for Dailymotion videos" },
    OptionSpec { name: "gametrailers_width", default: "512", description: "Width for Gametrailers videos" },
    OptionSpec { name: "gametrailers_height", default: "288", description: "Height for Gametrailers videos" },
    OptionSpec { name: "metacafe_width", default: "440", description: "Width for Metacafe videos" },
    OptionSpec { name: "metacafe_height", default: "248", description: "Height for Metacafe videos" },
    OptionSpec { name: "veoh_width", default: "410", description: "Width for Veoh videos" },
    OptionSpec { name: "veoh_height", default: "341", description: "Height for Veoh videos" },
    OptionSpec { name: "vimeo_width", default: "500", description: "Width for Vimeo videos" },
    OptionSpec { name: "vimeo_height", default: "321", description: "Height for Vimeo videos" },
    OptionSpec { name: "yahoo_width", default: "640", description: "Width for Yahoo! videos" },
    OptionSpec { name: "yahoo_height", default: "360", description: "Height for Yahoo! videos" },
    OptionSpec { name: "youtube_width", default: "420", description: "Width for Youtube videos" },
    OptionSpec { name: "youtube_height", default: "315", description: "Height for Youtube videos" },
];

/// Look up the documentation entry for an option name
pub fn option_spec(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|spec| spec.name == name)
}

/// Embed dimensions for every supported service
///
/// Built once per conversion run and stored in the markdown-it extension set;
/// recognizers only ever read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoConfig {
    pub dailymotion: Size,
    pub gametrailers: Size,
    pub metacafe: Size,
    pub veoh: Size,
    pub vimeo: Size,
    pub yahoo: Size,
    pub youtube: Size,
}

impl MarkdownItExt for VideoConfig {}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            dailymotion: Size::new("480", "270"),
            gametrailers: Size::new("512", "288"),
            metacafe: Size::new("440", "248"),
            veoh: Size::new("410", "341"),
            vimeo: Size::new("500", "321"),
            yahoo: Size::new("640", "360"),
            youtube: Size::new("420", "315"),
        }
    }
}

/// Shape of a TOML config file: options at the root or under `[video]`
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    video: BTreeMap<String, toml::Value>,
    #[serde(flatten)]
    root: BTreeMap<String, toml::Value>,
}

impl VideoConfig {
    /// Apply `(option, value)` overrides on top of the defaults
    pub fn from_overrides<I, K, V>(overrides: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: fmt::Display,
    {
        let mut config = Self::default();
        for (key, value) in overrides {
            config.set(key.as_ref(), value)?;
        }
        Ok(config)
    }

    /// Override a single option
    pub fn set(&mut self, key: &str, value: impl fmt::Display) -> ConfigResult<()> {
        let value = value.to_string();
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::invalid(key, "value is empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(ConfigError::invalid(key, "value contains whitespace"));
        }

        let slot = self
            .slot_mut(key)
            .ok_or_else(|| ConfigError::UnknownOption(key.to_string()))?;
        debug!(option = key, value, "video option overridden");
        *slot = value.to_string();
        Ok(())
    }

    /// Current value of an option
    pub fn get(&self, key: &str) -> Option<&str> {
        let (service, dimension) = key.rsplit_once('_')?;
        let size = self.size_for(service)?;
        match dimension {
            "width" => Some(size.width.as_str()),
            "height" => Some(size.height.as_str()),
            _ => None,
        }
    }

    /// Every option as `(name, current value, description)`
    pub fn options(&self) -> impl Iterator<Item = (&'static str, &str, &'static str)> + '_ {
        OPTIONS.iter().filter_map(move |spec| {
            self.get(spec.name)
                .map(|value| (spec.name, value, spec.description))
        })
    }

    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = Self::default();
        for (key, value) in file.root.iter().chain(file.video.iter()) {
            let value = match value {
                toml::Value::Integer(n) => n.to_string(),
                toml::Value::String(s) => s.clone(),
                other => {
                    return Err(ConfigError::invalid(
                        key,
                        format!("expected integer or string, found {}", other.type_str()),
                    ))
                }
            };
            config.set(key, value)?;
        }
        Ok(config)
    }

    /// Read options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading video config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply a comma separated `key=value` list on top of this config
    pub fn apply_pairs(&mut self, pairs: &str) -> ConfigResult<()> {
        for pair in pairs.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigError::Malformed(format!("expected key=value, got `{pair}`")))?;
            self.set(key.trim(), value.trim())?;
        }
        Ok(())
    }

    /// Apply the host's extension spec syntax on top of this config
    ///
    /// Accepts `video`, `video(key=value,...)` or a bare `key=value,...` list.
    pub fn apply_spec(&mut self, spec: &str) -> ConfigResult<()> {
        let spec = spec.trim();
        let pairs = match spec.find('(') {
            Some(open) => {
                let name = spec[..open].trim();
                if name != "video" {
                    return Err(ConfigError::UnknownExtension(name.to_string()));
                }
                spec[open + 1..]
                    .strip_suffix(')')
                    .ok_or_else(|| ConfigError::Malformed(format!("missing `)` in `{spec}`")))?
            }
            None if spec == "video" || spec.is_empty() => return Ok(()),
            None if spec.contains('=') => spec,
            None => return Err(ConfigError::UnknownExtension(spec.to_string())),
        };
        self.apply_pairs(pairs)
    }

    fn size_for(&self, service: &str) -> Option<&Size> {
        match service {
            "dailymotion" => Some(&self.dailymotion),
            "gametrailers" => Some(&self.gametrailers),
            "metacafe" => Some(&self.metacafe),
            "veoh" => Some(&self.veoh),
            "vimeo" => Some(&self.vimeo),
            "yahoo" => Some(&self.yahoo),
            "youtube" => Some(&self.youtube),
            _ => None,
        }
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut String> {
        let (service, dimension) = key.rsplit_once('_')?;
        let size = match service {
            "dailymotion" => &mut self.dailymotion,
            "gametrailers" => &mut self.gametrailers,
            "metacafe" => &mut self.metacafe,
            "veoh" => &mut self.veoh,
            "vimeo" => &mut self.vimeo,
            "yahoo" => &mut self.yahoo,
            "youtube" => &mut self.youtube,
            _ => return None,
        };
        match dimension {
            "width" => Some(&mut size.width),
            "height" => Some(&mut size.height),
            _ => None,
        }
    }
}

impl FromStr for VideoConfig {
    type Err = ConfigError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        config.apply_spec(spec)?;
        Ok(config)
    }
}
