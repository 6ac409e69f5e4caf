use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const DEFAULT_SLIDES_TO_SHOW: usize = 3;
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4502/graphql/execute.json/";
pub const DEFAULT_PROJECT: &str = "srilanka-airlines";

/// Slide orientation class. The authoring default is spelled `verticle`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layout {
    #[default]
    Verticle,
    Horizontal,
    Other(String),
}

impl Layout {
    pub fn as_class(&self) -> &str {
        match self {
            Layout::Verticle => "verticle",
            Layout::Horizontal => "horizontal",
            Layout::Other(s) => s,
        }
    }
}

impl From<String> for Layout {
    fn from(s: String) -> Self {
        match s.trim() {
            "" | "verticle" => Layout::Verticle,
            "horizontal" => Layout::Horizontal,
            other => Layout::Other(other.to_string()),
        }
    }
}

impl From<Layout> for String {
    fn from(l: Layout) -> Self { l.as_class().to_string() }
}

/// Authoring configuration for one carousel block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Persisted-query path; without it the block stays inactive.
    pub reference: Option<String>,
    pub slides_to_show: usize,
    pub layout: Layout,
    pub arrow_navigation: bool,
    /// Rotation interval in ms, 0 = off. Carried through but not acted on.
    pub auto_rotate: u64,
    pub custom_style: Option<String>,
    pub source: SourceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub endpoint: String,
    pub project: String,
    pub timeout_secs: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string(), project: DEFAULT_PROJECT.to_string(), timeout_secs: 10 }
    }
}

impl SourceSettings {
    /// `{endpoint}{project}/{reference}`
    pub fn query_url(&self, reference: &str) -> Result<Url> {
        let mut base = self.endpoint.clone();
        if !base.ends_with('/') { base.push('/'); }
        let base = Url::parse(&base).with_context(|| format!("invalid endpoint: {}", self.endpoint))?;
        let path = format!("{}/{}", self.project.trim_matches('/'), reference.trim().trim_start_matches('/'));
        base.join(&path).with_context(|| format!("invalid query path: {path}"))
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            reference: None,
            slides_to_show: DEFAULT_SLIDES_TO_SHOW,
            layout: Layout::default(),
            arrow_navigation: false,
            auto_rotate: 0,
            custom_style: None,
            source: SourceSettings::default(),
        }
    }
}

impl CarouselConfig {
    /// Build from the block's authoring properties (`reference`, `slidesToShow`,
    /// `layout`, `arrowNavigation`, `autoRotate`, `customStyle`).
    pub fn from_authoring(props: &HashMap<String, String>) -> Self {
        let text = |key: &str| props.get(key).map(|s| s.trim()).filter(|s| !s.is_empty());
        let int = |key: &str| text(key).and_then(leading_int);

        let mut cfg = Self::default();
        cfg.reference = text("reference").map(str::to_string);
        if let Some(n) = int("slidesToShow") {
            cfg.slides_to_show = n.max(1) as usize;
        }
        if let Some(l) = text("layout") {
            cfg.layout = Layout::from(l.to_string());
        }
        cfg.arrow_navigation = int("arrowNavigation").unwrap_or(0) != 0;
        cfg.auto_rotate = int("autoRotate").unwrap_or(0).max(0) as u64;
        cfg.custom_style = text("customStyle").map(str::to_string);
        cfg
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: Self = toml::from_str(s).context("parsing carousel config")?;
        cfg.slides_to_show = cfg.slides_to_show.max(1);
        Ok(cfg)
    }

    /// Load from `path`, or from the default location when `None`. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let s = fs::read_to_string(&path).with_context(|| format!("reading config: {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("in {}", path.display()))
    }

    /// Environment overrides; unparseable values are ignored.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|k| std::env::var(k).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(n) = get("CFCAROUSEL_SLIDES_TO_SHOW").and_then(|s| s.trim().parse::<usize>().ok()) {
            self.slides_to_show = n.max(1);
        }
        if let Some(v) = get("CFCAROUSEL_ARROWS") {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.arrow_navigation = true,
                "0" | "false" | "no" | "off" => self.arrow_navigation = false,
                _ => {}
            }
        }
        if let Some(ep) = get("CFCAROUSEL_ENDPOINT") {
            if Url::parse(ep.trim()).is_ok() {
                self.source.endpoint = ep.trim().to_string();
            } else {
                tracing::warn!(endpoint = %ep, "ignoring invalid CFCAROUSEL_ENDPOINT");
            }
        }
    }

    /// Slides per page, never below one.
    pub fn slides_per_page(&self) -> usize { self.slides_to_show.max(1) }

    pub fn active_reference(&self) -> Option<&str> {
        self.reference.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Leading integer of `s`, ignoring trailing junk: `"3px"` is 3, `"2.5"` is 2.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cfcarousel").map(|d| d.config_dir().join("config.toml"))
}
