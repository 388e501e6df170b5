//! Plain value configuration handed over by the caller.
//!
//! Nothing here reads files. A configuration collaborator either builds
//! these structs directly, deserializes them from any serde format, or
//! passes raw key/value pairs to [`SiteConfig::from_pairs`].

use super::encoding::Encoding;
use super::errors::ParseError;

/// Two or more consecutive line breaks, whitespace only lines included.
pub const DEFAULT_HAND_BOUNDARY: &str = r"\r?\n(?:[ \t]*\r?\n)+";

fn default_site_name() -> String {
    "PokerStars".to_string()
}

fn default_encodings() -> Vec<Encoding> {
    vec![Encoding::Utf8, Encoding::Latin1]
}

fn default_currency_symbols() -> Vec<String> {
    ["$", "€", "£"].iter().map(|s| s.to_string()).collect()
}

fn default_hand_boundary() -> String {
    DEFAULT_HAND_BOUNDARY.to_string()
}

/// Per site lexical parameters.
///
/// # Example JSON
///
/// ```json
/// {
///   "name": "PokerStars",
///   "encodings": ["Utf8", "Latin1"],
///   "currency_symbols": ["$", "€"],
///   "hero": "alice"
/// }
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Registry key of the adapter for this site.
    #[cfg_attr(feature = "serde", serde(default = "default_site_name"))]
    pub name: String,

    /// Tried in order until one decodes the input.
    #[cfg_attr(feature = "serde", serde(default = "default_encodings"))]
    pub encodings: Vec<Encoding>,

    /// Symbols that may prefix amounts and carry no value.
    #[cfg_attr(feature = "serde", serde(default = "default_currency_symbols"))]
    pub currency_symbols: Vec<String>,

    /// Regular expression separating two hands.
    #[cfg_attr(feature = "serde", serde(default = "default_hand_boundary"))]
    pub hand_boundary: String,

    /// Name of the player whose files these are, when the text alone does
    /// not tell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hero: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            encodings: default_encodings(),
            currency_symbols: default_currency_symbols(),
            hand_boundary: default_hand_boundary(),
            hero: None,
        }
    }
}

impl SiteConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Build from key/value data. Unknown keys are rejected, missing keys
    /// keep their default.
    ///
    /// Lists (`encodings`, `currency_symbols`) are comma separated.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = SiteConfig::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref().trim() {
                "name" | "site" => config.name = value.to_string(),
                "encodings" | "codepages" => {
                    config.encodings = value
                        .split(',')
                        .map(|label| {
                            Encoding::from_label(label).ok_or_else(|| {
                                ParseError::Config(format!("unknown encoding '{}'", label.trim()))
                            })
                        })
                        .collect::<Result<_, _>>()?;
                }
                "currency_symbols" => {
                    config.currency_symbols = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                "hand_boundary" => config.hand_boundary = value.to_string(),
                "hero" => {
                    config.hero = if value.is_empty() {
                        None
                    } else {
                        Some(value.to_string())
                    }
                }
                other => return Err(ParseError::Config(format!("unknown key '{other}'"))),
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.name.trim().is_empty() {
            return Err(ParseError::Config("site name is empty".to_string()));
        }
        if self.encodings.is_empty() {
            return Err(ParseError::Config(
                "at least one encoding is required".to_string(),
            ));
        }
        if self.hand_boundary.is_empty() {
            return Err(ParseError::Config("hand boundary is empty".to_string()));
        }
        regex::Regex::new(&self.hand_boundary)?;
        Ok(())
    }
}

/// What to do with a hand that fails.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorPolicy {
    /// Keep the failure with its raw text and move on.
    #[default]
    Skip,
    /// Stop the whole run at the first failure.
    Abort,
}

fn default_parallel() -> bool {
    true
}

/// Settings for an [`crate::parse::Importer`] run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub error_policy: ErrorPolicy,

    /// Ordered list of sites. The first entry is the default site.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sites: Vec<SiteConfig>,

    /// Parse hands on the rayon pool when the `parallel` feature is on.
    #[cfg_attr(feature = "serde", serde(default = "default_parallel"))]
    pub parallel: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            sites: vec![SiteConfig::default()],
            parallel: default_parallel(),
        }
    }
}

impl ImportConfig {
    pub fn site(&self, name: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.name == name)
    }

    pub fn validate(&self) -> Result<(), ParseError> {
        if self.sites.is_empty() {
            return Err(ParseError::Config(
                "at least one site is required".to_string(),
            ));
        }
        for (i, site) in self.sites.iter().enumerate() {
            site.validate()?;
            if self.sites[..i].iter().any(|s| s.name == site.name) {
                return Err(ParseError::Config(format!(
                    "site '{}' is configured twice",
                    site.name
                )));
            }
        }
        Ok(())
    }
}
