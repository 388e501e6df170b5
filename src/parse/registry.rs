use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::config::SiteConfig;
use super::errors::ParseError;
use super::site::SiteAdapter;
use super::sites::PokerStarsAdapter;

/// Builds a fresh adapter for a site configuration.
pub type AdapterFactory = fn(&SiteConfig) -> Result<Box<dyn SiteAdapter>, ParseError>;

/// Adapters keyed by site name.
///
/// New sites are added by registering a factory, the driver does not
/// change.
#[derive(Clone, Default)]
pub struct SiteRegistry {
    factories: BTreeMap<String, AdapterFactory>,
}

impl fmt::Debug for SiteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

impl SiteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every adapter this crate ships.
    pub fn with_builtin_sites() -> Self {
        let mut registry = Self::new();
        registry.register(PokerStarsAdapter::SITE_NAME, |config| {
            Ok(Box::new(PokerStarsAdapter::new(config)?))
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: AdapterFactory) {
        debug!(name, "Registering site adapter");
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn factory(&self, name: &str) -> Result<AdapterFactory, ParseError> {
        self.factories
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::UnknownSite(name.to_string()))
    }

    /// Build the adapter configured by `config`.
    pub fn create(&self, config: &SiteConfig) -> Result<Box<dyn SiteAdapter>, ParseError> {
        let factory = self.factory(&config.name)?;
        factory(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sites() {
        let registry = SiteRegistry::with_builtin_sites();
        assert!(registry.contains("PokerStars"));
        assert_eq!(vec!["PokerStars"], registry.names().collect::<Vec<_>>());
        let adapter = registry.create(&SiteConfig::default()).unwrap();
        assert_eq!("PokerStars", adapter.site_name());
    }

    #[test]
    fn test_unknown_site() {
        let registry = SiteRegistry::new();
        assert!(matches!(
            registry.create(&SiteConfig::new("Nowhere")),
            Err(ParseError::UnknownSite(_))
        ));
    }
}
