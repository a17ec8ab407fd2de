//! Named importer registry

use anyhow::{Result, anyhow};
use std::collections::BTreeMap;

use super::{ImportContext, Importer, kirjasto10};

/// Builds an importer from its run context
pub type ImporterConstructor = fn(ImportContext) -> Box<dyn Importer>;

/// A registered importer
#[derive(Clone)]
pub struct ImporterEntry {
    pub name: &'static str,
    pub description: &'static str,
    /// Sheet fetched when no URL or file is given
    pub default_sheet_url: &'static str,
    pub create: ImporterConstructor,
}

impl std::fmt::Debug for ImporterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterEntry")
            .field("name", &self.name)
            .field("default_sheet_url", &self.default_sheet_url)
            .finish()
    }
}

/// Mapping from importer name to constructor, filled at startup
#[derive(Debug, Default)]
pub struct ImporterRegistry {
    entries: BTreeMap<&'static str, ImporterEntry>,
}

impl ImporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in importer
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(kirjasto10::entry());
        registry
    }

    /// Register an importer, replacing any previous one with the same name
    pub fn register(&mut self, entry: ImporterEntry) {
        if self.entries.insert(entry.name, entry.clone()).is_some() {
            log::warn!("Importer '{}' registered twice, keeping the last one", entry.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ImporterEntry> {
        self.entries.get(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ImporterEntry> {
        self.entries.values()
    }

    /// Entry registered under `name`, or an error listing the known names
    pub fn lookup(&self, name: &str) -> Result<&ImporterEntry> {
        self.get(name).ok_or_else(|| {
            anyhow!(
                "Unknown importer '{}'. Available importers: {}",
                name,
                self.names().join(", ")
            )
        })
    }

    /// Construct the importer registered under `name`
    pub fn create(&self, name: &str, context: ImportContext) -> Result<Box<dyn Importer>> {
        let entry = self.lookup(name)?;
        Ok((entry.create)(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::ImportReport;
    use crate::importer::source::StaticSheetSource;
    use async_trait::async_trait;

    struct NoopImporter;

    #[async_trait]
    impl Importer for NoopImporter {
        fn name(&self) -> &'static str {
            "noop"
        }

        async fn import_resources(&mut self) -> Result<ImportReport> {
            Ok(ImportReport::default())
        }
    }

    fn noop_entry() -> ImporterEntry {
        ImporterEntry {
            name: "noop",
            description: "does nothing",
            default_sheet_url: "http://localhost/noop.csv",
            create: |_| Box::new(NoopImporter),
        }
    }

    async fn context() -> ImportContext {
        ImportContext {
            pool: crate::repository::test_pool().await,
            source: Box::new(StaticSheetSource(String::new())),
        }
    }

    #[test]
    fn test_defaults_include_library_importer() {
        let registry = ImporterRegistry::with_defaults();
        assert_eq!(registry.names(), vec!["kirjasto10"]);
        assert!(registry.get("kirjasto10").unwrap().default_sheet_url.starts_with("https://"));
    }

    #[tokio::test]
    async fn test_create_registered_importer() {
        let mut registry = ImporterRegistry::with_defaults();
        registry.register(noop_entry());
        assert_eq!(registry.names(), vec!["kirjasto10", "noop"]);

        let mut importer = registry.create("noop", context().await).unwrap();
        assert_eq!(importer.name(), "noop");
        assert_eq!(importer.import_resources().await.unwrap(), ImportReport::default());
    }

    #[tokio::test]
    async fn test_create_unknown_importer_lists_names() {
        let registry = ImporterRegistry::with_defaults();
        let err = registry.create("kirjasto11", context().await).err().unwrap();
        assert!(err.to_string().contains("kirjasto10"));
    }

    #[test]
    fn test_lookup_unknown_importer_lists_names() {
        let mut registry = ImporterRegistry::with_defaults();
        registry.register(noop_entry());

        assert_eq!(registry.lookup("noop").unwrap().name, "noop");
        let err = registry.lookup("kirjasto11").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown importer 'kirjasto11'. Available importers: kirjasto10, noop"
        );
    }
}
