//! Artifact loading configuration.

use crate::format::ArtifactFormat;
use crate::script::ScriptOptions;
use docsearch_core::IndexConfig;

/// Configuration for loading artifacts into indexes.
#[derive(Debug, Clone, Default)]
pub struct ArtifactConfig {
    /// How the loaded records are indexed.
    pub index: IndexConfig,

    /// How search scripts are read.
    pub script: ScriptOptions,

    /// Forces a format instead of detecting it.
    pub format: Option<ArtifactFormat>,
}

impl ArtifactConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the index configuration.
    #[must_use]
    pub fn index(mut self, index: IndexConfig) -> Self {
        self.index = index;
        self
    }

    /// Sets the script options.
    #[must_use]
    pub fn script(mut self, script: ScriptOptions) -> Self {
        self.script = script;
        self
    }

    /// Forces a format.
    #[must_use]
    pub const fn format(mut self, format: ArtifactFormat) -> Self {
        self.format = Some(format);
        self
    }
}
