//! Per-category indexes.
//!
//! Documentation generators split their search tables by symbol category so
//! the search box can offer "Functions", "Classes" and so on as filters. A
//! [`SearchCatalog`] keeps one [`SymbolIndex`] per [`Category`].

use crate::config::IndexConfig;
use crate::entry::{Entry, Record};
use crate::error::IndexError;
use crate::index::{IndexBuilder, SymbolIndex};
use crate::stats::IndexStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A family of search tables, named after the generator's file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Every symbol kind together.
    All,
    /// Classes and structs.
    Classes,
    /// Namespaces.
    Namespaces,
    /// Source files.
    Files,
    /// Functions and member functions.
    Functions,
    /// Variables and data members.
    Variables,
    /// Typedefs.
    Typedefs,
    /// Enumerations.
    Enums,
    /// Enumerators.
    Enumvalues,
    /// Related functions and friends.
    Related,
    /// Preprocessor macros.
    Defines,
    /// Module groups.
    Groups,
    /// Free-standing pages.
    Pages,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 13] = [
        Category::All,
        Category::Classes,
        Category::Namespaces,
        Category::Files,
        Category::Functions,
        Category::Variables,
        Category::Typedefs,
        Category::Enums,
        Category::Enumvalues,
        Category::Related,
        Category::Defines,
        Category::Groups,
        Category::Pages,
    ];

    /// Returns the file stem used for this category's tables.
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Classes => "classes",
            Category::Namespaces => "namespaces",
            Category::Files => "files",
            Category::Functions => "functions",
            Category::Variables => "variables",
            Category::Typedefs => "typedefs",
            Category::Enums => "enums",
            Category::Enumvalues => "enumvalues",
            Category::Related => "related",
            Category::Defines => "defines",
            Category::Groups => "groups",
            Category::Pages => "pages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One index per category.
#[derive(Debug, Clone, Default)]
pub struct SearchCatalog {
    indexes: BTreeMap<Category, SymbolIndex>,
}

impl SearchCatalog {
    /// Returns the index for a category, if one was loaded.
    pub fn index(&self, category: Category) -> Option<&SymbolIndex> {
        self.indexes.get(&category)
    }

    /// Runs a prefix query against one category.
    ///
    /// A category without an index yields no results.
    pub fn search(&self, category: Category, prefix: &str, limit: Option<usize>) -> Vec<&Entry> {
        self.index(category)
            .map(|index| index.search(prefix, limit))
            .unwrap_or_default()
    }

    /// Returns the loaded categories in display order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.indexes.keys().copied()
    }

    /// Returns the number of loaded categories.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no category is loaded.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Returns statistics summed over every category.
    pub fn stats(&self) -> IndexStats {
        let mut total = IndexStats::default();
        for index in self.indexes.values() {
            total += index.stats();
        }
        total
    }
}

/// The result of building a catalog.
#[derive(Debug, Default)]
pub struct CatalogOutput {
    /// The built catalog.
    pub catalog: SearchCatalog,
    /// Problems found in the input, tagged with their category.
    pub errors: Vec<(Category, IndexError)>,
}

/// Routes records to per-category index builders.
#[derive(Debug)]
pub struct CatalogBuilder {
    config: IndexConfig,
    builders: BTreeMap<Category, IndexBuilder>,
}

impl CatalogBuilder {
    /// Creates an empty catalog builder.
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            builders: BTreeMap::new(),
        }
    }

    /// Returns the builder for a category, creating it on first use.
    pub fn category(&mut self, category: Category) -> &mut IndexBuilder {
        let config = &self.config;
        self.builders
            .entry(category)
            .or_insert_with(|| IndexBuilder::new(config.clone()))
    }

    /// Adds a record to a category.
    pub fn push_record(&mut self, category: Category, record: Record) {
        self.category(category).push_record(record);
    }

    /// Finishes every category.
    pub fn finish(self) -> CatalogOutput {
        let mut output = CatalogOutput::default();
        for (category, builder) in self.builders {
            let (index, errors) = builder.finish().into_parts();
            output
                .errors
                .extend(errors.into_iter().map(|error| (category, error)));
            output.catalog.indexes.insert(category, index);
        }
        output
    }
}
