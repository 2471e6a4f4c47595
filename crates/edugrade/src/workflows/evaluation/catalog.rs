use super::domain::{CategoryIcon, CategoryId};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Description of one evaluated category. Built-in entries borrow static text;
/// catalogs read from JSON own theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub id: CategoryId,
    pub name: Cow<'static, str>,
    pub short_label: Cow<'static, str>,
    pub description: Cow<'static, str>,
    #[serde(default)]
    pub icon_key: Cow<'static, str>,
}

impl CategoryDefinition {
    pub fn icon(&self) -> CategoryIcon {
        CategoryIcon::from_key(&self.icon_key)
    }
}

static STANDARD_CATEGORIES: [CategoryDefinition; 5] = [
    CategoryDefinition {
        id: CategoryId::PedagogicalDesign,
        name: Cow::Borrowed("Pedagogical Design"),
        short_label: Cow::Borrowed("Pedagogical"),
        description: Cow::Borrowed("Educational methodology, learning theories, curriculum alignment"),
        icon_key: Cow::Borrowed("AcademicCap"),
    },
    CategoryDefinition {
        id: CategoryId::UiUx,
        name: Cow::Borrowed("User Interface & Experience"),
        short_label: Cow::Borrowed("UI/UX"),
        description: Cow::Borrowed("Visual design, navigation, accessibility, user-friendliness"),
        icon_key: Cow::Borrowed("DeviceMobile"),
    },
    CategoryDefinition {
        id: CategoryId::Engagement,
        name: Cow::Borrowed("Engagement & Motivation"),
        short_label: Cow::Borrowed("Engagement"),
        description: Cow::Borrowed("Gamification, rewards, feedback mechanisms, user retention"),
        icon_key: Cow::Borrowed("Sparkles"),
    },
    CategoryDefinition {
        id: CategoryId::TechnicalPerformance,
        name: Cow::Borrowed("Technical Performance"),
        short_label: Cow::Borrowed("Technical"),
        description: Cow::Borrowed("Speed, reliability, compatibility, security, data privacy"),
        icon_key: Cow::Borrowed("Bolt"),
    },
    CategoryDefinition {
        id: CategoryId::LearningEffectiveness,
        name: Cow::Borrowed("Learning Effectiveness"),
        short_label: Cow::Borrowed("Learning"),
        description: Cow::Borrowed("Knowledge retention, skill development, measurable outcomes"),
        icon_key: Cow::Borrowed("ChartBar"),
    },
];

/// Ordered, read-only list of category definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<CategoryDefinition>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl CategoryCatalog {
    pub fn standard() -> Self {
        Self {
            categories: STANDARD_CATEGORIES.to_vec(),
        }
    }

    /// Builds a catalog from arbitrary definitions; call [`CategoryCatalog::validate`] before use.
    pub fn from_definitions(categories: Vec<CategoryDefinition>) -> Self {
        Self { categories }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses a JSON array of definitions and validates it.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog = Self::from_definitions(serde_json::from_str(raw)?);
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Definition for `id`. Validated catalogs always contain every category.
    pub fn definition(&self, id: CategoryId) -> &CategoryDefinition {
        self.categories
            .iter()
            .find(|definition| definition.id == id)
            .unwrap_or(&STANDARD_CATEGORIES[id as usize])
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.len() != CategoryId::ordered().len() {
            return Err(CatalogError::CategoryCount(self.categories.len()));
        }

        let mut seen = HashSet::new();
        for definition in &self.categories {
            if !seen.insert(definition.id) {
                return Err(CatalogError::DuplicateCategory(definition.id));
            }
            if definition.name.trim().is_empty() {
                return Err(CatalogError::BlankName(definition.id));
            }
        }

        for (position, category) in CategoryId::ordered().into_iter().enumerate() {
            if self.categories[position].id != category {
                return Err(CatalogError::OutOfOrder {
                    position,
                    expected: category,
                });
            }
        }

        Ok(())
    }
}

/// Startup configuration failure for the category catalog or suggestion library.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("category catalog must define exactly 5 categories, found {0}")]
    CategoryCount(usize),
    #[error("category {0} is defined more than once")]
    DuplicateCategory(CategoryId),
    #[error("category {0} has a blank name")]
    BlankName(CategoryId),
    #[error("category at position {position} should be {expected}")]
    OutOfOrder {
        position: usize,
        expected: CategoryId,
    },
    #[error("no suggestions configured for {category} ({tier})")]
    MissingSuggestions {
        category: CategoryId,
        tier: &'static str,
    },
    #[error("failed to read content file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed content file: {0}")]
    Malformed(#[from] serde_json::Error),
}
