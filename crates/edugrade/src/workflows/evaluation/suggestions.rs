use super::catalog::{CatalogError, CategoryCatalog, CategoryDefinition};
use super::domain::{validate_rating, CategoryId, RatingSet, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Priority bucket derived from a single category rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionTier {
    Critical,
    Enhancement,
    Excellent,
}

impl SuggestionTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Critical, Self::Enhancement, Self::Excellent]
    }

    pub const fn for_rating(rating: u8) -> Self {
        if rating >= 4 {
            Self::Excellent
        } else if rating >= 3 {
            Self::Enhancement
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical Improvements Needed",
            Self::Enhancement => "Enhancement Opportunities",
            Self::Excellent => "Excellent",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Enhancement => "enhancement",
            Self::Excellent => "excellent",
        }
    }

    pub const fn indicator(self) -> TierIndicator {
        match self {
            Self::Critical => TierIndicator::AlertCircle,
            Self::Enhancement => TierIndicator::Lightbulb,
            Self::Excellent => TierIndicator::CheckCircle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierIndicator {
    AlertCircle,
    Lightbulb,
    CheckCircle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierSuggestions {
    pub tier: SuggestionTier,
    pub items: Vec<String>,
}

/// Recommendations for one category, as rendered in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySuggestionBlock {
    pub category: CategoryDefinition,
    pub rating: u8,
    pub tier: SuggestionTier,
    pub tier_label: &'static str,
    pub items: Vec<String>,
}

/// Lookup table of recommendation text keyed by category and tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionLibrary {
    entries: BTreeMap<(CategoryId, SuggestionTier), Vec<String>>,
}

impl Default for SuggestionLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl SuggestionLibrary {
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();
        for category in CategoryId::ordered() {
            for tier in SuggestionTier::ordered() {
                let items = standard_items(category, tier)
                    .iter()
                    .map(|item| item.to_string())
                    .collect();
                entries.insert((category, tier), items);
            }
        }
        Self { entries }
    }

    /// Loads a replacement library from JSON and checks it covers every category and tier.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let document: BTreeMap<CategoryId, BTreeMap<SuggestionTier, Vec<String>>> =
            serde_json::from_str(raw)?;

        let mut entries = BTreeMap::new();
        for (category, tiers) in document {
            for (tier, items) in tiers {
                entries.insert((category, tier), items);
            }
        }

        let library = Self { entries };
        library.validate()?;
        Ok(library)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        for category in CategoryId::ordered() {
            for tier in SuggestionTier::ordered() {
                let populated = self
                    .entries
                    .get(&(category, tier))
                    .map(|items| {
                        !items.is_empty() && items.iter().all(|item| !item.trim().is_empty())
                    })
                    .unwrap_or(false);
                if !populated {
                    return Err(CatalogError::MissingSuggestions {
                        category,
                        tier: tier.key(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn items(&self, category: CategoryId, tier: SuggestionTier) -> &[String] {
        self.entries
            .get(&(category, tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn suggestions_for(
        &self,
        category: CategoryId,
        rating: u8,
    ) -> Result<TierSuggestions, ValidationError> {
        validate_rating(category, rating)?;
        let tier = SuggestionTier::for_rating(rating);
        Ok(TierSuggestions {
            tier,
            items: self.items(category, tier).to_vec(),
        })
    }

    /// One block per category in catalog order, independent of the rating values.
    pub fn suggestions_for_all(
        &self,
        catalog: &CategoryCatalog,
        ratings: &RatingSet,
    ) -> Result<Vec<CategorySuggestionBlock>, ValidationError> {
        ratings.validate()?;

        CategoryId::ordered()
            .into_iter()
            .map(|category| -> Result<CategorySuggestionBlock, ValidationError> {
                let rating = ratings.get(category);
                let TierSuggestions { tier, items } = self.suggestions_for(category, rating)?;
                Ok(CategorySuggestionBlock {
                    category: catalog.definition(category).clone(),
                    rating,
                    tier,
                    tier_label: tier.label(),
                    items,
                })
            })
            .collect()
    }
}

/// Tier and items for one category using the standard library.
pub fn suggestions_for(category: CategoryId, rating: u8) -> Result<TierSuggestions, ValidationError> {
    validate_rating(category, rating)?;
    let tier = SuggestionTier::for_rating(rating);
    Ok(TierSuggestions {
        tier,
        items: standard_items(category, tier)
            .iter()
            .map(|item| item.to_string())
            .collect(),
    })
}

/// Blocks for all five categories using the standard catalog and library.
pub fn suggestions_for_all(
    ratings: &RatingSet,
) -> Result<Vec<CategorySuggestionBlock>, ValidationError> {
    SuggestionLibrary::standard().suggestions_for_all(&CategoryCatalog::standard(), ratings)
}

fn standard_items(category: CategoryId, tier: SuggestionTier) -> &'static [&'static str] {
    use CategoryId::*;
    use SuggestionTier::*;

    match (category, tier) {
        (PedagogicalDesign, Critical) => &[
            "Align lessons with explicit learning objectives mapped to the target curriculum",
            "Ground activities in established learning theories such as scaffolding and retrieval practice",
            "Review content accuracy and age appropriateness with subject-matter educators",
            "Sequence material from foundational to advanced concepts with clear prerequisites",
        ],
        (PedagogicalDesign, Enhancement) => &[
            "Add adaptive difficulty so learners are challenged at their current level",
            "Include worked examples before independent practice tasks",
            "Provide teacher-facing guidance on how each module supports curriculum standards",
        ],
        (PedagogicalDesign, Excellent) => &[
            "Continue leveraging evidence-based learning theories and best practices",
            "Consider adding adaptive learning pathways to personalize student experiences",
            "Integrate formative assessments throughout the learning journey",
        ],
        (UiUx, Critical) => &[
            "Simplify the primary navigation so every core task is reachable within three taps",
            "Fix accessibility blockers: add screen reader labels, keyboard support, and captions",
            "Run usability sessions with target learners to locate points of confusion",
            "Establish a consistent visual language for buttons, typography, and feedback states",
        ],
        (UiUx, Enhancement) => &[
            "Improve navigation clarity by implementing breadcrumbs and clear hierarchy",
            "Enhance color contrast ratios to meet WCAG 2.1 AA accessibility standards",
            "Add interactive onboarding tutorials for first-time users",
            "Optimize touch targets for mobile devices (minimum 44x44px)",
        ],
        (UiUx, Excellent) => &[
            "Maintain the current design system and document it for future contributors",
            "Offer personalization options such as themes and adjustable text size",
            "Keep validating new screens against accessibility guidelines",
        ],
        (Engagement, Critical) => &[
            "Introduce immediate, specific feedback after every learner interaction",
            "Add clear goals and visible progress indicators to each session",
            "Design short activities that fit typical attention spans for the target age group",
            "Investigate drop-off points with analytics and address the largest one first",
        ],
        (Engagement, Enhancement) => &[
            "Add meaningful rewards such as badges tied to mastery rather than time spent",
            "Introduce streaks or gentle reminders to encourage regular practice",
            "Vary activity formats to keep sessions fresh",
        ],
        (Engagement, Excellent) => &[
            "Excellent gamification implementation - maintain current approach",
            "Strong user retention mechanisms are in place",
            "Consider adding social features for peer collaboration",
        ],
        (TechnicalPerformance, Critical) => &[
            "Resolve crashes and critical bugs before adding new features",
            "Reduce load times by profiling startup and deferring non-essential assets",
            "Audit data collection and storage for compliance with student privacy regulations",
            "Test on the low-end devices and browsers most common among target learners",
        ],
        (TechnicalPerformance, Enhancement) => &[
            "Add offline support for core learning content",
            "Set up crash reporting and performance monitoring",
            "Encrypt sensitive data in transit and at rest",
        ],
        (TechnicalPerformance, Excellent) => &[
            "Maintain robust security protocols and regular audits",
            "Consider implementing progressive web app (PWA) capabilities",
            "Optimize image and media loading for slower connections",
        ],
        (LearningEffectiveness, Critical) => &[
            "Define measurable learning outcomes for every module",
            "Add pre- and post-assessments to verify knowledge gains",
            "Replace passive content with active practice that requires recall",
            "Gather evidence from pilot classrooms before scaling content",
        ],
        (LearningEffectiveness, Enhancement) => &[
            "Implement detailed analytics to track learning outcomes",
            "Add spaced repetition algorithms for better knowledge retention",
            "Provide clear progress tracking and achievement milestones",
        ],
        (LearningEffectiveness, Excellent) => &[
            "Publish outcome data to demonstrate learning impact to schools and parents",
            "Extend mastery tracking to longer-term retention checks",
            "Share effective practices with educators through reports and dashboards",
        ],
    }
}
