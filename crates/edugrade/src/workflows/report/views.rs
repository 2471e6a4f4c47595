use crate::workflows::evaluation::{
    CategoryIcon, CategoryId, CategorySuggestionBlock, EvaluationId, QualityBand, SuggestionTier,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the category breakdown and the data behind both charts.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScoreEntry {
    pub category: CategoryId,
    pub name: String,
    pub short_label: String,
    pub icon: CategoryIcon,
    pub rating: u8,
    pub rating_label: &'static str,
    pub max_rating: u8,
    pub percent: u8,
    pub tier: SuggestionTier,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluation_id: EvaluationId,
    pub app_name: String,
    pub created_at: DateTime<Utc>,
    pub quality_score: u8,
    pub quality_band: QualityBand,
    pub quality_label: &'static str,
    pub quality_verdict: &'static str,
    pub category_scores: Vec<CategoryScoreEntry>,
    pub suggestions: Vec<CategorySuggestionBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
}
