use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest rating a category can receive.
pub const MIN_RATING: u8 = 1;
/// Highest rating a category can receive.
pub const MAX_RATING: u8 = 5;

/// The five evaluated categories, in canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    PedagogicalDesign,
    UiUx,
    Engagement,
    TechnicalPerformance,
    LearningEffectiveness,
}

impl CategoryId {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::PedagogicalDesign,
            Self::UiUx,
            Self::Engagement,
            Self::TechnicalPerformance,
            Self::LearningEffectiveness,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::PedagogicalDesign => "pedagogical_design",
            Self::UiUx => "ui_ux",
            Self::Engagement => "engagement",
            Self::TechnicalPerformance => "technical_performance",
            Self::LearningEffectiveness => "learning_effectiveness",
        }
    }

    pub fn from_key(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == value.trim())
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Icons the UI can draw next to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    GraduationCap,
    Smartphone,
    Sparkles,
    Zap,
    BarChart3,
}

impl CategoryIcon {
    /// Resolves a catalog icon key. Unknown keys fall back to [`CategoryIcon::BarChart3`].
    pub fn from_key(key: &str) -> Self {
        match key {
            "AcademicCap" => Self::GraduationCap,
            "DeviceMobile" => Self::Smartphone,
            "Sparkles" => Self::Sparkles,
            "Bolt" => Self::Zap,
            "ChartBar" => Self::BarChart3,
            _ => Self::fallback(),
        }
    }

    pub const fn fallback() -> Self {
        Self::BarChart3
    }
}

/// Five ratings submitted for one evaluation.
///
/// Fields are public so the form and storage layers can fill them directly;
/// range checks happen in [`RatingSet::validate`] and every scoring entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingSet {
    pub pedagogical_design: u8,
    pub ui_ux: u8,
    pub engagement: u8,
    pub technical_performance: u8,
    pub learning_effectiveness: u8,
}

impl RatingSet {
    pub fn new(
        pedagogical_design: u8,
        ui_ux: u8,
        engagement: u8,
        technical_performance: u8,
        learning_effectiveness: u8,
    ) -> Result<Self, ValidationError> {
        let ratings = Self {
            pedagogical_design,
            ui_ux,
            engagement,
            technical_performance,
            learning_effectiveness,
        };
        ratings.validate()?;
        Ok(ratings)
    }

    /// Same rating in every category.
    pub fn uniform(rating: u8) -> Result<Self, ValidationError> {
        Self::new(rating, rating, rating, rating, rating)
    }

    /// Builds a set from `(category, rating)` pairs, rejecting missing categories.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (CategoryId, u8)>,
    {
        let mut slots: [Option<u8>; 5] = [None; 5];
        for (category, rating) in pairs {
            slots[category as usize] = Some(rating);
        }

        let mut values = [0u8; 5];
        for (index, category) in CategoryId::ordered().into_iter().enumerate() {
            values[index] = slots[index].ok_or(ValidationError::MissingCategory(category))?;
        }

        Self::new(values[0], values[1], values[2], values[3], values[4])
    }

    pub const fn get(&self, category: CategoryId) -> u8 {
        match category {
            CategoryId::PedagogicalDesign => self.pedagogical_design,
            CategoryId::UiUx => self.ui_ux,
            CategoryId::Engagement => self.engagement,
            CategoryId::TechnicalPerformance => self.technical_performance,
            CategoryId::LearningEffectiveness => self.learning_effectiveness,
        }
    }

    pub fn set(&mut self, category: CategoryId, rating: u8) {
        match category {
            CategoryId::PedagogicalDesign => self.pedagogical_design = rating,
            CategoryId::UiUx => self.ui_ux = rating,
            CategoryId::Engagement => self.engagement = rating,
            CategoryId::TechnicalPerformance => self.technical_performance = rating,
            CategoryId::LearningEffectiveness => self.learning_effectiveness = rating,
        }
    }

    /// Ratings paired with their category, in canonical order.
    pub fn entries(&self) -> [(CategoryId, u8); 5] {
        CategoryId::ordered().map(|category| (category, self.get(category)))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (category, rating) in self.entries() {
            validate_rating(category, rating)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_rating(category: CategoryId, rating: u8) -> Result<(), ValidationError> {
    checked_rating(category, i64::from(rating)).map(|_| ())
}

/// Narrows a raw client value to a rating, keeping the original value in the error.
pub fn checked_rating(category: CategoryId, value: i64) -> Result<u8, ValidationError> {
    u8::try_from(value)
        .ok()
        .filter(|rating| (MIN_RATING..=MAX_RATING).contains(rating))
        .ok_or(ValidationError::OutOfRange { category, value })
}

/// Ratings as a client sent them: any may be absent or outside the rating scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingForm {
    pub pedagogical_design: Option<i64>,
    pub ui_ux: Option<i64>,
    pub engagement: Option<i64>,
    pub technical_performance: Option<i64>,
    pub learning_effectiveness: Option<i64>,
}

impl RatingForm {
    pub fn entries(&self) -> [(CategoryId, Option<i64>); 5] {
        [
            (CategoryId::PedagogicalDesign, self.pedagogical_design),
            (CategoryId::UiUx, self.ui_ux),
            (CategoryId::Engagement, self.engagement),
            (CategoryId::TechnicalPerformance, self.technical_performance),
            (CategoryId::LearningEffectiveness, self.learning_effectiveness),
        ]
    }

    pub fn set(&mut self, category: CategoryId, value: i64) {
        let slot = match category {
            CategoryId::PedagogicalDesign => &mut self.pedagogical_design,
            CategoryId::UiUx => &mut self.ui_ux,
            CategoryId::Engagement => &mut self.engagement,
            CategoryId::TechnicalPerformance => &mut self.technical_performance,
            CategoryId::LearningEffectiveness => &mut self.learning_effectiveness,
        };
        *slot = Some(value);
    }

    /// Range-checks present values, then requires all five categories.
    pub fn into_ratings(self) -> Result<RatingSet, ValidationError> {
        let mut pairs = Vec::with_capacity(5);
        for (category, value) in self.entries() {
            if let Some(value) = value {
                pairs.push((category, checked_rating(category, value)?));
            }
        }
        RatingSet::from_pairs(pairs)
    }
}

impl From<RatingSet> for RatingForm {
    fn from(ratings: RatingSet) -> Self {
        Self {
            pedagogical_design: Some(i64::from(ratings.pedagogical_design)),
            ui_ux: Some(i64::from(ratings.ui_ux)),
            engagement: Some(i64::from(ratings.engagement)),
            technical_performance: Some(i64::from(ratings.technical_performance)),
            learning_effectiveness: Some(i64::from(ratings.learning_effectiveness)),
        }
    }
}

/// Human label shown beside a single rating.
pub const fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "Unrated",
    }
}

/// Rejected caller input. Nothing is computed when one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("rating for {category} must be between 1 and 5, got {value}")]
    OutOfRange { category: CategoryId, value: i64 },
    #[error("rating for {0} is missing")]
    MissingCategory(CategoryId),
    #[error("app name must not be empty")]
    EmptyAppName,
}

/// Opaque identifier assigned when an evaluation is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(pub uuid::Uuid);

impl EvaluationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Form payload: the app under review plus its ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub app_name: String,
    pub ratings: RatingSet,
}

/// Submission body before validation; a missing name or ratings block is an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub ratings: RatingForm,
}

impl SubmissionForm {
    pub fn into_submission(self) -> Result<EvaluationSubmission, ValidationError> {
        Ok(EvaluationSubmission {
            app_name: self.app_name,
            ratings: self.ratings.into_ratings()?,
        })
    }
}

impl From<EvaluationSubmission> for SubmissionForm {
    fn from(submission: EvaluationSubmission) -> Self {
        Self {
            app_name: submission.app_name,
            ratings: submission.ratings.into(),
        }
    }
}

/// Stored evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub app_name: String,
    pub ratings: RatingSet,
    pub quality_score: u8,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_reports_the_first_missing_category() {
        let err = RatingSet::from_pairs([
            (CategoryId::PedagogicalDesign, 4),
            (CategoryId::UiUx, 3),
            (CategoryId::TechnicalPerformance, 4),
            (CategoryId::LearningEffectiveness, 4),
        ])
        .expect_err("engagement missing");

        assert_eq!(err, ValidationError::MissingCategory(CategoryId::Engagement));
    }

    #[test]
    fn from_pairs_accepts_any_order() {
        let ratings = RatingSet::from_pairs([
            (CategoryId::LearningEffectiveness, 1),
            (CategoryId::Engagement, 5),
            (CategoryId::UiUx, 2),
            (CategoryId::PedagogicalDesign, 3),
            (CategoryId::TechnicalPerformance, 4),
        ])
        .expect("complete set");

        assert_eq!(ratings, RatingSet::new(3, 2, 5, 4, 1).expect("valid"));
    }

    #[test]
    fn validate_rejects_zero_and_six() {
        assert_eq!(
            RatingSet::new(0, 3, 3, 3, 3),
            Err(ValidationError::OutOfRange {
                category: CategoryId::PedagogicalDesign,
                value: 0
            })
        );
        assert!(matches!(
            RatingSet::new(3, 3, 3, 3, 6),
            Err(ValidationError::OutOfRange {
                category: CategoryId::LearningEffectiveness,
                value: 6
            })
        ));
    }

    #[test]
    fn rating_form_keeps_wide_values_in_errors() {
        let mut form = RatingForm::from(RatingSet::uniform(3).expect("valid"));
        form.ui_ux = Some(300);
        assert_eq!(
            form.into_ratings(),
            Err(ValidationError::OutOfRange {
                category: CategoryId::UiUx,
                value: 300
            })
        );

        form.ui_ux = Some(-1);
        assert_eq!(
            form.into_ratings(),
            Err(ValidationError::OutOfRange {
                category: CategoryId::UiUx,
                value: -1
            })
        );
    }

    #[test]
    fn checked_rating_accepts_the_scale_bounds() {
        assert_eq!(checked_rating(CategoryId::Engagement, 1), Ok(1));
        assert_eq!(checked_rating(CategoryId::Engagement, 5), Ok(5));
        assert!(checked_rating(CategoryId::Engagement, 256).is_err());
    }

    #[test]
    fn rating_form_without_a_category_is_missing_not_malformed() {
        let form: RatingForm = serde_json::from_value(serde_json::json!({
            "pedagogical_design": 4,
            "ui_ux": 3,
            "technical_performance": 4,
            "learning_effectiveness": 4
        }))
        .expect("absent fields deserialize as none");

        assert_eq!(
            form.into_ratings(),
            Err(ValidationError::MissingCategory(CategoryId::Engagement))
        );
    }

    #[test]
    fn icon_keys_resolve_with_explicit_fallback() {
        assert_eq!(CategoryIcon::from_key("AcademicCap"), CategoryIcon::GraduationCap);
        assert_eq!(CategoryIcon::from_key("Bolt"), CategoryIcon::Zap);
        assert_eq!(CategoryIcon::from_key("Rocket"), CategoryIcon::BarChart3);
        assert_eq!(CategoryIcon::from_key(""), CategoryIcon::fallback());
    }

    #[test]
    fn category_keys_round_trip_through_serde() {
        let json = serde_json::to_string(&CategoryId::TechnicalPerformance).expect("serialize");
        assert_eq!(json, "\"technical_performance\"");
        assert_eq!(
            CategoryId::from_key("technical_performance"),
            Some(CategoryId::TechnicalPerformance)
        );
        assert_eq!(CategoryId::from_key("speed"), None);
    }
}
