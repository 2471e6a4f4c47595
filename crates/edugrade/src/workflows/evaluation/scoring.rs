use super::domain::{CategoryId, RatingSet, ValidationError, MAX_RATING};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate quality percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityScore(u8);

impl QualityScore {
    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn band(self) -> QualityBand {
        QualityBand::for_score(self.0)
    }

    /// One-line assessment displayed under the score.
    pub const fn verdict(self) -> &'static str {
        if self.0 >= 75 {
            "This educational app demonstrates excellent quality across all evaluated parameters."
        } else if self.0 >= 50 {
            "This app shows good potential with room for targeted improvements."
        } else {
            "Significant improvements needed to meet educational quality standards."
        }
    }
}

impl fmt::Display for QualityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl QualityBand {
    pub const fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Equally weighted percentage of the maximum possible rating sum, rounded half up.
pub fn compute_quality_score(ratings: &RatingSet) -> Result<QualityScore, ValidationError> {
    ratings.validate()?;

    let sum: u32 = ratings
        .entries()
        .iter()
        .map(|(_, rating)| u32::from(*rating))
        .sum();
    let max_sum = u32::from(MAX_RATING) * CategoryId::ordered().len() as u32;

    // (sum / max) * 100 rounded half up, kept in integers
    let percent = (sum * 200 + max_sum) / (max_sum * 2);

    Ok(QualityScore(percent.min(100) as u8))
}
