use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{CategoryId, EvaluationSubmission, RatingForm, ValidationError};

/// Reads batches of evaluations from CSV exports.
pub struct EvaluationCsvImporter;

impl EvaluationCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<EvaluationSubmission>, EvaluationImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses every row, failing on the first invalid one.
    ///
    /// Expected headers: `app_name`, `pedagogical_design`, `ui_ux`, `engagement`,
    /// `technical_performance`, `learning_effectiveness`. Rows are numbered from 1,
    /// not counting the header.
    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<EvaluationSubmission>, EvaluationImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut submissions = Vec::new();

        for (index, record) in csv_reader.deserialize::<EvaluationRow>().enumerate() {
            let row_number = index + 1;
            let row = record?;
            submissions.push(row.into_submission(row_number)?);
        }

        Ok(submissions)
    }
}

#[derive(Debug, Deserialize)]
struct EvaluationRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    app_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pedagogical_design: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ui_ux: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    engagement: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    technical_performance: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    learning_effectiveness: Option<String>,
}

impl EvaluationRow {
    fn into_submission(self, row: usize) -> Result<EvaluationSubmission, EvaluationImportError> {
        let app_name = self.app_name.ok_or(EvaluationImportError::Validation {
            row,
            source: ValidationError::EmptyAppName,
        })?;

        let cells = [
            (CategoryId::PedagogicalDesign, self.pedagogical_design),
            (CategoryId::UiUx, self.ui_ux),
            (CategoryId::Engagement, self.engagement),
            (CategoryId::TechnicalPerformance, self.technical_performance),
            (CategoryId::LearningEffectiveness, self.learning_effectiveness),
        ];

        let mut form = RatingForm::default();
        for (category, cell) in cells {
            let Some(raw) = cell else {
                continue;
            };
            let value = raw
                .parse::<i64>()
                .map_err(|_| EvaluationImportError::Unparseable {
                    row,
                    column: category.key(),
                    value: raw.clone(),
                })?;
            form.set(category, value);
        }

        let ratings = form
            .into_ratings()
            .map_err(|source| EvaluationImportError::Validation { row, source })?;

        Ok(EvaluationSubmission { app_name, ratings })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationImportError {
    #[error("failed to open evaluation import: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse evaluation import: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {column} is not a whole number: {value:?}")]
    Unparseable {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: {source}")]
    Validation {
        row: usize,
        #[source]
        source: ValidationError,
    },
}
