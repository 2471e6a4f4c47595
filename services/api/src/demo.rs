use crate::infra::{build_service, InMemoryEvaluationRepository};
use chrono::Local;
use clap::Args;
use edugrade::config::AppConfig;
use edugrade::error::AppError;
use edugrade::workflows::evaluation::{
    EvaluationCsvImporter, EvaluationService, EvaluationServiceError, EvaluationSubmission,
    RatingForm, RatingSet, SubmissionForm,
};
use edugrade::workflows::report::{export_file_name, EvaluationReport, PageGeometry};
use std::path::{Path, PathBuf};

const DEMO_APP_NAME: &str = "Sample Educational App";

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Name of the app under review
    #[arg(long)]
    pub(crate) app_name: String,
    /// Pedagogical design rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) pedagogical_design: i64,
    /// User interface and experience rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) ui_ux: i64,
    /// Engagement and motivation rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) engagement: i64,
    /// Technical performance rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) technical_performance: i64,
    /// Learning effectiveness rating (1-5)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) learning_effectiveness: i64,
    #[command(flatten)]
    pub(crate) export: ExportArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Write the paginated text report to this file, or into this directory
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Page width in characters (defaults to REPORT_PAGE_WIDTH)
    #[arg(long)]
    pub(crate) width: Option<usize>,
    /// Page height in lines (defaults to REPORT_PAGE_HEIGHT)
    #[arg(long)]
    pub(crate) height: Option<usize>,
    /// Blank lines above the first row of each page (defaults to REPORT_TOP_MARGIN)
    #[arg(long)]
    pub(crate) top_margin: Option<usize>,
}

impl ExportArgs {
    fn geometry(&self, defaults: PageGeometry) -> PageGeometry {
        PageGeometry {
            width_chars: self.width.unwrap_or(defaults.width_chars),
            height_lines: self.height.unwrap_or(defaults.height_lines),
            top_margin_lines: self.top_margin.unwrap_or(defaults.top_margin_lines),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV file with app_name and one column per category
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) export: ExportArgs,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        app_name,
        pedagogical_design,
        ui_ux,
        engagement,
        technical_performance,
        learning_effectiveness,
        export,
    } = args;

    let submission = SubmissionForm {
        app_name,
        ratings: RatingForm {
            pedagogical_design: Some(pedagogical_design),
            ui_ux: Some(ui_ux),
            engagement: Some(engagement),
            technical_performance: Some(technical_performance),
            learning_effectiveness: Some(learning_effectiveness),
        },
    }
    .into_submission()
    .map_err(EvaluationServiceError::Validation)?;

    evaluate_and_render(submission, export)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Educational app quality demo");
    let submission = EvaluationSubmission {
        app_name: DEMO_APP_NAME.to_string(),
        ratings: RatingSet {
            pedagogical_design: 4,
            ui_ux: 3,
            engagement: 5,
            technical_performance: 4,
            learning_effectiveness: 4,
        },
    };

    evaluate_and_render(submission, args.export)
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.report)?;

    let submissions = EvaluationCsvImporter::from_path(&args.csv)?;
    println!(
        "Imported {} evaluations from {}",
        submissions.len(),
        args.csv.display()
    );

    for submission in submissions {
        service.submit(submission)?;
    }

    let mut ranked: Vec<_> = service
        .list()?
        .iter()
        .map(|record| record.summary_view())
        .collect();
    ranked.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));

    println!("\nRanked by quality score");
    for (position, view) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:>3}%  {}",
            position + 1,
            view.app_name,
            view.quality_score,
            view.quality_label
        );
    }

    Ok(())
}

fn evaluate_and_render(
    submission: EvaluationSubmission,
    export: ExportArgs,
) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = build_service(&config.report)?;

    let record = service.submit(submission)?;
    let report = service.report(&record.id)?;
    render_report(&report);

    if let Some(output) = &export.output {
        let geometry = export.geometry(config.report.geometry);
        let path = write_text_report(&service, &report, output, geometry)?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}

fn write_text_report(
    service: &EvaluationService<InMemoryEvaluationRepository>,
    report: &EvaluationReport,
    output: &Path,
    geometry: PageGeometry,
) -> Result<PathBuf, AppError> {
    let document = service.document(&report.evaluation_id, Some(geometry))?;
    let path = if output.is_dir() {
        output.join(export_file_name(&report.app_name, "txt"))
    } else {
        output.to_path_buf()
    };

    std::fs::write(&path, document.render_text())?;
    println!(
        "  {} page(s) at {}x{}",
        document.page_count(),
        geometry.width_chars,
        geometry.height_lines
    );
    Ok(path)
}

pub(crate) fn render_report(report: &EvaluationReport) {
    println!("\n{}", report.app_name);
    println!(
        "Evaluated {}",
        report
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!(
        "Quality score: {}% ({})",
        report.quality_score, report.quality_label
    );
    println!("{}", report.quality_verdict);

    println!("\nCategory breakdown");
    for entry in &report.category_scores {
        println!(
            "- {:<30} {}/{} {:<10} {:>3}%",
            entry.name, entry.rating, entry.max_rating, entry.rating_label, entry.percent
        );
    }

    println!("\nImprovement suggestions");
    for block in &report.suggestions {
        println!("{} [{}]", block.category.name, block.tier_label);
        for item in &block.items {
            println!("  - {}", item);
        }
    }

    println!("\nInsights");
    for insight in &report.insights {
        println!("- {}", insight);
    }
}
