use crate::infra::{load_catalog, InMemoryBuildRepository};
use clap::Args;
use pc_builder::builds::{BuildAssessment, BuildService, ComponentSelection, Severity};
use pc_builder::catalog::InMemoryCatalog;
use pc_builder::error::AppError;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Selected catalog ids as JSON, e.g. '{"cpu":3,"motherboard":3,"ram":3,"psu":2}'
    #[arg(long, value_parser = parse_selection)]
    pub(crate) selection: ComponentSelection,
    /// Catalog CSV export to resolve ids against (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print the assessment as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn parse_selection(raw: &str) -> Result<ComponentSelection, String> {
    serde_json::from_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as a component selection ({err})"))
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        selection,
        catalog,
        json,
    } = args;

    let catalog = Arc::new(load_catalog(catalog.as_deref())?);
    let service = BuildService::new(
        Arc::new(InMemoryBuildRepository::default()),
        catalog.clone(),
    );
    let assessment = service.assess(&selection)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&assessment).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_report(&catalog, &selection, &assessment));
    }

    Ok(())
}

fn render_report(
    catalog: &InMemoryCatalog,
    selection: &ComponentSelection,
    assessment: &BuildAssessment,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Selection");
    for (kind, selected) in selection.slots() {
        let line = match selected {
            None => "-".to_string(),
            Some(id) => match catalog.get(kind, id) {
                Some(entry) => format!(
                    "{} ({})",
                    entry.display_name(),
                    entry.component.avg_used_price()
                ),
                None => format!("id {id} is no longer in the catalog"),
            },
        };
        let _ = writeln!(out, "  {:<13} {line}", kind.label());
    }

    let errors = assessment.count(Severity::Error);
    let warnings = assessment.count(Severity::Warning);
    let verdict = if assessment.compatible {
        "compatible"
    } else {
        "incompatible"
    };
    let _ = writeln!(
        out,
        "\nCompatibility: {verdict} ({errors} errors, {warnings} warnings)"
    );
    for finding in &assessment.findings {
        let severity = match finding.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        let _ = writeln!(out, "  [{severity}] {}", finding.message);
    }

    let metrics = &assessment.metrics;
    let _ = writeln!(out, "\nMetrics");
    let _ = writeln!(out, "  Total price        {}", metrics.total_price);
    let _ = writeln!(out, "  Thermal draw       {} W", metrics.total_thermal_draw);
    let _ = writeln!(out, "  Recommended PSU    {} W", metrics.recommended_wattage);
    let _ = writeln!(out, "  Performance score  {}", metrics.performance_score);

    if !assessment.budget.is_empty() {
        let _ = writeln!(out, "\nBudget");
        for share in &assessment.budget {
            let _ = writeln!(
                out,
                "  {:<13} {:>9}  {}%",
                share.label, share.price, share.share_percent
            );
        }
    }

    out
}
