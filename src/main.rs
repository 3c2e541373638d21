mod charts;
mod diagnostics;
mod questions;
mod render;
mod stats;
mod table;

use std::path::PathBuf;

use clap::Parser;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "survey-charts")]
#[command(about = "Survey chart report generator", long_about = None)]
struct Cli {
    /// Path to the semicolon-delimited survey CSV.
    #[arg(long)]
    input: PathBuf,

    /// Output HTML file.
    #[arg(short = 'o', long, default_value = "charts_report.html")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load the survey table (semicolon CSV, day-first Timestamp).
    let table = table::SurveyTable::load(&cli.input)?;
    diagnostics::note(format!(
        "Loaded {} rows, {} columns",
        table.len(),
        table.headers().len()
    ));

    // 2) Derive one chart + summary per survey question.
    let theme = charts::Theme::default();
    let blocks = charts::build_all_charts(&table, &theme)?;
    diagnostics::note(format!("Created {} charts", blocks.len()));

    // 3) Render and write the report.
    let html = render::html::render_report(&blocks, &table, &theme)?;
    std::fs::write(&cli.output, html)?;
    diagnostics::note(format!("Wrote {}", cli.output.display()));

    Ok(())
}
