// Selemo CLI - headless financial projection runs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use selemo_cli::dataset;
use selemo_cli::exit_codes::{EXIT_SUCCESS, EXIT_UNKNOWN_SCENARIO};
use selemo_cli::output::{self, Format};
use selemo_cli::CliError;
use selemo_projection::summary;
use selemo_projection::{
    cash_flow, monthly_extraction, price_comparison, run, PricingScenario, ProjectionConfig,
    ProjectionError,
};

#[derive(Parser)]
#[command(name = "selemo")]
#[command(about = "Phased-extraction financial projections (headless)")]
#[command(version)]
struct Cli {
    /// TOML dataset to load instead of the built-in Selemo data
    #[arg(long, global = true, value_name = "FILE")]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the pricing scenarios in the dataset
    #[command(after_help = "\
Examples:
  selemo scenarios
  selemo scenarios --format json
  selemo scenarios --dataset custom.toml")]
    Scenarios {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Monthly extraction volume by project for one scenario
    #[command(after_help = "\
Examples:
  selemo extraction --scenario Inframat
  selemo extraction --scenario 'Step Building Supplies' --format csv
  selemo extraction --scenario Bulkmat --format json -o extraction.json")]
    Extraction {
        /// Scenario to project
        #[arg(long)]
        scenario: String,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Monthly revenue, operational cost, and net cash flow for one scenario
    #[command(after_help = "\
Examples:
  selemo cashflow --scenario Inframat
  selemo cashflow --scenario Inframat --format csv -o cashflow.csv")]
    Cashflow {
        /// Scenario to project
        #[arg(long)]
        scenario: String,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Pricing scenarios side by side with profit margins
    #[command(after_help = "\
Examples:
  selemo compare
  selemo compare --format csv")]
    Compare {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Cost-category breakdown with budget shares
    Costs {
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Output file (omit for stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Scenario, project, and headline summaries
    #[command(after_help = "\
Examples:
  selemo summary --scenario Inframat
  selemo summary --scenario Inframat --json")]
    Summary {
        /// Scenario to summarize
        #[arg(long)]
        scenario: String,

        /// Output JSON instead of the human panel
        #[arg(long)]
        json: bool,
    },

    /// Full projection for one scenario (all series + summaries)
    #[command(after_help = "\
Examples:
  selemo run --scenario Inframat --json
  selemo run --scenario Inframat --output projection.json")]
    Run {
        /// Scenario to project
        #[arg(long)]
        scenario: String,

        /// Output JSON to stdout instead of the summary line only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Parse and validate a dataset without running
    #[command(after_help = "\
Examples:
  selemo validate
  selemo validate --dataset custom.toml")]
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config = dataset::load(cli.dataset.as_deref())?;

    match cli.command {
        Commands::Scenarios { format, output } => cmd_scenarios(&config, format, output.as_deref()),
        Commands::Extraction { scenario, format, output } => {
            cmd_extraction(&config, &scenario, format, output.as_deref())
        }
        Commands::Cashflow { scenario, format, output } => {
            cmd_cashflow(&config, &scenario, format, output.as_deref())
        }
        Commands::Compare { format, output } => cmd_compare(&config, format, output.as_deref()),
        Commands::Costs { format, output } => cmd_costs(&config, format, output.as_deref()),
        Commands::Summary { scenario, json } => cmd_summary(&config, &scenario, json),
        Commands::Run { scenario, json, output } => {
            cmd_run(&config, &scenario, json, output.as_deref())
        }
        Commands::Validate => cmd_validate(&config),
    }
}

fn resolve_scenario<'a>(
    config: &'a ProjectionConfig,
    name: &str,
) -> Result<&'a PricingScenario, CliError> {
    config.scenario(name).ok_or_else(|| CliError {
        code: EXIT_UNKNOWN_SCENARIO,
        message: format!("unknown scenario: '{name}'"),
        hint: Some("run `selemo scenarios` to list the dataset's scenarios".into()),
    })
}

fn emit_grid(
    format: Format,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let content = match format {
        Format::Csv => output::render_csv(&headers, &rows)?,
        _ => output::render_table(&headers, &rows),
    };
    output::emit(&content, output)
}

// ============================================================================
// scenarios
// ============================================================================

fn cmd_scenarios(
    config: &ProjectionConfig,
    format: Format,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    if format == Format::Json {
        return output::emit(&output::to_json_pretty(&config.scenarios)?, output_file);
    }

    let pretty = format == Format::Table;
    let headers = ["Scenario", "Price/Unit", "Total Revenue", "Volume (m3)", "Cycles"]
        .map(String::from)
        .to_vec();
    let rows = config
        .scenarios
        .iter()
        .map(|s| {
            if pretty {
                vec![
                    s.name.clone(),
                    output::format_amount(s.price_per_unit),
                    output::format_amount(s.total_revenue),
                    output::format_volume(s.annual_extraction),
                    s.extraction_cycles.to_string(),
                ]
            } else {
                vec![
                    s.name.clone(),
                    s.price_per_unit.to_string(),
                    s.total_revenue.to_string(),
                    s.annual_extraction.to_string(),
                    s.extraction_cycles.to_string(),
                ]
            }
        })
        .collect();
    emit_grid(format, headers, rows, output_file)
}

// ============================================================================
// extraction
// ============================================================================

fn cmd_extraction(
    config: &ProjectionConfig,
    scenario_name: &str,
    format: Format,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let scenario = resolve_scenario(config, scenario_name)?;
    let series = monthly_extraction(scenario, config);

    if format == Format::Json {
        return output::emit(&output::to_json_pretty(&series)?, output_file);
    }

    let pretty = format == Format::Table;
    let mut headers = vec!["Month".to_string()];
    headers.extend(config.projects.iter().map(|p| p.name.clone()));
    headers.push("Total".to_string());

    let rows = series
        .iter()
        .map(|row| {
            let mut cells = vec![row.month.to_string()];
            for project in &config.projects {
                let volume = row.per_project[&project.name];
                cells.push(if pretty {
                    output::format_volume(volume)
                } else {
                    volume.to_string()
                });
            }
            cells.push(if pretty {
                output::format_volume(row.total)
            } else {
                row.total.to_string()
            });
            cells
        })
        .collect();
    emit_grid(format, headers, rows, output_file)
}

// ============================================================================
// cashflow
// ============================================================================

fn cmd_cashflow(
    config: &ProjectionConfig,
    scenario_name: &str,
    format: Format,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let scenario = resolve_scenario(config, scenario_name)?;
    let series = cash_flow(scenario, config);

    if format == Format::Json {
        return output::emit(&output::to_json_pretty(&series)?, output_file);
    }

    let pretty = format == Format::Table;
    let headers = ["Month", "Revenue", "Operational Cost", "Net Cash Flow", "Active"]
        .map(String::from)
        .to_vec();
    let rows = series
        .iter()
        .map(|row| {
            if pretty {
                vec![
                    row.month.to_string(),
                    output::format_amount(row.revenue),
                    output::format_amount(row.operational_cost),
                    output::format_amount(row.net_cash_flow),
                    if row.active { "yes" } else { "no" }.to_string(),
                ]
            } else {
                vec![
                    row.month.to_string(),
                    row.revenue.to_string(),
                    row.operational_cost.to_string(),
                    row.net_cash_flow.to_string(),
                    row.active.to_string(),
                ]
            }
        })
        .collect();
    emit_grid(format, headers, rows, output_file)
}

// ============================================================================
// compare
// ============================================================================

fn cmd_compare(
    config: &ProjectionConfig,
    format: Format,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let rows = price_comparison(&config.scenarios, config);

    if format == Format::Json {
        return output::emit(&output::to_json_pretty(&rows)?, output_file);
    }

    let pretty = format == Format::Table;
    let headers = ["Scenario", "Price/Unit", "Total Revenue", "Margin %"]
        .map(String::from)
        .to_vec();
    let cells = rows
        .iter()
        .map(|row| {
            if pretty {
                vec![
                    row.name.clone(),
                    output::format_amount(row.price_per_unit),
                    output::format_amount(row.total_revenue),
                    output::format_margin(row.profit_margin_pct),
                ]
            } else {
                vec![
                    row.name.clone(),
                    row.price_per_unit.to_string(),
                    row.total_revenue.to_string(),
                    // Empty cell keeps the undefined margin out of numeric columns.
                    row.profit_margin_pct.map(|m| m.to_string()).unwrap_or_default(),
                ]
            }
        })
        .collect();
    emit_grid(format, headers, cells, output_file)
}

// ============================================================================
// costs
// ============================================================================

fn cmd_costs(
    config: &ProjectionConfig,
    format: Format,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let shares = summary::cost_breakdown(config);

    if format == Format::Json {
        return output::emit(&output::to_json_pretty(&shares)?, output_file);
    }

    let pretty = format == Format::Table;
    let headers = ["Category", "Amount (R m)", "Share %"].map(String::from).to_vec();
    let rows = shares
        .iter()
        .map(|share| {
            vec![
                share.name.clone(),
                share.amount_millions.to_string(),
                if pretty {
                    format!("{:.2}%", share.share_pct)
                } else {
                    share.share_pct.to_string()
                },
            ]
        })
        .collect();
    emit_grid(format, headers, rows, output_file)
}

// ============================================================================
// summary
// ============================================================================

fn cmd_summary(config: &ProjectionConfig, scenario_name: &str, json: bool) -> Result<(), CliError> {
    let scenario = resolve_scenario(config, scenario_name)?;
    let scenario_summary = summary::scenario_summary(scenario, config);
    let projects = summary::project_summaries(config);
    let headline = summary::headline(config)
        .ok_or_else(|| CliError::runtime("dataset has no scenarios"))?;

    if json {
        let value = serde_json::json!({
            "headline": headline,
            "scenario": scenario_summary,
            "projects": projects,
        });
        println!("{}", output::to_json_pretty(&value)?);
        return Ok(());
    }

    println!("{} — {}", config.name, scenario_summary.name);
    println!("  Price per Unit:    {}", output::format_amount(scenario_summary.price_per_unit));
    println!("  Total Revenue:     {}", output::format_amount(scenario_summary.total_revenue));
    println!("  Profit Margin:     {}", output::format_margin(scenario_summary.profit_margin_pct));
    println!("  Net Return:        {}", output::format_amount(scenario_summary.net_return));
    println!("  Extraction Cycles: {}", scenario_summary.extraction_cycles);

    for project in &projects {
        println!();
        println!("{}", project.name);
        println!("  Duration:          {} months", project.duration_months);
        println!("  Operational Cost:  {}", output::format_amount(project.operational_cost));
        println!("  Monthly Cost:      {}", output::format_amount(project.monthly_cost));
    }

    println!();
    println!("Headline");
    println!(
        "  Top Scenario:      {} ({})",
        headline.top_scenario,
        output::format_amount(headline.top_revenue)
    );
    println!("  Total Volume:      {} m3", output::format_volume(headline.total_extraction_volume));
    println!("  Total Cost:        {}", output::format_amount(headline.total_operational_cost));

    Ok(())
}

// ============================================================================
// run
// ============================================================================

fn cmd_run(
    config: &ProjectionConfig,
    scenario_name: &str,
    json_output: bool,
    output_file: Option<&Path>,
) -> Result<(), CliError> {
    let result = run(config, scenario_name).map_err(|e| match e {
        ProjectionError::UnknownScenario(name) => CliError {
            code: EXIT_UNKNOWN_SCENARIO,
            message: format!("unknown scenario: '{name}'"),
            hint: Some("run `selemo scenarios` to list the dataset's scenarios".into()),
        },
        other => CliError::runtime(other.to_string()),
    })?;

    let json_str = output::to_json_pretty(&result)?;

    if let Some(path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &result.scenario_summary;
    eprintln!(
        "{}: {} — {} months, {} projects",
        result.meta.dataset_name,
        result.meta.scenario,
        result.extraction.len(),
        result.project_summaries.len(),
    );
    eprintln!(
        "revenue {}, cost {}, net {}, margin {}",
        output::format_amount(s.total_revenue),
        output::format_amount(config.total_operational_cost),
        output::format_amount(s.net_return),
        output::format_margin(s.profit_margin_pct),
    );

    Ok(())
}

// ============================================================================
// validate
// ============================================================================

fn cmd_validate(config: &ProjectionConfig) -> Result<(), CliError> {
    // Loading already parsed and validated; report what we ended up with.
    println!(
        "dataset OK: {} ({} scenarios, {} projects, horizon {} months)",
        config.name,
        config.scenarios.len(),
        config.projects.len(),
        config.horizon_months,
    );
    Ok(())
}
