// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Visitlane CLI entrypoint.
//!
//! Renders a visit history (JSON array, or `{"visits": [...]}`) as SVG, Unicode text or
//! layout JSON, prints the click payload of a single visit, lints doctor names and date
//! order, and opens the interactive terminal viewer.

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use visitlane::config::VisitlaneConfig;
use visitlane::context::visit_context_schema;
use visitlane::geometry::{build_scene, Scene};
use visitlane::layout::{layout_visits, LayoutOptions, VisitLayout};
use visitlane::model::VisitRecord;
use visitlane::query::doctors::DEFAULT_MIN_RATIO;
use visitlane::query::{similar_doctor_names, visit_date_order, DateOrder, Similarity};
use visitlane::render::{render_scene_svg, render_timeline_unicode};
use visitlane::store::{load_visits, write_output, WriteDurability};
use visitlane::ui::InteractionState;

#[derive(Parser, Debug)]
#[command(name = "visitlane", version, about = "Lane graph of a patient's visit history")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the visit graph as SVG, Unicode text, or layout JSON
    Render(RenderArgs),
    /// Print the click payload (visit context JSON) of one visit
    Context(ContextArgs),
    /// Report doctor names that look alike and the date order of the input
    Lint(LintArgs),
    /// Print the JSON schema of the visit context payload
    Schema,
    /// Open the interactive terminal viewer
    Tui(TuiArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Svg,
    Text,
    Json,
}

#[derive(Args, Debug)]
struct ConfigArg {
    /// TOML config with [layout], [geometry] and [render] sections
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Visit history JSON file
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Write to a file instead of stdout (atomic replace)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// fsync the output file and its directory
    #[arg(long, requires = "output")]
    durable_writes: bool,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct ContextArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Visit id to select; the first row with this id wins
    #[arg(long = "visit")]
    visit_id: String,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Args, Debug)]
struct LintArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Fuzzy ratio (0..=1) at which two doctor names are reported
    #[arg(long, default_value_t = DEFAULT_MIN_RATIO, value_parser = parse_ratio)]
    min_ratio: f64,
}

#[derive(Args, Debug)]
struct TuiArgs {
    /// Visit history JSON file; the built-in demo history is used when omitted
    #[arg(value_hint = ValueHint::FilePath, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Use the built-in demo history
    #[arg(long)]
    demo: bool,

    #[command(flatten)]
    config: ConfigArg,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("no visit with id `{0}`")]
    UnknownVisit(String),
}

#[derive(Serialize)]
struct LayoutJson<'a> {
    layout: &'a VisitLayout,
    scene: &'a Scene,
}

fn parse_ratio(raw: &str) -> Result<f64, String> {
    let ratio: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(format!("`{raw}` is outside 0..=1"));
    }
    Ok(ratio)
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();

    if let Err(err) = run(cli) {
        eprintln!("visitlane: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Render(args) => handle_render(args),
        Command::Context(args) => handle_context(args),
        Command::Lint(args) => handle_lint(args),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&visit_context_schema())?);
            Ok(())
        }
        Command::Tui(args) => handle_tui(args),
    }
}

fn load_config(arg: &ConfigArg) -> Result<VisitlaneConfig, Box<dyn Error>> {
    Ok(VisitlaneConfig::load_optional(arg.config.as_deref())?)
}

fn handle_render(args: RenderArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    let visits = load_visits(&args.input)?;
    let layout = layout_visits(&visits, &config.layout_options()?);
    debug!(
        visits = visits.len(),
        tracks = layout.track_count(),
        format = ?args.format,
        "rendering visit graph"
    );

    let rendered = match args.format {
        OutputFormat::Svg => {
            let scene = build_scene(&visits, &layout, &config.geometry);
            render_scene_svg(&scene, &config.render)
        }
        OutputFormat::Text => render_timeline_unicode(&visits, &layout)?,
        OutputFormat::Json => {
            let scene = build_scene(&visits, &layout, &config.geometry);
            serde_json::to_string_pretty(&LayoutJson { layout: &layout, scene: &scene })?
        }
    };

    emit(rendered, args.output.as_deref(), args.durable_writes)
}

fn emit(mut rendered: String, output: Option<&Path>, durable: bool) -> Result<(), Box<dyn Error>> {
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    match output {
        Some(path) => {
            let durability =
                if durable { WriteDurability::Durable } else { WriteDurability::BestEffort };
            write_output(path, rendered.as_bytes(), durability)?;
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn handle_context(args: ContextArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    let visits = load_visits(&args.input)?;
    let row = find_visit_row(&visits, &args.visit_id)
        .ok_or_else(|| CliError::UnknownVisit(args.visit_id.clone()))?;

    let layout = layout_visits(&visits, &config.layout_options()?);
    let scene = build_scene(&visits, &layout, &config.geometry);
    let mut interaction = InteractionState::default();
    let context = interaction
        .select_row(&scene, &visits, row)
        .ok_or_else(|| CliError::UnknownVisit(args.visit_id.clone()))?;

    println!("{}", serde_json::to_string_pretty(&context)?);
    Ok(())
}

fn find_visit_row(visits: &[VisitRecord], visit_id: &str) -> Option<usize> {
    visits.iter().position(|visit| visit.visit_id().as_str() == visit_id)
}

fn handle_lint(args: LintArgs) -> Result<(), Box<dyn Error>> {
    let visits = load_visits(&args.input)?;
    let layout = layout_visits(&visits, &LayoutOptions::default());
    print!("{}", lint_report(&visits, &layout, args.min_ratio));
    Ok(())
}

fn lint_report(visits: &[VisitRecord], layout: &VisitLayout, min_ratio: f64) -> String {
    let mut out = format!("{} visits on {} tracks\n", visits.len(), layout.track_count());

    let order = match visit_date_order(visits) {
        DateOrder::Ascending => "ascending (oldest first)",
        DateOrder::Descending => "descending (most recent first)",
        DateOrder::Mixed => "mixed",
        DateOrder::Undetermined => "undetermined",
    };
    out.push_str(&format!("date order: {order}\n"));

    let pairs = similar_doctor_names(layout, min_ratio);
    if pairs.is_empty() {
        out.push_str("similar doctor names: none\n");
    }
    for pair in pairs {
        let kind = match pair.similarity {
            Similarity::Normalized => "same after normalization".to_owned(),
            Similarity::Fuzzy => format!("fuzzy ratio {:.2}", pair.ratio),
        };
        out.push_str(&format!(
            "similar doctor names: track {} \"{}\" and track {} \"{}\" ({kind})\n",
            pair.first_track, pair.first_name, pair.second_track, pair.second_name
        ));
    }

    out
}

fn handle_tui(args: TuiArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&args.config)?;
    match args.input {
        Some(path) if !args.demo => {
            let visits = load_visits(&path)?;
            visitlane::tui::run_with_visits(visits, &config)?;
        }
        _ => visitlane::tui::run(&config)?,
    }
    Ok(())
}
