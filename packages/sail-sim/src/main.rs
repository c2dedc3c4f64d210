//! main.rs — sail-sim entry point
//!
//! Subcommands:
//!   generate       sample and label a training CSV (+ manifest)
//!   fit            fit a strategy to a CSV and score its controller
//!   score-optimal  score the model's own optimum (expected 0, 0)
//!   table          print the optimal trim table as CSV

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use sail_model::{coarse_error_v_opt, ModelVariant, OptimalController};
use sail_sim::config::FullConfig;
use sail_sim::dataset::{read_csv, write_csv};
use sail_sim::generator::{generate, GeneratorSettings};
use sail_sim::manifest::{check_dataset, DatasetManifest};
use sail_sim::pipeline::fit_and_score;
use sail_sim::report::Strategy;
use sail_sim::table::{trim_table, write_table};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sail-sim", about = "Sailing trim dataset generator and controller fitting")]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a labelled training CSV
    Generate {
        /// Number of rows
        #[arg(short, long)]
        length: Option<usize>,
        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output CSV
        #[arg(short, long)]
        file: Option<String>,
        /// Std deviation of Gaussian noise on boat speed (kt)
        #[arg(long)]
        noise: Option<f64>,
        #[arg(long, value_enum)]
        model: Option<VariantArg>,
        /// Share of rows sampled near the optimal trim (planing model)
        #[arg(long)]
        near_optimal: Option<f64>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Fit a controller strategy and score it against the optimum
    Fit {
        #[arg(long, value_enum)]
        strategy: StrategyArg,
        /// Training CSV
        #[arg(short, long)]
        file: Option<String>,
        #[arg(long, value_enum)]
        model: Option<VariantArg>,
        /// Write the JSON report here
        #[arg(long)]
        report: Option<String>,
    },
    /// Score the ground-truth optimal controller
    ScoreOptimal {
        #[arg(long, value_enum)]
        model: Option<VariantArg>,
    },
    /// Print the optimal trim table as CSV
    Table {
        #[arg(long, value_enum)]
        model: Option<VariantArg>,
        #[arg(long)]
        speed_step: Option<u32>,
        #[arg(long)]
        dir_step: Option<u32>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    Base,
    Planing,
}

impl From<VariantArg> for ModelVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Base => ModelVariant::Base,
            VariantArg::Planing => ModelVariant::Planing,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    /// Polynomial regression + grid search
    Linear,
    /// Speed-weighted nearest neighbours
    Knn,
    /// Random forest + grid search
    Forest,
}

impl From<StrategyArg> for Strategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::Linear => Strategy::Linear,
            StrategyArg::Knn => Strategy::Knn,
            StrategyArg::Forest => Strategy::Forest,
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sail_sim=info,sail_model=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = FullConfig::load(&args.config).context("loading config")?;

    match args.command {
        Command::Generate { length, seed, file, noise, model, near_optimal, yes } => {
            let mut gen_cfg = cfg.generator.clone();
            if let Some(v) = length { gen_cfg.length = v; }
            if let Some(v) = seed { gen_cfg.seed = v; }
            if let Some(v) = file { gen_cfg.file = v; }
            if let Some(v) = noise { gen_cfg.noise = v; }
            if let Some(v) = near_optimal { gen_cfg.near_optimal_fraction = v; }
            let boat = cfg.model.build(model.map(Into::into));

            if !yes && !confirm(&format!(
                "Generate {} rows ({} model) into {}?",
                gen_cfg.length,
                boat.variant(),
                gen_cfg.file
            ))? {
                info!("Aborted");
                return Ok(());
            }

            let settings = GeneratorSettings::from(&gen_cfg);
            let generation = generate(&boat, &settings).context("generating rows")?;
            let sha256 = write_csv(&gen_cfg.file, &generation.rows).context("writing dataset")?;

            let manifest = DatasetManifest {
                file: gen_cfg.file.clone(),
                rows: generation.rows.len(),
                seed: gen_cfg.seed,
                noise: gen_cfg.noise,
                variant: boat.variant(),
                near_optimal_rows: generation.near_optimal_rows,
                sha256,
                generated_at: Utc::now(),
                generator_version: env!("CARGO_PKG_VERSION").to_string(),
            };
            manifest.write().context("writing manifest")?;
        }

        Command::Fit { strategy, file, model, report } => {
            let strategy = Strategy::from(strategy);
            let file = file.unwrap_or_else(|| cfg.generator.file.clone());
            let boat = cfg.model.build(model.map(Into::into));

            if let Some(manifest) = check_dataset(&file) {
                if manifest.variant != boat.variant() {
                    warn!(
                        "⚠️ {file} was generated with the {} model, scoring against {}",
                        manifest.variant,
                        boat.variant()
                    );
                }
            }

            let rows = read_csv(&file).with_context(|| format!("reading {file}"))?;
            let fit_report = fit_and_score(strategy, &rows, &file, &boat, &cfg)
                .with_context(|| format!("fitting {strategy}"))?;
            fit_report.log();
            if let Some(path) = report {
                fit_report.write(&path).context("writing report")?;
            }
        }

        Command::ScoreOptimal { model } => {
            let boat = cfg.model.build(model.map(Into::into));
            let summary = coarse_error_v_opt(&boat, &OptimalController::new(&boat))?;
            info!(
                "🏁 optimal controller ({} model, {} points): MSE {}, mean abs error {}",
                boat.variant(),
                summary.samples,
                summary.mse,
                summary.mean_abs_error
            );
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Table { model, speed_step, dir_step } => {
            let boat = cfg.model.build(model.map(Into::into));
            let rows = trim_table(
                &boat,
                &OptimalController::new(&boat),
                speed_step.unwrap_or(cfg.table.speed_step),
                dir_step.unwrap_or(cfg.table.dir_step),
            )?;
            let max = rows.iter().map(|r| r.boat_speed).fold(0.0, f64::max);
            info!("📋 {} table rows, top speed {max:.2} kt", rows.len());

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_table(&mut out, &rows).context("writing table")?;
        }
    }

    Ok(())
}

/// `[y/N]` prompt on stdin. Refuses to guess when stdin is not a terminal.
fn confirm(question: &str) -> anyhow::Result<bool> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        bail!("stdin is not a terminal; pass --yes to generate without confirmation");
    }

    eprint!("{question} [y/N]: ");
    std::io::stderr().flush().context("flushing prompt")?;
    let mut answer = String::new();
    stdin.lock().read_line(&mut answer).context("reading confirmation")?;
    Ok(answer_is_yes(&answer))
}

/// Anything but an explicit yes aborts, an empty answer included
fn answer_is_yes(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
}
