mod app;
mod data;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use eframe::egui;

use app::RustyBmxApp;
use data::loader;
use data::model::SubjectTable;
use data::validate;
use state::{AppState, Group, GroupData};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Dataset locations, from positional arguments or environment variables.
struct Config {
    male: Option<PathBuf>,
    female: Option<PathBuf>,
}

impl Config {
    const USAGE: &'static str = "usage: rusty-bmx [<male-dataset> <female-dataset>]\n\
        paths may also be set via BMX_MALE_DATA / BMX_FEMALE_DATA";

    fn from_env_and_args() -> Result<Self> {
        let mut args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
        let from_env = |key: &str| std::env::var_os(key).map(PathBuf::from);

        match args.len() {
            0 => Ok(Config {
                male: from_env("BMX_MALE_DATA"),
                female: from_env("BMX_FEMALE_DATA"),
            }),
            2 => {
                let female = args.pop();
                let male = args.pop();
                Ok(Config { male, female })
            }
            _ => bail!("{}", Self::USAGE),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env_and_args()?;
    let mut state = AppState::default();

    match (&config.male, &config.female) {
        (Some(male), Some(female)) => run_pipeline(&mut state, male, female)?,
        (None, None) => {} // start empty, load via File → Open
        _ => bail!("male and female datasets must be supplied together\n{}", Config::USAGE),
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty BMX – Body Measurement Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyBmxApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

// ---------------------------------------------------------------------------
// One-shot batch pipeline
// ---------------------------------------------------------------------------

/// Load → validate → extract → summarize, with diagnostics on stdout.
///
/// Both tables are validated together before either is extracted; a missing
/// required column aborts the run here, before any figure or statistic.
fn run_pipeline(state: &mut AppState, male_path: &Path, female_path: &Path) -> Result<()> {
    let male_table = loader::load_file(male_path, Group::Male.label())
        .with_context(|| format!("loading male dataset from {}", male_path.display()))?;
    let female_table = loader::load_file(female_path, Group::Female.label())
        .with_context(|| format!("loading female dataset from {}", female_path.display()))?;

    report_table(&male_table);
    report_table(&female_table);

    validate::validate(&[&male_table, &female_table])?;

    let female = GroupData::from_table(Group::Female, female_path, female_table)?;
    let male = GroupData::from_table(Group::Male, male_path, male_table)?;

    println!("Female statistics: {}", female.summary);
    println!("Male statistics: {}", male.summary);

    state.set_group(female);
    state.set_group(male);
    Ok(())
}

/// Print the head and the column listings before/after label normalization.
fn report_table(table: &SubjectTable) {
    println!("{} dataset preview:\n{}", table.label, table.preview(5));
    println!("{} columns (before): {:?}", table.label, table.raw_columns);
    println!("{} columns (after):  {:?}", table.label, table.columns);
}
