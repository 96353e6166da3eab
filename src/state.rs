use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use eframe::egui::Color32;

use crate::data::loader;
use crate::data::model::{MeasurementMatrix, REQUIRED_COLUMNS, SubjectTable};
use crate::data::stats::{BoxStats, HistogramBin, WeightSummary, histogram};
use crate::data::validate;

/// Fixed bin count for the weight histograms.
pub const HISTOGRAM_BINS: usize = 30;

/// Weight display range in kilograms. Clips the view only, never the data.
pub const WEIGHT_VIEW_RANGE: (f64, f64) = (40.0, 150.0);

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// The two subject groups compared side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Female,
    Male,
}

impl Group {
    /// Lowercase label used in diagnostics and errors.
    pub fn label(self) -> &'static str {
        match self {
            Group::Female => "female",
            Group::Male => "male",
        }
    }

    /// Plural display name used in figure legends.
    pub fn display_name(self) -> &'static str {
        match self {
            Group::Female => "Females",
            Group::Male => "Males",
        }
    }

    /// Fixed group colour (pink / light blue), 70% opacity like the figures
    /// this viewer replaces.
    pub fn color(self) -> Color32 {
        match self {
            Group::Female => Color32::from_rgba_unmultiplied(255, 192, 203, 180),
            Group::Male => Color32::from_rgba_unmultiplied(173, 216, 230, 180),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-group derived data
// ---------------------------------------------------------------------------

/// Everything derived from one group's dataset, computed once at load time.
#[derive(Debug, Clone)]
pub struct GroupData {
    pub group: Group,
    pub source: PathBuf,
    pub table: SubjectTable,
    pub matrix: MeasurementMatrix,
    pub weights: Vec<f64>,
    pub summary: WeightSummary,
    pub box_stats: BoxStats,
    pub histogram: Vec<HistogramBin>,
}

impl GroupData {
    /// Derive matrix, weight column, and statistics from a validated table.
    pub fn from_table(group: Group, source: &Path, table: SubjectTable) -> Result<Self> {
        let matrix = table.project(&REQUIRED_COLUMNS)?;
        let weights = matrix.weights();
        let summary = WeightSummary::compute(&weights)
            .with_context(|| format!("{} dataset has no usable rows", group.label()))?;
        let box_stats = BoxStats::compute(&weights)
            .with_context(|| format!("{} dataset has no usable rows", group.label()))?;
        let bins = histogram(&weights, HISTOGRAM_BINS);

        Ok(GroupData {
            group,
            source: source.to_path_buf(),
            table,
            matrix,
            weights,
            summary,
            box_stats,
            histogram: bins,
        })
    }

    /// Load, validate, and derive in one step (interactive open).
    pub fn load(group: Group, path: &Path) -> Result<Self> {
        let table = loader::load_file(path, group.label())?;
        validate::validate(&[&table])?;
        Self::from_table(group, path, table)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which figure the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FigureKind {
    #[default]
    Histograms,
    BoxPlot,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Female group data (None until loaded).
    pub female: Option<GroupData>,
    /// Male group data (None until loaded).
    pub male: Option<GroupData>,
    /// Active figure in the central panel.
    pub figure: FigureKind,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Store freshly derived group data in its slot.
    pub fn set_group(&mut self, data: GroupData) {
        match data.group {
            Group::Female => self.female = Some(data),
            Group::Male => self.male = Some(data),
        }
    }

    /// Loaded groups in fixed figure order: females first, then males.
    pub fn loaded_groups(&self) -> Vec<&GroupData> {
        [self.female.as_ref(), self.male.as_ref()]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Load one group's dataset interactively; failures land in the status
    /// bar instead of aborting the viewer.
    pub fn open_group(&mut self, group: Group, path: &Path) {
        match GroupData::load(group, path) {
            Ok(data) => {
                log::info!(
                    "Loaded {} {} subjects from {} ({} malformed rows skipped)",
                    data.table.len(),
                    group.label(),
                    path.display(),
                    data.table.dropped_rows
                );
                self.status_message = None;
                self.set_group(data);
            }
            Err(e) => {
                log::error!("Failed to load {} dataset: {e:#}", group.label());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
