use crate::analysis::AnalysisReport;
use crate::data::model::VehicleDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering. One instance per
/// session; every view reads from here, nothing is global.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<VehicleDataset>,

    /// All derived views, recomputed once per loaded file.
    pub report: Option<AnalysisReport>,

    /// File name of the loaded dataset, for the header line.
    pub source_name: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            report: None,
            source_name: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, replacing the previous session's
    /// table and derived views wholesale.
    pub fn set_dataset(&mut self, source_name: String, dataset: VehicleDataset) {
        self.report = Some(AnalysisReport::compute(&dataset));
        self.dataset = Some(dataset);
        self.source_name = Some(source_name);
        self.status_message = None;
        self.loading = false;
    }
}
