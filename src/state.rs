use std::path::{Path, PathBuf};

use crate::color::{SeriesStyle, series_styles};
use crate::data::loader::load_file;
use crate::data::model::{Columns, Dataset, FiniteSizeErrors, Observable};
use crate::export;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// File the dataset was read from.
    pub input: PathBuf,

    /// Target of "Export PDF".
    pub output: PathBuf,

    pub columns: Columns,

    pub dataset: Dataset,

    /// Cached from `dataset`.
    pub errors: FiniteSizeErrors,

    pub styles: Vec<SeriesStyle>,

    /// Per-series visibility, parallel to `styles`.
    pub visible: Vec<bool>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(input: PathBuf, output: PathBuf, columns: Columns, dataset: Dataset) -> Self {
        let styles = series_styles();
        let visible = vec![true; styles.len()];
        let errors = dataset.finite_size_errors();
        Self {
            input,
            output,
            columns,
            dataset,
            errors,
            styles,
            visible,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset.
    pub fn set_dataset(&mut self, input: PathBuf, dataset: Dataset) {
        self.errors = dataset.finite_size_errors();
        self.dataset = dataset;
        self.input = input;
        self.status_message = None;
    }

    /// Load `path` and replace the current dataset. On failure the old data stays.
    pub fn load(&mut self, path: &Path) {
        match load_file(path, self.columns) {
            Ok(dataset) => self.set_dataset(path.to_path_buf(), dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current input file.
    pub fn reload(&mut self) {
        let path = self.input.clone();
        self.load(&path);
    }

    /// Write the PDF for the current data.
    pub fn export(&mut self) {
        match export::write_pdf(&self.errors, &self.styles, &self.output) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", self.output.display()));
            }
            Err(e) => {
                log::error!("Failed to export plot: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn is_visible(&self, observable: Observable) -> bool {
        self.styles
            .iter()
            .zip(&self.visible)
            .any(|(style, &shown)| shown && style.observable == observable)
    }

    /// Styles of the series currently switched on.
    pub fn visible_styles(&self) -> impl Iterator<Item = &SeriesStyle> {
        self.styles
            .iter()
            .zip(&self.visible)
            .filter(|(_, shown)| **shown)
            .map(|(style, _)| style)
    }
}
