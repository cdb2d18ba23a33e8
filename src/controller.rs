//! Selection state and the recompute-on-change transition.
//!
//! The controller owns the dataset, the control options and the renderer.
//! Every control change arrives as a [`ControlEvent`]; if it changes the
//! selection, aggregation and rendering run again synchronously before the
//! call returns.

use crate::aggregate::{aggregate, Series};
use crate::chart::{ChartModel, Renderer};
use crate::controls::{ControlOptions, GroupField, Selection, DEFAULT_GROUP, DEFAULT_SIGNAL};
use crate::dataset::Dataset;

/// A change reported by one of the two selection controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    SignalChanged(String),
    GroupChanged(GroupField),
}

/// Drives aggregation and rendering from the current selection
pub struct Controller {
    dataset: Dataset,
    options: ControlOptions,
    selection: Selection,
    renderer: Renderer,
    series: Vec<Series>,
    model: ChartModel,
}

impl Controller {
    /// Set up controls for a dataset and draw the default selection
    pub fn new(dataset: Dataset) -> Self {
        Self::with_selection(dataset, None)
    }

    /// Like [`Controller::new`], but start from `preferred` when its signal
    /// exists in the dataset
    pub fn with_selection(dataset: Dataset, preferred: Option<Selection>) -> Self {
        let options = ControlOptions::from_dataset(&dataset);

        let selection = match preferred {
            Some(sel) if options.has_signal(&sel.signal) => sel,
            _ => Selection {
                signal: initial_signal(&options),
                group: DEFAULT_GROUP,
            },
        };

        tracing::info!(
            "Showing {} signals, initial selection {} by {}",
            options.signals.len(),
            selection.signal,
            selection.group.id()
        );

        let mut controller = Self {
            dataset,
            options,
            selection,
            renderer: Renderer::new(),
            series: Vec::new(),
            model: ChartModel::default(),
        };
        controller.refresh();
        controller
    }

    /// Apply a control change. Returns true when the chart was recomputed.
    pub fn dispatch(&mut self, event: ControlEvent) -> bool {
        let next = match event {
            ControlEvent::SignalChanged(signal) => Selection {
                signal,
                ..self.selection.clone()
            },
            ControlEvent::GroupChanged(group) => Selection {
                group,
                ..self.selection.clone()
            },
        };

        if next == self.selection {
            return false;
        }

        self.selection = next;
        self.refresh();
        true
    }

    /// Re-run aggregation and rendering for the current selection
    fn refresh(&mut self) {
        self.series = aggregate(
            &self.dataset.rows,
            &self.selection.signal,
            self.selection.group,
        );
        self.model = self.renderer.render(&self.series);

        if self.series.is_empty() {
            tracing::warn!("No observations for signal '{}'", self.selection.signal);
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn options(&self) -> &ControlOptions {
        &self.options
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

/// The default signal when present, otherwise the first one available
fn initial_signal(options: &ControlOptions) -> String {
    if options.has_signal(DEFAULT_SIGNAL) {
        DEFAULT_SIGNAL.to_string()
    } else {
        options
            .signals
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_SIGNAL.to_string())
    }
}
