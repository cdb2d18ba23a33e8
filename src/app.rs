//! Main application state and eframe::App implementation.
//!
//! The dataset is loaded once on a background thread; everything after that
//! (aggregation, chart model, drawing) runs on the UI thread inside
//! [`eframe::App::update`].

use eframe::egui;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use crate::controller::{ControlEvent, Controller};
use crate::dataset::Dataset;
use crate::settings::UserSettings;
use crate::state::{
    LoadResult, LoadedDataset, LoadingState, ToastType, DEFAULT_DATASET_PATH, SUPPORTED_EXTENSIONS,
};

/// Main application state
pub struct VitalViewApp {
    /// Selection state, aggregation and chart model for the loaded dataset
    pub(crate) controller: Option<Controller>,
    /// Path of the dataset currently shown
    pub(crate) dataset_path: Option<PathBuf>,
    /// Display name of the dataset currently shown
    pub(crate) dataset_name: Option<String>,
    /// Channel for receiving the loaded dataset from the background thread
    pub(crate) load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub(crate) loading_state: LoadingState,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, std::time::Instant, ToastType)>,
    /// Track dropped files to prevent duplicates
    pub(crate) last_drop_time: Option<std::time::Instant>,
    /// Persisted preferences
    pub(crate) user_settings: UserSettings,
    // === View Options ===
    /// Draw the mean ± sd band behind each curve
    pub(crate) show_spread: bool,
    /// When true, use colorblind-friendly color palette
    pub(crate) color_blind_mode: bool,
}

impl Default for VitalViewApp {
    fn default() -> Self {
        Self {
            controller: None,
            dataset_path: None,
            dataset_name: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            toast_message: None,
            last_drop_time: None,
            user_settings: UserSettings::default(),
            show_spread: false,
            color_blind_mode: false,
        }
    }
}

impl VitalViewApp {
    /// Create the app and start loading `dataset`, the last dataset used, or
    /// the default dataset path, in that order of preference
    pub fn new(cc: &eframe::CreationContext<'_>, dataset: Option<PathBuf>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let user_settings = UserSettings::load();
        let mut app = Self {
            show_spread: user_settings.show_spread,
            color_blind_mode: user_settings.color_blind_mode,
            user_settings,
            ..Self::default()
        };

        let path = dataset
            .or_else(|| {
                app.user_settings
                    .last_dataset
                    .clone()
                    .filter(|p| p.exists())
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_PATH));
        app.start_loading_file(path);

        app
    }

    /// Start loading a dataset in the background
    pub fn start_loading_file(&mut self, path: PathBuf) {
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        tracing::info!("Loading dataset {}", path.display());
        self.loading_state = LoadingState::Loading(filename);

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        // Spawn background thread for loading
        thread::spawn(move || {
            let result = Self::load_file_sync(&path);
            let _ = sender.send(result);
        });
    }

    /// Synchronously load a dataset (runs in background thread)
    fn load_file_sync(path: &Path) -> LoadResult {
        match Dataset::load(path) {
            Ok(dataset) => {
                LoadResult::Success(Box::new(LoadedDataset::new(path.to_path_buf(), dataset)))
            }
            Err(e) => LoadResult::Error(format!("Failed to load {}: {}", path.display(), e)),
        }
    }

    /// Check for a completed background load
    pub(crate) fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.load_receiver = None;

        match result {
            LoadResult::Success(loaded) => {
                let loaded = *loaded;
                let preferred = if self.user_settings.last_dataset.as_ref() == Some(&loaded.path)
                {
                    self.user_settings.last_selection()
                } else {
                    None
                };

                let controller = Controller::with_selection(loaded.dataset, preferred);

                self.user_settings.last_dataset = Some(loaded.path.clone());
                self.user_settings.remember_selection(controller.selection());
                self.persist_settings();

                self.show_toast_success(&format!("Loaded {}", loaded.name));
                self.controller = Some(controller);
                self.dataset_path = Some(loaded.path);
                self.dataset_name = Some(loaded.name);
                self.loading_state = LoadingState::Idle;
            }
            LoadResult::Error(e) => {
                tracing::error!("{}", e);
                self.controller = None;
                self.dataset_path = None;
                self.dataset_name = None;
                self.show_toast_error(&e);
                self.loading_state = LoadingState::Failed(e);
            }
        }
    }

    /// Forward a control change to the controller and remember the result
    pub(crate) fn apply_control_event(&mut self, event: ControlEvent) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        if controller.dispatch(event) {
            let selection = controller.selection().clone();
            self.user_settings.remember_selection(&selection);
            self.persist_settings();
        }
    }

    /// Store view options and save settings to disk
    pub(crate) fn update_view_settings(&mut self) {
        self.user_settings.show_spread = self.show_spread;
        self.user_settings.color_blind_mode = self.color_blind_mode;
        self.persist_settings();
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.user_settings.save() {
            tracing::warn!("{}", e);
        }
    }

    /// Show an informational toast
    pub fn show_toast(&mut self, message: &str) {
        self.toast_message = Some((
            message.to_string(),
            std::time::Instant::now(),
            ToastType::Info,
        ));
    }

    /// Show a success toast
    pub fn show_toast_success(&mut self, message: &str) {
        self.toast_message = Some((
            message.to_string(),
            std::time::Instant::now(),
            ToastType::Success,
        ));
    }

    /// Show an error toast
    pub fn show_toast_error(&mut self, message: &str) {
        self.toast_message = Some((
            message.to_string(),
            std::time::Instant::now(),
            ToastType::Error,
        ));
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        // Debounce file drops (1 second window)
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 1 {
                return;
            }
        }

        let dropped: Option<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .next()
        });

        let Some(path) = dropped else {
            return;
        };
        self.last_drop_time = Some(std::time::Instant::now());

        let supported = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()));
        if supported {
            self.start_loading_file(path);
        } else {
            self.show_toast("Only CSV datasets can be opened");
        }
    }

    /// Message shown in place of the chart when no dataset is available
    fn render_status(&self, ui: &mut egui::Ui) {
        let (text, color) = match &self.loading_state {
            LoadingState::Loading(name) => (format!("Loading {}…", name), egui::Color32::GRAY),
            LoadingState::Failed(e) => (e.clone(), egui::Color32::from_rgb(214, 39, 40)),
            LoadingState::Idle => (
                "Open a vitals CSV file (File → Open) or drop one here".to_string(),
                egui::Color32::GRAY,
            ),
        };

        ui.centered_and_justified(|ui| {
            if matches!(self.loading_state, LoadingState::Loading(_)) {
                ui.spinner();
            }
            ui.label(egui::RichText::new(text).size(18.0).color(color));
        });
    }
}

impl eframe::App for VitalViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_loading_complete();

        // Handle file drops
        self.handle_dropped_files(ctx);

        // Request repaint while loading (for spinner animation)
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint();
        }

        // Toast notifications
        self.render_toast(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.controller.is_none() {
                self.render_status(ui);
                return;
            }

            ui.add_space(10.0);
            self.render_controls(ui);
            ui.add_space(10.0);
            ui.separator();

            ui.horizontal_top(|ui| {
                self.render_chart(ui);
                ui.add_space(16.0);
                self.render_legend(ui);
            });
        });
    }
}
