//! VitalView - grouped surgical vital-sign curves
//!
//! Desktop viewer that loads a vitals CSV and plots one signal as
//! mean curves per surgery type or emergency status.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use std::path::PathBuf;

use vitalview::app::VitalViewApp;

#[derive(Parser, Debug)]
#[command(author, version, about = "Surgical vitals viewer", long_about = None)]
struct Cli {
    /// Dataset to open (defaults to the last one used)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    dataset: Option<PathBuf>,
}

/// Set the macOS application name for the dock
#[cfg(target_os = "macos")]
fn set_macos_app_name() {
    use objc2::{class, msg_send};
    use objc2_foundation::NSString;

    unsafe {
        let app_name = NSString::from_str("VitalView");
        let process_info_class = class!(NSProcessInfo);
        let process_info: *mut objc2::runtime::AnyObject =
            msg_send![process_info_class, processInfo];
        let _: () = msg_send![process_info, setProcessName: &*app_name];
    }
}

#[cfg(not(target_os = "macos"))]
fn set_macos_app_name() {}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();

    // Set macOS app name before anything else
    set_macos_app_name();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 560.0])
            .with_min_inner_size([1300.0, 520.0])
            .with_title("VitalView - Surgical Vitals")
            .with_app_id("VitalView")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "VitalView",
        native_options,
        Box::new(move |cc| Ok(Box::new(VitalViewApp::new(cc, cli.dataset)))),
    )
}
