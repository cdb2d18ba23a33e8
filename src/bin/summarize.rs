//! Headless aggregation of a vitals dataset.
//!
//! Writes the per-group bucket summary for one signal as CSV and can also
//! render the chart to PNG, without opening a window.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;

use vitalview::controller::{ControlEvent, Controller};
use vitalview::controls::GroupField;
use vitalview::dataset::Dataset;
use vitalview::export::{export_png, write_summary, write_summary_file, ImageOptions};

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize a surgical vitals dataset", long_about = None)]
struct Cli {
    /// Vitals CSV to read
    #[arg(value_hint = clap::ValueHint::FilePath)]
    dataset: PathBuf,

    /// Signal to aggregate (case-insensitive; defaults to "map" or the first signal)
    #[arg(short, long)]
    signal: Option<String>,

    /// Grouping dimension
    #[arg(short, long, value_enum, default_value_t = GroupArg::Emop)]
    group: GroupArg,

    /// Output CSV path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Also render the chart to this PNG file
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    png: Option<PathBuf>,

    /// Draw the ±sd band in the PNG
    #[arg(long)]
    spread: bool,

    /// List the signals in the dataset and exit
    #[arg(long)]
    list_signals: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum GroupArg {
    Optype,
    Emop,
}

impl From<GroupArg> for GroupField {
    fn from(arg: GroupArg) -> Self {
        match arg {
            GroupArg::Optype => GroupField::OpType,
            GroupArg::Emop => GroupField::Emop,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean CSV
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    let dataset = Dataset::load(&cli.dataset)
        .with_context(|| format!("failed to load {}", cli.dataset.display()))?;
    let mut controller = Controller::new(dataset);

    if cli.list_signals {
        for signal in &controller.options().signals {
            println!("{}", signal);
        }
        return Ok(());
    }

    if let Some(signal) = &cli.signal {
        let signal = signal.to_lowercase();
        if !controller.options().has_signal(&signal) {
            bail!(
                "signal '{}' not found; available: {}",
                signal,
                controller.options().signals.join(", ")
            );
        }
        controller.dispatch(ControlEvent::SignalChanged(signal));
    }
    controller.dispatch(ControlEvent::GroupChanged(cli.group.into()));

    let selection = controller.selection();
    tracing::info!(
        "Summarizing {} by {} over {} observations: {} series",
        selection.signal,
        selection.group.id(),
        controller.dataset().len(),
        controller.series().len()
    );

    if cli.output.as_os_str() == "-" {
        write_summary(controller.series(), io::stdout().lock())?;
    } else {
        write_summary_file(controller.series(), &cli.output)?;
    }

    if let Some(png) = &cli.png {
        let options = ImageOptions {
            color_blind_mode: false,
            show_spread: cli.spread,
        };
        export_png(controller.model(), options, png)?;
    }

    Ok(())
}
