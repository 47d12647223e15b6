// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sseqed-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sseqed and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sseqed CLI entrypoint.
//!
//! By default this runs the interactive chart editor. `--export` prints the TikZ export of the
//! configured chart to stdout instead.

use std::error::Error;
use std::fs::File;
use std::sync::Mutex;

use sseqed::config::{CellConfig, EditorConfig};
use sseqed::export::MAX_EXTRA_RANGE;
use sseqed::model::{fixtures::demo_grid, Orientation};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--demo] [--page <r>] [--cohomological] [--log-file <file>]\n  {program} --export [--config <file>] [--demo] [--page <r>] [--cohomological] [--extra-range <n>]\n\nThe config file is JSON; every field is optional and flags override it.\n--demo adds the built-in demo cells to the chart.\n--export prints the TikZ picture to stdout and exits; --extra-range pads it by at most {MAX_EXTRA_RANGE} cells.\n\nLogs are filtered by RUST_LOG and written to --log-file, or to stderr with --export."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    demo: bool,
    export: bool,
    page: Option<i32>,
    cohomological: bool,
    extra_range: Option<u32>,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--export" => {
                if options.export {
                    return Err(());
                }
                options.export = true;
            }
            "--page" => {
                if options.page.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.page = Some(raw.parse().map_err(|_| ())?);
            }
            "--cohomological" => {
                if options.cohomological {
                    return Err(());
                }
                options.cohomological = true;
            }
            "--extra-range" => {
                if options.extra_range.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let extra_range = raw.parse::<u32>().map_err(|_| ())?;
                if extra_range > MAX_EXTRA_RANGE {
                    return Err(());
                }
                options.extra_range = Some(extra_range);
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    if options.extra_range.is_some() && !options.export {
        return Err(());
    }

    Ok(options)
}

/// Folds the command line into the loaded config.
fn apply_overrides(config: &mut EditorConfig, options: &CliOptions) {
    if let Some(page) = options.page {
        config.page = page;
    }
    if options.cohomological {
        config.orientation = Orientation::Cohomological;
    }
    if let Some(extra_range) = options.extra_range {
        config.export.extra_range = extra_range;
    }
    if options.demo {
        config.cells.extend(demo_grid().iter().map(|(at, label)| CellConfig {
            p: at.x,
            q: at.y,
            label: label.clone(),
        }));
    }
}

/// Logs go to `--log-file` when given. Without one, only export mode logs (to stderr); the TUI
/// owns the terminal.
fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = match (&options.log_file, options.export) {
        (Some(path), _) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        (None, true) => builder.with_writer(std::io::stderr).try_init(),
        (None, false) => Ok(()),
    };
    installed.map_err(|err| err as Box<dyn Error>)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "sseqed".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(&options)?;

        let mut config = match &options.config {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        apply_overrides(&mut config, &options);

        let export = config.export.clone();
        let export_options = config.export_options();
        let state = config.into_state()?;

        if options.export {
            print!("{}", state.export(&export_options));
            return Ok(());
        }

        sseqed::tui::run(state, export)
    })();

    if let Err(err) = result {
        eprintln!("sseqed: {err}");
        std::process::exit(1);
    }
}
