use clap::Parser;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use itertools::Itertools;
use log::{debug, info, warn};
use notes_launcher_cli::cli_args::Args;
use notes_launcher_cli::file_selection::{self, FileChoice};
use notes_launcher_cli::presenter::ConsolePresenter;
use notes_launcher_core::error::{Error, Result};
use notes_launcher_core::file_types::FileCategory;
use notes_launcher_core::request::LaunchRequest;
use notes_launcher_core::runner::ProcessRunner;
use notes_launcher_core::worker::WorkerDefinition;
use notes_launcher_core::{config, file_handling};
use std::io::{stdout, Write};
use std::process::ExitCode;

/// Load the worker definition and apply command-line overrides
fn initialize_worker(args: &Args) -> Result<WorkerDefinition> {
    let config_path = config::get_config_path(&args.config_path);
    debug!("Config path: `{}`", config_path);

    let worker = file_handling::get_worker_definition(&config_path)?
        .with_overrides(args.interpreter.clone(), args.script.clone());
    worker.validate()?;

    Ok(worker)
}

/// Build the launch requests from the arguments, or from the file picker
fn collect_requests(args: &Args) -> Result<Vec<LaunchRequest>> {
    if !args.targets.is_empty() {
        return args
            .targets
            .iter()
            .map(|target| {
                if FileCategory::from_path(target).is_none() {
                    warn!(
                        "`{}` is not a media or transcript file, launching anyway",
                        target.display()
                    );
                }
                LaunchRequest::new(target.as_path())
            })
            .collect();
    }

    let choice = file_selection::select_target(&args.directory)?;

    let mut stdout = stdout();
    queue!(stdout, Clear(ClearType::All))?;
    stdout.flush()?;

    match choice {
        FileChoice::Selected(path) => Ok(vec![LaunchRequest::new(path)?]),
        FileChoice::Quit => Ok(Vec::new()),
    }
}

fn print_invocation(worker: &WorkerDefinition, request: &LaunchRequest) -> Result<()> {
    let arguments = worker.render_arguments(request)?;
    println!(
        "Would run:\n{} {}",
        worker.interpreter,
        arguments
            .iter()
            .map(|a| format!("\"{}\"", a.to_string_lossy()))
            .join(" ")
    );

    if let Some(working_directory) = config::expand_working_directory(&worker.working_directory) {
        println!("In directory:\n\t{working_directory}");
    }

    if let Some(environment) = worker.environment.as_ref() {
        println!("With environment:");
        for (key, value) in environment.iter().sorted() {
            println!("\t\"{key}\": \"{value}\"");
        }
    }

    Ok(())
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let worker = initialize_worker(&args)?;
    let requests = collect_requests(&args)?;

    if requests.is_empty() {
        debug!("Nothing selected");
        return Ok(());
    }

    if args.dry_run {
        for request in &requests {
            print_invocation(&worker, request)?;
        }
        return Ok(());
    }

    let (runner, mut dispatcher) = ProcessRunner::new(worker);
    let mut presenter = ConsolePresenter::stdio(requests.len() > 1 && !args.sequential);

    let mut launch_failures = 0;

    if args.sequential {
        for request in requests {
            match runner.launch(request) {
                Ok(handle) => {
                    info!("Started worker {} (pid {})", handle.id(), handle.pid());
                    dispatcher.run_until(handle.id(), &mut presenter);
                    if let Err(e) = handle.wait() {
                        warn!("{e}");
                    }
                }
                Err(e) => {
                    eprintln!("{e}");
                    launch_failures += 1;
                }
            }
        }
    } else {
        for request in requests {
            match runner.launch(request) {
                Ok(handle) => info!("Started worker {} (pid {})", handle.id(), handle.pid()),
                Err(e) => {
                    eprintln!("{e}");
                    launch_failures += 1;
                }
            }
        }
        dispatcher.run(&mut presenter);
    }

    let worker_failures = presenter.failures();
    if launch_failures + worker_failures > 0 {
        return Err(Error::WorkerFailures {
            launch_failures,
            worker_failures,
        });
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
