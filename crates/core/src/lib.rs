//! Notes Launcher Core Library
//!
//! This crate provides the core functionality for notes-launcher, a small
//! front-end that hands a selected video, audio or transcript file to an
//! external notes worker script and relays the worker's output back to the
//! user interface.
//!
//! # Key Features
//!
//! - **Process Runner**: Launch the worker without blocking and read both output streams
//! - **Dispatcher**: Deliver every output line on the thread that owns the presentation layer
//! - **File Categories**: Media and transcript extensions accepted by the file pickers
//! - **Worker Definition**: YAML-configurable interpreter, script and argument templates
//! - **Error Handling**: Error types for every launcher failure mode
//!
//! # Examples
//!
//! Launching the worker and printing its output on the current thread:
//!
//! ```no_run
//! use notes_launcher_core::dispatch::Presenter;
//! use notes_launcher_core::output::{LaunchId, OutputLine};
//! use notes_launcher_core::request::LaunchRequest;
//! use notes_launcher_core::runner::ProcessRunner;
//! use notes_launcher_core::worker::WorkerDefinition;
//!
//! struct Print;
//!
//! impl Presenter for Print {
//!     fn present(&mut self, _launch: LaunchId, line: &OutputLine) {
//!         println!("{line}");
//!     }
//! }
//!
//! let (runner, mut dispatcher) = ProcessRunner::new(WorkerDefinition::default());
//! runner.launch(LaunchRequest::new("lecture.mp4")?)?;
//! dispatcher.run(&mut Print);
//! # Ok::<(), notes_launcher_core::error::Error>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod file_handling;
pub mod file_types;
pub mod output;
pub mod request;
pub mod runner;
pub mod worker;
