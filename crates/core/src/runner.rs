//! Launching the worker and draining its output.
//!
//! Each launch gets three threads: one reader per output stream and a
//! waiter that joins both readers before reaping the process. Readers never
//! touch the presentation layer, they only push [`RunnerEvent`]s into the
//! delivery queue owned by the [`Dispatcher`].

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::output::{Completion, LaunchId, OutputLine, RunnerEvent, Stream};
use crate::request::LaunchRequest;
use crate::worker::WorkerDefinition;

/// Hands a reader its connection to the delivery queue once the launch is
/// committed. Dropping it unopened leaves the reader draining silently.
type Gate = Sender<Sender<RunnerEvent>>;

/// Starts worker processes and feeds their output to a [`Dispatcher`].
pub struct ProcessRunner {
    worker: WorkerDefinition,
    sender: Sender<RunnerEvent>,
    pending: Arc<AtomicUsize>,
    next_id: AtomicU64,
}

/// A running (or finished) launch.
pub struct LaunchHandle {
    id: LaunchId,
    pid: u32,
    waiter: JoinHandle<Completion>,
}

impl LaunchHandle {
    #[must_use]
    pub fn id(&self) -> LaunchId {
        self.id
    }

    #[must_use]
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Blocks until the worker has exited and both of its streams are drained.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting on the process failed.
    pub fn wait(self) -> Result<ExitStatus> {
        match self.waiter.join() {
            Ok(Completion::Exited(status)) => Ok(status),
            Ok(Completion::WaitFailed(message)) => Err(Error::Misc(message)),
            Err(_) => Err(Error::Misc(format!("waiter for launch {} panicked", self.id))),
        }
    }
}

impl ProcessRunner {
    /// Creates a runner for `worker` along with the dispatcher that consumes
    /// its output.
    #[must_use]
    pub fn new(worker: WorkerDefinition) -> (Self, Dispatcher) {
        let (sender, receiver) = mpsc::channel();
        let pending = Arc::new(AtomicUsize::new(0));

        let runner = Self {
            worker,
            sender,
            pending: Arc::clone(&pending),
            next_id: AtomicU64::new(1),
        };

        (runner, Dispatcher::new(receiver, pending))
    }

    #[must_use]
    pub fn worker(&self) -> &WorkerDefinition {
        &self.worker
    }

    /// Starts the worker for `request` and returns without waiting for it.
    ///
    /// Lines are delivered through the dispatcher. The handle can be used to
    /// wait for the exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker definition is invalid, the process
    /// could not be started, or one of its threads could not be started. A
    /// started process is killed in that case. Nothing is delivered for a
    /// failed launch.
    pub fn launch(&self, request: LaunchRequest) -> Result<LaunchHandle> {
        let mut command = self.worker.build_command(&request)?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| Error::spawn_error(self.worker.interpreter.clone(), e))?;

        let id = LaunchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let pid = child.id();

        let sources = [
            child
                .stdout
                .take()
                .map(|stdout| (Stream::Stdout, Box::new(stdout) as Box<dyn Read + Send>)),
            child
                .stderr
                .take()
                .map(|stderr| (Stream::Stderr, Box::new(stderr) as Box<dyn Read + Send>)),
        ];

        let mut gates = Vec::with_capacity(sources.len());
        let mut readers = Vec::with_capacity(sources.len());
        for (stream, source) in sources.into_iter().flatten() {
            match spawn_reader(id, stream, source) {
                Ok((gate, reader)) => {
                    gates.push(gate);
                    readers.push(reader);
                }
                Err(e) => {
                    abandon(id, &mut child, gates, readers);
                    return Err(e);
                }
            }
        }

        let (child_slot, child_receiver) = mpsc::channel::<Child>();
        let waiter = match spawn_waiter(id, child_receiver, readers, self.sender.clone()) {
            Ok(waiter) => waiter,
            Err(e) => {
                // The readers moved into the failed waiter and were detached;
                // closing the gates still keeps them from delivering.
                abandon(id, &mut child, gates, Vec::new());
                return Err(e);
            }
        };

        // Every thread exists, so the launch is committed from here on.
        self.pending.fetch_add(1, Ordering::SeqCst);
        for gate in gates {
            // Readers block on their gate until now, so it is still open.
            let _ = gate.send(self.sender.clone());
        }
        if let Err(mpsc::SendError(mut child)) = child_slot.send(child) {
            warn!("Waiter for {} is gone, killing the worker", id);
            let _ = child.kill();
            let _ = child.wait();
        }

        info!("Launched {} for `{}` as {} (pid {})", self.worker, request, id, pid);

        Ok(LaunchHandle { id, pid, waiter })
    }
}

fn spawn_reader(
    launch: LaunchId,
    stream: Stream,
    source: Box<dyn Read + Send>,
) -> Result<(Gate, JoinHandle<()>)> {
    let (gate, opened) = mpsc::channel();

    thread::Builder::new()
        .name(format!("worker-{}-{}", launch.0, stream))
        .spawn(move || {
            let sender = opened.recv().ok();
            read_lines(source, launch, stream, sender.as_ref());
        })
        .map(|reader| (gate, reader))
        .map_err(|e| Error::Thread(format!("{stream} reader"), e))
}

fn spawn_waiter(
    launch: LaunchId,
    child_receiver: Receiver<Child>,
    readers: Vec<JoinHandle<()>>,
    sender: Sender<RunnerEvent>,
) -> Result<JoinHandle<Completion>> {
    thread::Builder::new()
        .name(format!("worker-{}-wait", launch.0))
        .spawn(move || {
            for reader in readers {
                if reader.join().is_err() {
                    warn!("Output reader for {} panicked", launch);
                }
            }

            let completion = match child_receiver.recv() {
                Ok(mut child) => match child.wait() {
                    Ok(status) => Completion::Exited(status),
                    Err(e) => Completion::WaitFailed(e.to_string()),
                },
                Err(_) => Completion::WaitFailed("the launch was abandoned".to_string()),
            };
            info!("Worker {} finished: {}", launch, completion);

            let event = RunnerEvent::Exited {
                launch,
                completion: completion.clone(),
            };
            if sender.send(event).is_err() {
                warn!("Dispatcher is gone, exit of {} was not delivered", launch);
            }

            completion
        })
        .map_err(|e| Error::Thread("waiter".to_string(), e))
}

/// Tears down a launch that could not be committed.
fn abandon(launch: LaunchId, child: &mut Child, gates: Vec<Gate>, readers: Vec<JoinHandle<()>>) {
    warn!("Abandoning {}, killing the worker", launch);
    drop(gates);

    if let Err(e) = child.kill() {
        warn!("Could not kill the worker of {}: {}", launch, e);
    }
    for reader in readers {
        let _ = reader.join();
    }
    let _ = child.wait();
}

/// Forwards every non-empty line of `source` to `sender`.
///
/// The source is read to the end even without a receiving side, so the
/// worker never blocks on a full pipe.
fn read_lines<R: Read>(
    source: R,
    launch: LaunchId,
    stream: Stream,
    sender: Option<&Sender<RunnerEvent>>,
) {
    let mut reader = BufReader::new(source);
    let mut buffer = Vec::new();
    let mut sender = sender;

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Reading {} of {} failed: {}", stream, launch, e);
                break;
            }
        }

        let Some(text) = trim_line(&buffer) else {
            continue;
        };

        debug!("{} {}: {}", launch, stream, text);

        if let Some(queue) = sender {
            let event = RunnerEvent::Line {
                launch,
                line: OutputLine::new(text, stream),
            };

            if queue.send(event).is_err() {
                warn!("Dispatcher is gone, dropping further {} of {}", stream, launch);
                sender = None;
            }
        }
    }
}

/// Strips the line terminator. Returns None for lines that are empty.
fn trim_line(raw: &[u8]) -> Option<String> {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    if line.is_empty() {
        return None;
    }

    Some(String::from_utf8_lossy(line).into_owned())
}
