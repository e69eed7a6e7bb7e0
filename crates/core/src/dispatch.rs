//! The consuming end of the delivery queue.
//!
//! A [`Dispatcher`] is owned by whichever thread owns the presentation
//! layer. Every [`Presenter`] call happens on the thread that calls into the
//! dispatcher, never on a reader thread.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use log::debug;

use crate::output::{Completion, LaunchId, OutputLine, RunnerEvent};

/// Receives worker output on the presentation thread.
pub trait Presenter {
    /// Called once per non-empty worker line.
    fn present(&mut self, launch: LaunchId, line: &OutputLine);

    /// Called once when a launch has exited and all of its lines were presented.
    fn finished(&mut self, _launch: LaunchId, _completion: &Completion) {}
}

pub struct Dispatcher {
    receiver: Receiver<RunnerEvent>,
    pending: Arc<AtomicUsize>,
    /// Exits seen by `run_until` while waiting for a different launch.
    unclaimed_exits: HashSet<LaunchId>,
}

impl Dispatcher {
    pub(crate) fn new(receiver: Receiver<RunnerEvent>, pending: Arc<AtomicUsize>) -> Self {
        Self {
            receiver,
            pending,
            unclaimed_exits: HashSet::new(),
        }
    }

    /// Number of launches whose exit has not been dispatched yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Delivers everything already queued without blocking.
    ///
    /// Returns the number of lines presented.
    pub fn drain<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> usize {
        let mut presented = 0;

        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.dispatch(event, presenter) {
                        presented += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        presented
    }

    /// Blocks, delivering events as they arrive, until every launch started
    /// so far has exited.
    pub fn run<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        while self.pending() > 0 {
            let Ok(event) = self.receiver.recv() else {
                break;
            };
            self.dispatch(event, presenter);
        }
    }

    /// Blocks until `launch` has exited. Events of other launches that
    /// arrive in the meantime are delivered as well.
    ///
    /// Returns early once nothing is pending, which covers a launch whose exit
    /// was already dispatched by `drain` or `run`.
    pub fn run_until<P: Presenter + ?Sized>(&mut self, launch: LaunchId, presenter: &mut P) {
        while !self.unclaimed_exits.remove(&launch) && self.pending() > 0 {
            let Ok(event) = self.receiver.recv() else {
                break;
            };

            let done = match &event {
                RunnerEvent::Exited { launch: exited, .. } if *exited == launch => true,
                RunnerEvent::Exited { launch: exited, .. } => {
                    self.unclaimed_exits.insert(*exited);
                    false
                }
                RunnerEvent::Line { .. } => false,
            };
            self.dispatch(event, presenter);
            if done {
                break;
            }
        }
    }

    /// Returns true if the event was a line.
    fn dispatch<P: Presenter + ?Sized>(&mut self, event: RunnerEvent, presenter: &mut P) -> bool {
        match event {
            RunnerEvent::Line { launch, line } => {
                presenter.present(launch, &line);
                true
            }
            RunnerEvent::Exited { launch, completion } => {
                debug!("Dispatching exit of {}", launch);
                self.pending.fetch_sub(1, Ordering::SeqCst);
                presenter.finished(launch, &completion);
                false
            }
        }
    }
}
