//! Search-strategy contract and run-completion observers.
//!
//! [`Algorithm`] is what front ends program against: hand a configuration
//! to [`run`](Algorithm::run), read back the history, and register
//! [`RunObserver`]s to be told when a run completes.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::RunError;
use crate::history::{Generation, GenerationHistory};

/// Receives the history of every successful run.
///
/// Called synchronously on the thread that ran the algorithm, exactly once
/// per completed run and never for a failed one.
pub trait RunObserver: Send + Sync {
    fn on_run_complete(&self, history: Arc<GenerationHistory>);
}

impl<F> RunObserver for F
where
    F: Fn(Arc<GenerationHistory>) + Send + Sync,
{
    fn on_run_complete(&self, history: Arc<GenerationHistory>) {
        self(history)
    }
}

/// Forwards completed histories into an mpsc channel.
///
/// Lets a front end receive results on its own thread. Sends to a closed
/// channel are dropped.
#[derive(Debug)]
pub struct ChannelObserver {
    sender: Mutex<Sender<Arc<GenerationHistory>>>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<Arc<GenerationHistory>>) -> Self {
        Self {
            sender: Mutex::new(sender),
        }
    }
}

impl RunObserver for ChannelObserver {
    fn on_run_complete(&self, history: Arc<GenerationHistory>) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if sender.send(history).is_err() {
            tracing::debug!("run observer channel closed, history dropped");
        }
    }
}

/// A search strategy producing a generation history.
///
/// Each call to [`run`](Self::run) is an independent optimization with its
/// own configuration; the last successful run's history is what
/// [`generations`](Self::generations) returns.
pub trait Algorithm: Send + Sync {
    /// Complete configuration for one run.
    type Config;

    /// Display name of the strategy.
    fn name(&self) -> &str;

    /// Registers an observer for future run completions.
    fn add_observer(&self, observer: Arc<dyn RunObserver>);

    /// Runs to completion, blocking the caller.
    fn run(&self, config: Self::Config) -> Result<Arc<GenerationHistory>, RunError>;

    /// History of the most recent successful run, `None` before the first.
    fn generations(&self) -> Option<Arc<GenerationHistory>>;

    /// Final generation of the most recent successful run.
    fn last_generation(&self) -> Option<Generation> {
        self.generations().and_then(|h| h.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;

    #[test]
    fn test_closure_observer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let observer: Arc<dyn RunObserver> = Arc::new(move |h: Arc<GenerationHistory>| {
            assert_eq!(h.target(), "Quadratic");
            seen.fetch_add(1, Ordering::SeqCst);
        });

        observer.on_run_complete(Arc::new(GenerationHistory::with_capacity("Quadratic", 0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_observer_forwards() {
        let (tx, rx) = mpsc::channel();
        let observer = ChannelObserver::new(tx);
        let history = Arc::new(GenerationHistory::with_capacity("Polynomial", 0));
        observer.on_run_complete(history.clone());
        let received = rx.recv().unwrap();
        assert!(Arc::ptr_eq(&received, &history));
    }

    #[test]
    fn test_channel_observer_tolerates_closed_channel() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let observer = ChannelObserver::new(tx);
        observer.on_run_complete(Arc::new(GenerationHistory::with_capacity("Polynomial", 0)));
    }
}
