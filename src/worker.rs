//! Background execution of backend calls for the TUI.
//!
//! Every call runs on its own short-lived thread and reports back over an
//! `mpsc` channel that the event loop drains each tick. A receiver that has
//! gone away (wizard dropped, app exiting) is not an error: the result is
//! simply discarded.

use crate::api::{ApiError, Country, SchoolApi, SchoolSummary, Subscription};
use crate::sequencer::{CallResult, RemoteCall};
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Messages sent from worker threads to the UI thread
#[derive(Debug)]
pub enum WorkerMessage {
    /// Result of a wizard call. `generation` identifies the wizard instance
    /// that asked, so results for a discarded wizard can be dropped.
    Wizard { generation: u64, result: CallResult },
    Subscriptions(Result<Vec<Subscription>, ApiError>),
    Countries(Result<Vec<Country>, ApiError>),
    Schools(Result<Vec<SchoolSummary>, ApiError>),
}

/// Spawns backend calls off the UI thread.
#[derive(Clone)]
pub struct Worker {
    api: Arc<dyn SchoolApi>,
    tx: Sender<WorkerMessage>,
}

impl Worker {
    pub fn new(api: Arc<dyn SchoolApi>, tx: Sender<WorkerMessage>) -> Self {
        Self { api, tx }
    }

    /// Run a wizard call; the result comes back tagged with `generation`.
    pub fn spawn_call(&self, generation: u64, call: RemoteCall) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        debug!("Spawning {:?} for wizard #{}", call.pending(), generation);

        thread::spawn(move || {
            let result = call.execute(api.as_ref());
            let _ = tx.send(WorkerMessage::Wizard { generation, result });
        });
    }

    /// Fetch both catalog lists concurrently.
    pub fn fetch_catalog(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerMessage::Subscriptions(api.subscriptions()));
        });

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerMessage::Countries(api.countries()));
        });
    }

    pub fn fetch_schools(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let _ = tx.send(WorkerMessage::Schools(api.schools()));
        });
    }
}
