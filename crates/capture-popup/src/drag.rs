//! Drag payload protocol
//!
//! A capture control can be dragged onto another surface (e.g. a sidebar
//! or a page) which then runs the command itself. The drag carries the
//! source tab and the command's static parameters in two forms:
//! - `application/scrapbook.capturetabs+json`: the structured payload
//! - `text/plain`: the source tab id, for targets that only take text
//!
//! While a drag is in flight the popup's root surface carries the
//! `dragged-within` marker. The marker must not be applied inside the
//! drag-start handler itself, since browsers cancel a drag whose source is
//! restyled synchronously; a [`Deferral`] strategy runs it later.

use crate::command::{Command, CommandKind};
use crate::error::{PopupError, Result};
use capture_host::{CaptureMode, Tab, TabId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Media type of the structured payload
pub const CAPTURE_TABS_MEDIA_TYPE: &str = "application/scrapbook.capturetabs+json";

/// Media type of the plain-text fallback
pub const PLAIN_TEXT_MEDIA_TYPE: &str = "text/plain";

/// Marker set on the root surface while a drag is in flight
pub const DRAGGED_WITHIN_MARKER: &str = "dragged-within";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Structured drag payload
///
/// Serialized as `{sourceTabId, commandKind, declaredMode?, forAllTabs?}`;
/// absent optional fields mean "unset" and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    pub source_tab_id: TabId,
    pub command_kind: CommandKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_mode: Option<CaptureMode>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub for_all_tabs: bool,
}

impl DragPayload {
    pub fn new(source: &Tab, command: &Command) -> Self {
        Self {
            source_tab_id: source.id,
            command_kind: command.kind(),
            declared_mode: command.declared_mode(),
            for_all_tabs: command.is_for_all_tabs(),
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// The plain-text fallback: the source tab id
    pub fn plain_text(&self) -> String {
        self.source_tab_id.to_string()
    }

    /// Source tab id carried by a plain-text fallback
    pub fn source_from_plain_text(text: &str) -> Result<TabId> {
        text.parse()
            .map_err(|_| PopupError::InvalidPlainText(text.to_string()))
    }

    /// The command the receiving surface should run
    pub fn command(&self) -> Command {
        Command::new(self.command_kind)
            .with_declared_mode(self.declared_mode)
            .with_for_all_tabs(self.for_all_tabs)
    }
}

/// Data store of a drag gesture
pub trait DataTransfer {
    fn set_data(&mut self, media_type: &str, data: &str);
}

/// In-memory drag data, keyed by media type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DragData {
    entries: BTreeMap<String, String>,
}

impl DragData {
    pub fn get(&self, media_type: &str) -> Option<&str> {
        self.entries.get(media_type).map(String::as_str)
    }

    /// Decode the structured payload, if present
    pub fn payload(&self) -> Option<Result<DragPayload>> {
        self.get(CAPTURE_TABS_MEDIA_TYPE).map(DragPayload::decode)
    }
}

impl DataTransfer for DragData {
    fn set_data(&mut self, media_type: &str, data: &str) {
        self.entries.insert(media_type.to_string(), data.to_string());
    }
}

/// Root display surface that carries cosmetic markers
pub trait MarkerSurface: Send + Sync {
    fn add_marker(&self, marker: &str);
    fn remove_marker(&self, marker: &str);
}

/// Marker surface kept in memory
#[derive(Debug, Default)]
pub struct MarkerSet {
    markers: Mutex<BTreeSet<String>>,
}

impl MarkerSet {
    pub fn contains(&self, marker: &str) -> bool {
        lock(&self.markers).contains(marker)
    }
}

impl MarkerSurface for MarkerSet {
    fn add_marker(&self, marker: &str) {
        lock(&self.markers).insert(marker.to_string());
    }

    fn remove_marker(&self, marker: &str) {
        lock(&self.markers).remove(marker);
    }
}

pub type Job = Box<dyn FnOnce() + Send>;

/// Runs a job after the current event has been handled
pub trait Deferral: Send + Sync {
    fn defer(&self, job: Job);
}

/// Runs jobs on a later tick of a tokio runtime
#[derive(Debug, Clone)]
pub struct NextTick {
    handle: tokio::runtime::Handle,
}

impl NextTick {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime of the calling context, if there is one
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Deferral for NextTick {
    fn defer(&self, job: Job) {
        self.handle.spawn(async move {
            tokio::task::yield_now().await;
            job();
        });
    }
}

/// Queues jobs until the host pumps them
///
/// For event loops that run their own "after this event" phase.
#[derive(Default)]
pub struct QueuedDeferral {
    jobs: Mutex<VecDeque<Job>>,
}

impl QueuedDeferral {
    pub fn pending(&self) -> usize {
        lock(&self.jobs).len()
    }

    /// Run every queued job; returns how many ran
    pub fn run_pending(&self) -> usize {
        let jobs: Vec<Job> = lock(&self.jobs).drain(..).collect();
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }
}

impl Deferral for QueuedDeferral {
    fn defer(&self, job: Job) {
        lock(&self.jobs).push_back(job);
    }
}

/// Drag-start / drag-end handling for capture controls
pub struct DragController {
    surface: Arc<dyn MarkerSurface>,
    deferral: Arc<dyn Deferral>,
    generation: Arc<AtomicU64>,
}

impl DragController {
    pub fn new(surface: Arc<dyn MarkerSurface>, deferral: Arc<dyn Deferral>) -> Self {
        Self {
            surface,
            deferral,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Write the payload for `command` dragged from `source`
    ///
    /// Fails with [`PopupError::NoTargetTab`] when there is no source tab.
    /// No task is created; the drop target assembles its own.
    pub fn on_drag_start(
        &self,
        source: Option<&Tab>,
        command: &Command,
        transfer: &mut dyn DataTransfer,
    ) -> Result<DragPayload> {
        let source = source.ok_or(PopupError::NoTargetTab)?;
        let payload = DragPayload::new(source, command);

        transfer.set_data(CAPTURE_TABS_MEDIA_TYPE, &payload.encode()?);
        transfer.set_data(PLAIN_TEXT_MEDIA_TYPE, &payload.plain_text());
        log::debug!("Drag started: {:?}", payload);

        // A drag-end before the job runs invalidates it
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let surface = Arc::clone(&self.surface);
        self.deferral.defer(Box::new(move || {
            if current.load(Ordering::SeqCst) == generation {
                surface.add_marker(DRAGGED_WITHIN_MARKER);
            }
        }));

        Ok(payload)
    }

    /// Clear the drag marker; safe to call at any time
    pub fn on_drag_end(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.surface.remove_marker(DRAGGED_WITHIN_MARKER);
    }
}
