//! Engine state holder.
//!
//! [`Linesift`] owns the current (dataset, index) pair as a versioned
//! snapshot behind a lock: readers always see a fully-built index, and
//! rebuilds swap the pair atomically, never partially.
//!
//! Rebuilds run on a background worker thread. Every rebuild request
//! takes a fresh generation from a shared counter; the worker checks
//! the counter at each batch boundary and abandons the build as soon
//! as a newer request exists. At publish time the generation is
//! checked once more under the write lock, so a superseded build can
//! never overwrite a newer one, regardless of completion order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use linesift_types::{BuildError, Generation, SearchHit};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::index::{self, IndexBuilder, IndexStats, LineIndex};

/// The published (dataset, index) pair. Replaced as a unit.
struct Snapshot {
    generation: Generation,
    dataset: Arc<Dataset>,
    index: Arc<LineIndex>,
}

struct Shared {
    /// Most recently requested build generation.
    latest: AtomicU64,
    snapshot: RwLock<Snapshot>,
}

/// Inputs the next rebuild derives from.
struct Inputs {
    dataset: Arc<Dataset>,
    case_sensitive: bool,
}

/// Completion ticket for one rebuild request.
///
/// Dropping the handle is fine; the build still runs and publishes.
/// [`wait`](BuildHandle::wait) blocks until the worker either
/// publishes this generation or discards it as superseded.
pub struct BuildHandle {
    generation: Generation,
    rx: mpsc::Receiver<Result<Generation, BuildError>>,
}

impl BuildHandle {
    /// The generation assigned to this rebuild request.
    #[inline(always)]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Blocks until the build resolves.
    pub fn wait(self) -> Result<Generation, BuildError> {
        match self.rx.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(BuildError::WorkerLost),
        }
    }
}

/// Line-search engine over a single in-memory text blob.
///
/// ```
/// use linesift_core::Linesift;
///
/// let engine = Linesift::new();
/// engine.load_text("the cat sat\nthe dog sat").wait().unwrap();
///
/// let hits = engine.search("cat sat", 10);
/// assert_eq!(hits[0].text, "the cat sat");
/// assert_eq!(hits[0].score, 2);
/// ```
pub struct Linesift {
    shared: Arc<Shared>,
    inputs: Mutex<Inputs>,
}

impl Default for Linesift {
    fn default() -> Self {
        Self::new()
    }
}

impl Linesift {
    /// Creates an engine with no dataset loaded. Queries return empty
    /// results until a text is loaded and its build completes.
    pub fn new() -> Self {
        let dataset = Arc::new(Dataset::default());
        let index = Arc::new(IndexBuilder::new(dataset.clone(), false, 0).run());
        Self {
            shared: Arc::new(Shared {
                latest: AtomicU64::new(0),
                snapshot: RwLock::new(Snapshot {
                    generation: 0,
                    dataset: dataset.clone(),
                    index,
                }),
            }),
            inputs: Mutex::new(Inputs {
                dataset,
                case_sensitive: false,
            }),
        }
    }

    /// Replaces the dataset with `text` and starts a rebuild.
    ///
    /// The previous dataset and index stay queryable until the new
    /// build publishes.
    pub fn load_text(&self, text: &str) -> BuildHandle {
        let dataset = Arc::new(Dataset::from_text(text));
        let mut inputs = self.inputs.lock();
        inputs.dataset = dataset;
        self.spawn_build(&inputs)
    }

    /// Changes the normalization policy, rebuilding when it actually
    /// changed. Returns `None` when the flag already had that value.
    pub fn set_case_sensitive(&self, case_sensitive: bool) -> Option<BuildHandle> {
        let mut inputs = self.inputs.lock();
        if inputs.case_sensitive == case_sensitive {
            return None;
        }
        inputs.case_sensitive = case_sensitive;
        Some(self.spawn_build(&inputs))
    }

    /// Ranks lines of the current snapshot against `query`.
    ///
    /// `limit` of zero falls back to the default (10); values above
    /// the maximum (100) clamp. The snapshot's own case flag drives
    /// query normalization, so index and query always agree.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let snapshot = self.shared.snapshot.read();
        index::search(&snapshot.index, &snapshot.dataset, query, limit)
    }

    /// Generation of the currently published index.
    pub fn published_generation(&self) -> Generation {
        self.shared.snapshot.read().generation
    }

    /// Generation of the most recently requested rebuild.
    pub fn latest_generation(&self) -> Generation {
        self.shared.latest.load(Ordering::Acquire)
    }

    /// Statistics for the currently published index.
    pub fn stats(&self) -> IndexStats {
        self.shared.snapshot.read().index.stats()
    }

    /// Assigns the next generation and starts a worker for it. Called
    /// with the inputs lock held so generation order matches input
    /// order.
    fn spawn_build(&self, inputs: &Inputs) -> BuildHandle {
        let generation = self.shared.latest.fetch_add(1, Ordering::AcqRel) + 1;
        let shared = self.shared.clone();
        let dataset = inputs.dataset.clone();
        let case_sensitive = inputs.case_sensitive;
        let (tx, rx) = mpsc::channel();

        debug!(generation, lines = dataset.len(), "rebuild requested");

        thread::spawn(move || {
            let mut builder = IndexBuilder::new(dataset.clone(), case_sensitive, generation);
            loop {
                let more = builder.step();
                let latest = shared.latest.load(Ordering::Acquire);
                if latest != generation {
                    debug!(generation, latest, "build superseded mid-flight");
                    let _ = tx.send(Err(BuildError::Superseded {
                        requested: generation,
                        latest,
                    }));
                    return;
                }
                if !more {
                    break;
                }
            }

            let index = builder.finish();
            let mut snapshot = shared.snapshot.write();
            let latest = shared.latest.load(Ordering::Acquire);
            if latest == generation {
                *snapshot = Snapshot {
                    generation,
                    dataset,
                    index: Arc::new(index),
                };
                drop(snapshot);
                info!(generation, "index published");
                let _ = tx.send(Ok(generation));
            } else {
                drop(snapshot);
                debug!(generation, latest, "completed build discarded");
                let _ = tx.send(Err(BuildError::Superseded {
                    requested: generation,
                    latest,
                }));
            }
        });

        BuildHandle { generation, rx }
    }
}
