//! Observable palette state with automatic change notifications.
//!
//! Mutation = notification. Every change goes through [`ObservablePalette::update`],
//! which broadcasts a fresh snapshot when the visible state changed.

use parking_lot::RwLock;
use tokio::sync::watch;

use super::state::{PaletteModel, PaletteSnapshot};

/// Palette model that broadcasts snapshots to subscribers.
///
/// ## Thread Safety
///
/// Uses `parking_lot::RwLock` for the model (never poisons) and `tokio::sync::watch`
/// for broadcasts. Snapshots are sent while the write guard is held, so
/// broadcasts arrive in mutation order; `send_if_modified` never blocks.
pub struct ObservablePalette {
    inner: RwLock<PaletteModel>,
    tx: watch::Sender<PaletteSnapshot>,
    rx: watch::Receiver<PaletteSnapshot>,
}

impl ObservablePalette {
    /// Create a closed palette.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(PaletteSnapshot::default());
        Self {
            inner: RwLock::new(PaletteModel::default()),
            tx,
            rx,
        }
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<PaletteSnapshot> {
        self.rx.clone()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> PaletteSnapshot {
        self.inner.read().snapshot()
    }

    /// Read the model.
    pub fn read<R>(&self, f: impl FnOnce(&PaletteModel) -> R) -> R {
        f(&self.inner.read())
    }

    /// Mutate the model and broadcast the result.
    pub fn update<R>(&self, f: impl FnOnce(&mut PaletteModel) -> R) -> R {
        let mut inner = self.inner.write();
        let result = f(&mut inner);
        let snapshot = inner.snapshot();

        self.tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
        result
    }

    /// Whether `generation` is still the latest issued.
    pub fn is_current(&self, generation: u64) -> bool {
        self.inner.read().is_current(generation)
    }

    /// Check if the palette is open.
    pub fn is_open(&self) -> bool {
        self.inner.read().phase.is_open()
    }
}

impl Default for ObservablePalette {
    fn default() -> Self {
        Self::new()
    }
}
