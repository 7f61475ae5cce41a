use std::sync::Arc;

use parking_lot::RwLock;
use shoebox_model::{ConnectionClass, EffectiveType};

/// What the host currently knows about the link. Every field is optional
/// because most runtimes expose only some of them, or none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSnapshot {
    pub effective_type: Option<EffectiveType>,
    pub save_data: Option<bool>,
}

impl NetworkSnapshot {
    pub fn with_effective_type(effective_type: EffectiveType) -> Self {
        Self {
            effective_type: Some(effective_type),
            save_data: None,
        }
    }
}

/// Source of network-information signals. Implementations must be cheap
/// and must not perform I/O.
pub trait NetworkSignals: Send + Sync + 'static {
    fn snapshot(&self) -> NetworkSnapshot;
}

/// Runtime without any network information API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNetworkSignals;

impl NetworkSignals for NoNetworkSignals {
    fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::default()
    }
}

/// Signals pushed in by the host whenever its connection listener fires.
#[derive(Debug, Clone, Default)]
pub struct SharedNetworkSignals {
    inner: Arc<RwLock<NetworkSnapshot>>,
}

impl SharedNetworkSignals {
    pub fn new(initial: NetworkSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn update(&self, snapshot: NetworkSnapshot) {
        let mut current = self.inner.write();
        if *current != snapshot {
            log::debug!(
                "Network signals changed: effective_type={:?} save_data={:?}",
                snapshot.effective_type,
                snapshot.save_data
            );
        }
        *current = snapshot;
    }

    pub fn set_effective_type(&self, effective_type: Option<EffectiveType>) {
        let mut snapshot = self.snapshot();
        snapshot.effective_type = effective_type;
        self.update(snapshot);
    }

    pub fn set_save_data(&self, save_data: Option<bool>) {
        let mut snapshot = self.snapshot();
        snapshot.save_data = save_data;
        self.update(snapshot);
    }
}

impl NetworkSignals for SharedNetworkSignals {
    fn snapshot(&self) -> NetworkSnapshot {
        *self.inner.read()
    }
}

/// Classifies the current link as slow, medium or fast.
#[derive(Clone)]
pub struct ConnectionQualityProbe {
    signals: Arc<dyn NetworkSignals>,
}

impl std::fmt::Debug for ConnectionQualityProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionQualityProbe")
            .field("snapshot", &self.signals.snapshot())
            .finish()
    }
}

impl Default for ConnectionQualityProbe {
    fn default() -> Self {
        Self::new(Arc::new(NoNetworkSignals))
    }
}

impl ConnectionQualityProbe {
    pub fn new(signals: Arc<dyn NetworkSignals>) -> Self {
        Self { signals }
    }

    pub fn classify(&self) -> ConnectionClass {
        classify_snapshot(&self.signals.snapshot())
    }
}

/// Save-data wins over everything; otherwise map the effective type, and
/// assume a fast link when nothing is reported.
pub fn classify_snapshot(snapshot: &NetworkSnapshot) -> ConnectionClass {
    if snapshot.save_data == Some(true) {
        return ConnectionClass::Slow;
    }

    match snapshot.effective_type {
        Some(EffectiveType::Slow2g | EffectiveType::TwoG) => {
            ConnectionClass::Slow
        }
        Some(EffectiveType::ThreeG) => ConnectionClass::Medium,
        Some(EffectiveType::FourG) | None => ConnectionClass::Fast,
    }
}
