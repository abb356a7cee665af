//! Debug observer port

use edgemgmt_domain::DebugData;

/// Receives the snapshot of every HTTP transaction, successful or not.
///
/// Observers run synchronously on the calling task after the response is
/// classified, so they should return quickly.
///
/// Any `Fn(&DebugData)` closure is an observer:
///
/// ```
/// use edgemgmt_core::DebugObserver;
/// use edgemgmt_domain::DebugData;
///
/// let observer = |data: &DebugData| println!("{} {}", data.method, data.status_code);
/// observer.on_transaction(&DebugData::default());
/// ```
pub trait DebugObserver: Send + Sync {
    fn on_transaction(&self, data: &DebugData);
}

impl<F> DebugObserver for F
where
    F: Fn(&DebugData) + Send + Sync,
{
    fn on_transaction(&self, data: &DebugData) {
        self(data);
    }
}
