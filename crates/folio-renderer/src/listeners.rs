//! Host event listener bookkeeping.
//!
//! Every registration hands back a [`ListenerGuard`]; dropping the guard
//! unregisters it. The renderer keeps guards inside the active effect, so
//! tearing an effect down releases its listeners on every exit path.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Per-frame animation callback.
    Frame,
    /// Pointer move/leave events.
    Pointer,
    /// Viewport resize events.
    Resize,
}

#[derive(Debug, Default)]
struct Counts {
    frame: AtomicUsize,
    pointer: AtomicUsize,
    resize: AtomicUsize,
}

impl Counts {
    fn slot(&self, kind: ListenerKind) -> &AtomicUsize {
        match kind {
            ListenerKind::Frame => &self.frame,
            ListenerKind::Pointer => &self.pointer,
            ListenerKind::Resize => &self.resize,
        }
    }
}

/// Shared registration counts. Clones observe the same counts.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    counts: Arc<Counts>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, kind: ListenerKind) -> ListenerGuard {
        self.counts.slot(kind).fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            counts: Arc::clone(&self.counts),
            kind,
        }
    }

    /// Number of live registrations of `kind`.
    pub fn active(&self, kind: ListenerKind) -> usize {
        self.counts.slot(kind).load(Ordering::SeqCst)
    }
}

/// A live registration. Unregisters on drop.
pub struct ListenerGuard {
    counts: Arc<Counts>,
    kind: ListenerKind,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.counts.slot(self.kind).fetch_sub(1, Ordering::SeqCst);
    }
}
