use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

bitflags::bitflags! {
    /// Global ("document-level") listeners a host must keep attached while a
    /// gesture session runs.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        const POINTER_MOVE = 1 << 0;
        const POINTER_UP = 1 << 1;
        const TOUCH_MOVE = 1 << 2;
        const TOUCH_END = 1 << 3;
    }
}

/// Tracks which session listeners are currently attached.
#[derive(Clone, Debug)]
pub struct ListenerRegistry {
    active: Rc<Cell<Listeners>>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            active: Rc::new(Cell::new(Listeners::empty())),
        }
    }
}

impl ListenerRegistry {
    /// Attach `listeners` for as long as the returned lease lives.
    pub fn lease(&self, listeners: Listeners) -> ListenerLease {
        let current = self.active.get();
        debug_assert!(
            !current.intersects(listeners),
            "listeners {listeners:?} already attached"
        );
        self.active.set(current | listeners);
        debug!(attached = ?listeners, "Session listeners attached");
        ListenerLease {
            active: Rc::clone(&self.active),
            listeners,
        }
    }

    pub fn active(&self) -> Listeners {
        self.active.get()
    }
}

/// Detaches its listeners when dropped.
#[derive(Debug)]
pub struct ListenerLease {
    active: Rc<Cell<Listeners>>,
    listeners: Listeners,
}

impl ListenerLease {
    pub fn listeners(&self) -> Listeners {
        self.listeners
    }
}

impl Drop for ListenerLease {
    fn drop(&mut self) {
        self.active.set(self.active.get().difference(self.listeners));
        debug!(detached = ?self.listeners, "Session listeners detached");
    }
}
