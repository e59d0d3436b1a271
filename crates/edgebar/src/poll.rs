use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    registry::RegistryContext,
    sway::{SwayClient, TreeSnapshot},
};

pub const POLL_INTERVAL: Duration = Duration::from_millis(150);

/// Pure value-equality differ over tree snapshots.
///
/// Edge-triggered: the fetched snapshot always becomes the retained one,
/// whether or not it differed, so only changes since the previous tick are
/// detected — not changes since the last dispatched refresh.
pub struct TreeDiffer {
    retained: TreeSnapshot,
}

impl TreeDiffer {
    pub fn new(initial: TreeSnapshot) -> Self {
        TreeDiffer { retained: initial }
    }

    /// Report whether the fetched snapshot differs from the retained one,
    /// then retain the fetched snapshot unconditionally.
    pub fn observe(&mut self, fetched: TreeSnapshot) -> bool {
        let changed = fetched != self.retained;
        self.retained = fetched;
        changed
    }
}

/// Arm the poll timer on the glib main loop. There is no cancellation; the
/// timer runs for the lifetime of the process. A failed fetch skips the
/// tick, retaining the last known state, and is never fatal.
pub fn arm(sway: Rc<RefCell<SwayClient>>, registry: Rc<RefCell<RegistryContext>>, initial: TreeSnapshot) {
    let mut differ = TreeDiffer::new(initial);
    glib::timeout_add_local(POLL_INTERVAL, move || {
        let fetched = sway.borrow_mut().tree_snapshot();
        match fetched {
            Ok(snapshot) => {
                if differ.observe(snapshot) {
                    registry.borrow().dispatch_refresh();
                }
            }
            Err(err) => log::warn!("Skipping poll tick, couldn't fetch tree snapshot: {:?}", err),
        }
        glib::Continue(true)
    });
}
