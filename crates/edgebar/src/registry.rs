use std::rc::Rc;

use anyhow::Result;

use crate::print_result_err;

/// Implemented by modules that re-render themselves from live compositor
/// state when a tree change is detected.
pub trait RefreshTasks {
    fn refresh(&self) -> Result<()>;
}

/// Implemented by modules owning a popup window that must be forced closed
/// when the tree underneath it changes.
pub trait PopupHandle {
    fn popup_visible(&self) -> bool;
    fn hide_popup(&self);
}

/// Process-wide collections of live module handles, built once during panel
/// composition and consulted by the refresh dispatcher. Passed around
/// explicitly; never a hidden global. Handles are appended during startup
/// and never pruned, since panels are not torn down at runtime.
#[derive(Default)]
pub struct RegistryContext {
    taskbars: Vec<Rc<dyn RefreshTasks>>,
    controls: Vec<Rc<dyn PopupHandle>>,
}

impl RegistryContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_taskbar(&mut self, handle: Rc<dyn RefreshTasks>) {
        self.taskbars.push(handle);
    }

    pub fn register_controls(&mut self, handle: Rc<dyn PopupHandle>) {
        self.controls.push(handle);
    }

    /// Broadcast one refresh event: every taskbar re-renders, every popup
    /// that is currently visible gets hidden. A failing handle never stops
    /// dispatch to the remaining ones; order across handles is unspecified.
    pub fn dispatch_refresh(&self) {
        for taskbar in &self.taskbars {
            print_result_err!("refreshing taskbar", taskbar.refresh());
        }
        for controls in &self.controls {
            if controls.popup_visible() {
                controls.hide_popup();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingTaskbar {
        refreshes: Cell<usize>,
        fail: bool,
    }

    impl RefreshTasks for CountingTaskbar {
        fn refresh(&self) -> Result<()> {
            self.refreshes.set(self.refreshes.get() + 1);
            if self.fail {
                return Err(anyhow!("taskbar render failed"));
            }
            Ok(())
        }
    }

    struct FakePopup {
        visible: Cell<bool>,
        hides: Cell<usize>,
    }

    impl FakePopup {
        fn new(visible: bool) -> Self {
            FakePopup { visible: Cell::new(visible), hides: Cell::new(0) }
        }
    }

    impl PopupHandle for FakePopup {
        fn popup_visible(&self) -> bool {
            self.visible.get()
        }

        fn hide_popup(&self) {
            self.visible.set(false);
            self.hides.set(self.hides.get() + 1);
        }
    }

    #[test]
    fn dispatch_fans_out_to_every_taskbar() {
        let mut registry = RegistryContext::new();
        let first = Rc::new(CountingTaskbar::default());
        let second = Rc::new(CountingTaskbar::default());
        registry.register_taskbar(first.clone());
        registry.register_taskbar(second.clone());

        registry.dispatch_refresh();

        assert_eq!(first.refreshes.get(), 1);
        assert_eq!(second.refreshes.get(), 1);
    }

    #[test]
    fn one_failing_refresh_does_not_stop_the_rest() {
        let mut registry = RegistryContext::new();
        let failing = Rc::new(CountingTaskbar { refreshes: Cell::new(0), fail: true });
        let healthy = Rc::new(CountingTaskbar::default());
        registry.register_taskbar(failing.clone());
        registry.register_taskbar(healthy.clone());

        registry.dispatch_refresh();

        assert_eq!(failing.refreshes.get(), 1);
        assert_eq!(healthy.refreshes.get(), 1);
    }

    #[test]
    fn only_visible_popups_get_hidden() {
        let mut registry = RegistryContext::new();
        let visible = Rc::new(FakePopup::new(true));
        let hidden = Rc::new(FakePopup::new(false));
        registry.register_controls(visible.clone());
        registry.register_controls(hidden.clone());

        registry.dispatch_refresh();

        assert!(!visible.popup_visible());
        assert_eq!(visible.hides.get(), 1);
        assert_eq!(hidden.hides.get(), 0);
    }
}
