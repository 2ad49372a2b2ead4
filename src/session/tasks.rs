use tokio::task::JoinHandle;
use tracing::debug;

/// Holds at most one background task
///
/// Installing a task aborts the one it replaces; dropping the slot aborts
/// whatever is left.
#[derive(Debug)]
pub(crate) struct TaskSlot {
    name: &'static str,
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    pub(crate) fn new(name: &'static str) -> Self {
        Self { name, handle: None }
    }

    pub(crate) fn replace(&mut self, handle: JoinHandle<()>) {
        self.cancel();
        self.handle = Some(handle);
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("Cancelling {} task", self.name);
            }
            handle.abort();
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TaskSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
