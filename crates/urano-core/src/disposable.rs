use crate::state::Subscription;

/// Scoped release of resources acquired on mount.
///
/// Each registered closure runs exactly once, in reverse registration order,
/// either on [`Disposables::dispose`] or when the value is dropped.
#[derive(Default)]
pub struct Disposables {
    on_dispose: Vec<Box<dyn FnOnce()>>,
}

impl Disposables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_dispose(&mut self, callback: impl FnOnce() + 'static) {
        self.on_dispose.push(Box::new(callback));
    }

    pub fn hold(&mut self, subscription: Subscription) {
        self.on_dispose(move || subscription.unsubscribe());
    }

    pub fn len(&self) -> usize {
        self.on_dispose.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_dispose.is_empty()
    }

    pub fn dispose(&mut self) {
        while let Some(callback) = self.on_dispose.pop() {
            callback();
        }
    }
}

impl Drop for Disposables {
    fn drop(&mut self) {
        self.dispose();
    }
}
