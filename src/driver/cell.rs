use parking_lot::Mutex;

/// Cached value of a single telescope property.
///
/// Readers always get a copy, so the lock is never held across an `.await`.
#[derive(Debug, Default)]
pub(crate) struct StateCell<T>(Mutex<T>);

impl<T: Copy> StateCell<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(Mutex::new(value))
    }

    pub(crate) fn get(&self) -> T {
        *self.0.lock()
    }

    pub(crate) fn set(&self, value: T) {
        *self.0.lock() = value;
    }
}
