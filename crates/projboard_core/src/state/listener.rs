//! Observer registry keyed by project status.

use crate::model::project::ProjectStatus;
use std::cell::RefCell;
use std::rc::Rc;

/// Callback receiving an owned snapshot of the records matching its filter.
pub type ListenerFn<T> = Rc<dyn Fn(Vec<T>)>;

/// One registered observer.
pub struct Listener<T> {
    pub filter: ProjectStatus,
    callback: ListenerFn<T>,
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter,
            callback: Rc::clone(&self.callback),
        }
    }
}

/// Registration-ordered list of `(filter, callback)` pairs.
///
/// Dispatch works on a cloned list of handles, so callbacks may register
/// further observers or trigger nested dispatches without hitting a
/// `RefCell` borrow conflict.
pub struct ListenerRegistry<T> {
    listeners: RefCell<Vec<Listener<T>>>,
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }
}

impl<T: Clone> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one observer. It is not invoked until the next dispatch.
    pub fn register(&self, filter: ProjectStatus, callback: impl Fn(Vec<T>) + 'static) {
        self.listeners.borrow_mut().push(Listener {
            filter,
            callback: Rc::new(callback),
        });
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Invokes every observer with a fresh copy of the slice `select`
    /// returns for its filter. Returns the number of callbacks invoked.
    pub fn dispatch<'a>(&self, select: impl Fn(ProjectStatus) -> &'a [T]) -> usize
    where
        T: 'a,
    {
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            (listener.callback)(select(listener.filter).to_vec());
        }
        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::ListenerRegistry;
    use crate::model::project::ProjectStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatch_follows_registration_order_and_filters() {
        let registry = ListenerRegistry::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for (tag, filter) in [
            ("first", ProjectStatus::Finished),
            ("second", ProjectStatus::Active),
            ("third", ProjectStatus::Finished),
        ] {
            let seen = Rc::clone(&seen);
            registry.register(filter, move |values| seen.borrow_mut().push((tag, values)));
        }

        let active = [1, 2];
        let finished = [9];
        let invoked = registry.dispatch(|status| match status {
            ProjectStatus::Active => &active[..],
            ProjectStatus::Finished => &finished[..],
        });

        assert_eq!(invoked, 3);
        assert_eq!(
            *seen.borrow(),
            vec![("first", vec![9]), ("second", vec![1, 2]), ("third", vec![9])]
        );
    }

    #[test]
    fn callbacks_may_register_more_listeners() {
        let registry = Rc::new(ListenerRegistry::<u32>::new());
        let inner = Rc::clone(&registry);
        registry.register(ProjectStatus::Active, move |_| {
            inner.register(ProjectStatus::Active, |_| {});
        });

        registry.dispatch(|_| &[][..]);
        assert_eq!(registry.len(), 2);
    }
}
