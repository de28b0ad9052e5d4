//! Listener teardown handles.
//!
//! Hosts return one [`Subscription`] per registered listener. Dropping it
//! (or calling [`Subscription::cancel`]) removes the listener, which lets a
//! page re-run fragment loading and re-attach navigation cleanly.

use std::fmt;

/// Owns the teardown for one registered listener.
#[must_use = "dropping a Subscription removes its listener immediately"]
pub struct Subscription {
    label: String,
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Subscription that runs `teardown` when cancelled or dropped.
    pub fn new(label: impl Into<String>, teardown: impl FnOnce() + 'static) -> Self {
        Self {
            label: label.into(),
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Subscription with nothing to tear down.
    pub fn detached(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            teardown: None,
        }
    }

    /// What this subscription listens to, for logs.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Remove the listener now.
    pub fn cancel(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("label", &self.label)
            .field("active", &self.teardown.is_some())
            .finish()
    }
}

/// A group of subscriptions torn down together.
#[derive(Debug, Default)]
pub struct SubscriptionSet {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one subscription.
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the set holds nothing.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Tear down everything, most recent first.
    pub fn clear(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            subscription.cancel();
        }
    }
}

impl Extend<Subscription> for SubscriptionSet {
    fn extend<T: IntoIterator<Item = Subscription>>(&mut self, iter: T) {
        self.subscriptions.extend(iter);
    }
}

impl Drop for SubscriptionSet {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(counter: &Rc<Cell<u32>>) -> Subscription {
        let counter = counter.clone();
        Subscription::new("click", move || counter.set(counter.get() + 1))
    }

    #[test]
    fn drop_runs_teardown_once() {
        let counter = Rc::new(Cell::new(0));
        {
            let _sub = counting(&counter);
        }
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn cancel_runs_teardown_once() {
        let counter = Rc::new(Cell::new(0));
        counting(&counter).cancel();
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn set_clear_tears_down_all() {
        let counter = Rc::new(Cell::new(0));
        let mut set = SubscriptionSet::new();
        set.extend((0..3).map(|_| counting(&counter)));
        set.push(Subscription::detached("noop"));
        assert_eq!(set.len(), 4);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(counter.get(), 3);

        drop(set);
        assert_eq!(counter.get(), 3);
    }
}
