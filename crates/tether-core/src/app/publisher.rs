//! Publisher - 購読スロットの所有者
//!
//! Publisher はリレーを所有し、emit で各スロットへ配送します。
//! 購読者が回収されてもスロットは自動では消えません。
//! `unsubscribe` / `prune_expired`（または設定による emit 後の prune）で明示的に消します。

use std::any::Any;
use std::sync::Arc;

use tracing::{debug, trace};

use super::config::PublisherConfig;
use super::status::SlotCounts;
use crate::domain::errors::RelayError;
use crate::domain::ids::SlotId;
use crate::domain::state::RelayState;
use crate::relay::WeakRelay;
use crate::typed::MethodDescriptor;

struct Slot<A, R> {
    id: SlotId,
    relay: WeakRelay<A, R>,
}

/// An event source holding weak callback slots.
///
/// Slots are dispatched in subscription order.
pub struct Publisher<A, R = ()> {
    config: PublisherConfig,
    slots: Vec<Slot<A, R>>,
}

impl<A, R> Publisher<A, R> {
    pub fn new() -> Self {
        Self::with_config(PublisherConfig::default())
    }

    pub fn with_config(config: PublisherConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
        }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    pub fn subscribe(&mut self, relay: WeakRelay<A, R>) -> SlotId {
        let id = SlotId::generate();
        debug!(
            publisher = %self.config.name,
            slot = %id,
            method = relay.method_name(),
            "subscribed"
        );
        self.slots.push(Slot { id, relay });
        id
    }

    pub fn subscribe_method<T: Any + Send + Sync>(
        &mut self,
        target: &Arc<T>,
        method: MethodDescriptor<T, A, R>,
    ) -> SlotId
    where
        A: 'static,
        R: 'static,
    {
        self.subscribe(WeakRelay::new(target, method))
    }

    /// Returns `false` if no slot has this id.
    pub fn unsubscribe(&mut self, id: SlotId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.id != id);
        let removed = self.slots.len() != before;
        if removed {
            debug!(publisher = %self.config.name, slot = %id, "unsubscribed");
        }
        removed
    }

    /// Remove every slot whose relay calls into `target`.
    pub fn unsubscribe_target<T: Any + Send + Sync>(&mut self, target: &Arc<T>) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| !slot.relay.targets(target));
        let removed = before - self.slots.len();
        if removed > 0 {
            debug!(publisher = %self.config.name, removed, "unsubscribed target");
        }
        removed
    }

    /// Remove slots whose subscriber has been reclaimed.
    pub fn prune_expired(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| slot.relay.is_alive());
        let removed = before - self.slots.len();
        if removed > 0 {
            debug!(publisher = %self.config.name, removed, "pruned expired slots");
        }
        removed
    }

    pub fn relay(&self, id: SlotId) -> Option<&WeakRelay<A, R>> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &slot.relay)
    }

    pub fn slot_ids(&self) -> Vec<SlotId> {
        self.slots.iter().map(|slot| slot.id).collect()
    }

    pub fn counts(&self) -> SlotCounts {
        let mut counts = SlotCounts::default();
        for slot in &self.slots {
            match slot.relay.state() {
                RelayState::Alive => counts.alive += 1,
                RelayState::Expired => counts.expired += 1,
            }
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<A: Clone, R: Default> Publisher<A, R> {
    /// Dispatch `args` to every slot and collect the results.
    ///
    /// Expired slots contribute `R::default()`. The first rebinding failure
    /// stops the emit and is returned; slots after it are not called.
    pub fn emit(&mut self, args: A) -> Result<Vec<R>, RelayError> {
        let mut results = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            results.push(slot.relay.dispatch(args.clone())?);
        }
        trace!(
            publisher = %self.config.name,
            slots = self.slots.len(),
            "emitted"
        );
        if self.config.prune_expired_on_emit {
            self.prune_expired();
        }
        Ok(results)
    }
}

impl<A, R> Default for Publisher<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method;
    use crate::relay::TargetRef;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Listener {
        id: usize,
        calls: Arc<AtomicUsize>,
    }

    impl Listener {
        fn new(id: usize, calls: &Arc<AtomicUsize>) -> Arc<Self> {
            Arc::new(Self {
                id,
                calls: Arc::clone(calls),
            })
        }

        fn on_value(&self, value: usize) -> usize {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.id * 100 + value
        }
    }

    struct Unrelated;

    #[test]
    fn emit_reaches_subscribers_in_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);
        let b = Listener::new(2, &calls);

        let mut publisher = Publisher::new();
        publisher.subscribe_method(&a, method!(Listener::on_value));
        publisher.subscribe_method(&b, method!(Listener::on_value));

        assert_eq!(publisher.emit(5), Ok(vec![105, 205]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropped_subscribers_yield_defaults_and_stay_until_pruned() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);
        let b = Listener::new(2, &calls);

        let mut publisher = Publisher::new();
        publisher.subscribe_method(&a, method!(Listener::on_value));
        publisher.subscribe_method(&b, method!(Listener::on_value));
        drop(a);

        assert_eq!(publisher.emit(1), Ok(vec![0, 201]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(publisher.counts(), SlotCounts { alive: 1, expired: 1 });

        assert_eq!(publisher.prune_expired(), 1);
        assert_eq!(publisher.len(), 1);
        assert_eq!(publisher.emit(1), Ok(vec![201]));
    }

    #[rstest]
    #[case::keep(false, 2)]
    #[case::prune(true, 1)]
    fn prune_on_emit_follows_config(#[case] prune: bool, #[case] slots_after_emit: usize) {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);
        let b = Listener::new(2, &calls);

        let mut publisher = Publisher::with_config(PublisherConfig {
            name: "values".to_string(),
            prune_expired_on_emit: prune,
        });
        publisher.subscribe_method(&a, method!(Listener::on_value));
        publisher.subscribe_method(&b, method!(Listener::on_value));
        drop(b);

        publisher.emit(0).unwrap();
        assert_eq!(publisher.len(), slots_after_emit);
    }

    #[test]
    fn unsubscribe_by_slot_and_by_target() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);
        let b = Listener::new(2, &calls);

        let mut publisher = Publisher::new();
        let first = publisher.subscribe_method(&a, method!(Listener::on_value));
        publisher.subscribe_method(&b, method!(Listener::on_value));
        publisher.subscribe_method(&b, method!(Listener::on_value));

        assert!(publisher.relay(first).is_some());
        assert!(publisher.unsubscribe(first));
        assert!(!publisher.unsubscribe(first));
        assert!(publisher.relay(first).is_none());

        assert_eq!(publisher.unsubscribe_target(&b), 2);
        assert!(publisher.is_empty());
        assert_eq!(publisher.unsubscribe_target(&b), 0);
    }

    #[test]
    fn rebind_failure_aborts_emit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);
        let unrelated = Arc::new(Unrelated);

        let mut publisher: Publisher<usize, usize> = Publisher::new();
        publisher.subscribe(WeakRelay::from_parts(
            TargetRef::of(&unrelated),
            Arc::new(method!(Listener::on_value)),
        ));
        publisher.subscribe_method(&a, method!(Listener::on_value));

        let err = publisher.emit(1).unwrap_err();
        assert!(matches!(err, RelayError::Rebind { method: "on_value", .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn slot_ids_follow_subscription_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = Listener::new(1, &calls);

        let mut publisher = Publisher::new();
        let first = publisher.subscribe_method(&a, method!(Listener::on_value));
        let second = publisher.subscribe_method(&a, method!(Listener::on_value));

        assert_eq!(publisher.slot_ids(), vec![first, second]);
        assert_eq!(publisher.counts().total(), 2);
    }
}
