//! Callable shapes.
//!
//! Every shape is the same [`WeakRelay`] with a different `(A, R)`.

use super::WeakRelay;
use crate::domain::events::{CollectionChange, Event, EventArgs};

/// `fn()`
pub type ActionRelay = WeakRelay<(), ()>;

/// `fn(T)`
pub type ActionRelay1<T> = WeakRelay<T, ()>;

/// `fn() -> R`; yields `R::default()` once expired.
pub type FuncRelay<R> = WeakRelay<(), R>;

/// `fn(T) -> R`; yields `R::default()` once expired.
pub type FuncRelay1<T, R> = WeakRelay<T, R>;

/// Plain event handler: sender plus empty args.
pub type EventRelay = WeakRelay<Event<EventArgs>, ()>;

/// Event handler with a typed payload.
pub type EventRelayOf<E> = WeakRelay<Event<E>, ()>;

/// Collection-changed handler.
pub type CollectionChangedRelay<T> = WeakRelay<Event<CollectionChange<T>>, ()>;
