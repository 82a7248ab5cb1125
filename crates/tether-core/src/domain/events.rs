//! Events - イベント系リレーが運ぶ引数の形
//!
//! イベントハンドラ型のリレーは「送信元 + 引数」を 1 つの値として受け取ります。
//! - `Event<EventArgs>`: 引数なしの通知
//! - `Event<E>`: 任意の引数を持つ通知
//! - `Event<CollectionChange<T>>`: コレクション変更通知

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Type-erased sender of an event.
///
/// The sender is only borrowed strongly for the duration of a single emit.
pub type Sender = Arc<dyn Any + Send + Sync>;

/// Payload of the plain event shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventArgs;

/// An event as delivered to a subscriber: who raised it and what it carries.
pub struct Event<E> {
    pub sender: Option<Sender>,
    pub args: E,
}

impl<E> Event<E> {
    /// An event without a sender.
    pub fn new(args: E) -> Self {
        Self { sender: None, args }
    }

    pub fn with_sender<S: Any + Send + Sync>(sender: &Arc<S>, args: E) -> Self {
        let sender: Sender = sender.clone();
        Self {
            sender: Some(sender),
            args,
        }
    }

    /// Borrow the sender as its concrete type, if it has that type.
    pub fn sender_as<S: Any>(&self) -> Option<&S> {
        self.sender.as_deref().and_then(|s| s.downcast_ref::<S>())
    }

    /// Whether `candidate` is the very object that raised this event.
    pub fn is_sent_by<S: Any + Send + Sync>(&self, candidate: &Arc<S>) -> bool {
        self.sender.as_ref().is_some_and(|s| {
            std::ptr::eq(Arc::as_ptr(s).cast::<()>(), Arc::as_ptr(candidate).cast::<()>())
        })
    }
}

impl Event<EventArgs> {
    pub fn empty() -> Self {
        Self::new(EventArgs)
    }
}

impl<E: Clone> Clone for Event<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            args: self.args.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Event<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("has_sender", &self.sender.is_some())
            .field("args", &self.args)
            .finish()
    }
}

/// Kind of change carried by a [`CollectionChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionAction {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

/// Describes how an observable collection changed.
///
/// Indices are `None` when the position is unknown to the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollectionChange<T> {
    Add {
        items: Vec<T>,
        index: Option<usize>,
    },
    Remove {
        items: Vec<T>,
        index: Option<usize>,
    },
    Replace {
        old_items: Vec<T>,
        new_items: Vec<T>,
        index: Option<usize>,
    },
    Move {
        items: Vec<T>,
        old_index: usize,
        new_index: usize,
    },
    /// The collection changed dramatically; listeners should re-read it.
    Reset,
}

impl<T> CollectionChange<T> {
    pub fn action(&self) -> CollectionAction {
        match self {
            CollectionChange::Add { .. } => CollectionAction::Add,
            CollectionChange::Remove { .. } => CollectionAction::Remove,
            CollectionChange::Replace { .. } => CollectionAction::Replace,
            CollectionChange::Move { .. } => CollectionAction::Move,
            CollectionChange::Reset => CollectionAction::Reset,
        }
    }

    /// Items that are now part of the collection.
    pub fn new_items(&self) -> &[T] {
        match self {
            CollectionChange::Add { items, .. } | CollectionChange::Move { items, .. } => items,
            CollectionChange::Replace { new_items, .. } => new_items,
            CollectionChange::Remove { .. } | CollectionChange::Reset => &[],
        }
    }

    /// Items that left the collection (or moved away from their old position).
    pub fn old_items(&self) -> &[T] {
        match self {
            CollectionChange::Remove { items, .. } | CollectionChange::Move { items, .. } => items,
            CollectionChange::Replace { old_items, .. } => old_items,
            CollectionChange::Add { .. } | CollectionChange::Reset => &[],
        }
    }
}
