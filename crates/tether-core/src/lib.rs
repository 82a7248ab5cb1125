//! tether-core
//!
//! Weak callback relays: callback slots that do not keep their subscriber alive.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, state, errors, events, method_name）
//! - **ports**: 抽象化レイヤー（DynMethod）
//! - **typed**: 型付きメソッド API（MethodDescriptor, StaticMethod, MethodRegistry）
//! - **relay**: WeakRelay と各 shape の型エイリアス
//! - **app**: RelayBuilder, Publisher, PublisherConfig

pub mod app;
pub mod domain;
pub mod ports;
pub mod relay;
pub mod typed;

pub use app::{BuildError, Publisher, PublisherConfig, RelayBuilder, SlotCounts};
pub use domain::{Event, EventArgs, RelayError, RelayState, SlotId};
pub use relay::{
    ActionRelay, ActionRelay1, CollectionChangedRelay, EventRelay, EventRelayOf, FuncRelay,
    FuncRelay1, TargetRef, WeakRelay,
};
pub use typed::{MethodDescriptor, MethodRegistry, StaticMethod};
