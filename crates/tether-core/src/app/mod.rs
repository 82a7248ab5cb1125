//! App - アプリケーション層
//!
//! relay / typed を組み合わせて、購読する側・配送する側の API を提供します。
//!
//! # 主要コンポーネント
//! - **RelayBuilder**: リレーの構築（Fail-fast）
//! - **Publisher**: 購読スロットの所有と配送
//! - **PublisherConfig**: Publisher の設定
//! - **SlotCounts**: スロットの集計

pub mod builder;
pub mod config;
pub mod publisher;
pub mod status;

pub use self::builder::{BuildError, RelayBuilder};
pub use self::config::PublisherConfig;
pub use self::publisher::Publisher;
pub use self::status::SlotCounts;
