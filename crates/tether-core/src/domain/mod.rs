//! Domain model (ids, state, errors, event payloads, naming rules).

pub mod errors;
pub mod events;
pub mod ids;
pub mod method_name;
pub mod state;

pub use self::errors::RelayError;
pub use self::events::{CollectionAction, CollectionChange, Event, EventArgs, Sender};
pub use self::ids::SlotId;
pub use self::method_name::{InvalidMethodName, MethodName};
pub use self::state::RelayState;
