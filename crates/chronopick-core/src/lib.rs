//! Core systems for chronopick.
//!
//! This crate provides the plumbing the picker widget is built on:
//!
//! - **Signal/Slot System**: Type-safe change/select/toggle notifications
//! - **Property System**: Reactive values with change detection
//! - **Controllable State**: The controlled/uncontrolled ownership adapter
//! - **Deferred Queue**: Microtask-style work that runs after event dispatch
//!
//! # Signal/Slot Example
//!
//! ```
//! use chronopick_core::Signal;
//!
//! let toggled = Signal::<bool>::new();
//!
//! let conn_id = toggled.connect(|open| {
//!     println!("Open: {}", open);
//! });
//!
//! toggled.emit(true);
//! toggled.disconnect(conn_id);
//! ```
//!
//! # Controllable Example
//!
//! ```
//! use chronopick_core::Controllable;
//!
//! // Uncontrolled: proposals are stored.
//! let open = Controllable::uncontrolled(false);
//! assert!(open.propose(true));
//! assert!(open.get());
//!
//! // Controlled: proposals are only forwarded; the owner reflects the value.
//! let open = Controllable::controlled(false);
//! assert!(!open.propose(true));
//! assert!(!open.get());
//! open.reflect(true);
//! assert!(open.get());
//! ```

pub mod controlled;
pub mod logging;
pub mod property;
pub mod signal;
pub mod task;

pub use controlled::{Controllable, Ownership};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use task::{DeferredQueue, TaskId};
