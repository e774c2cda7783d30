//! Game engine: the session loop and the derived-event pipeline.
//!
//! [`Session`] is the explicit, per-game replacement for a process-wide action
//! stream. It feeds every action through the pure reducer from
//! [`blockfall_core`], hands each snapshot to the monitors in [`pipeline`], and
//! re-queues what they emit. Timing runs on a virtual clock advanced by the
//! caller, which keeps delays deterministic under test.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Session, SessionConfig};
//! use blockfall_types::Action;
//!
//! let mut session = Session::new(SessionConfig::default());
//! session.dispatch(Action::Start);
//! session.pump(&mut ());
//! assert!(!session.state().is_paused());
//!
//! // One fall-timer period later the piece has moved down a row.
//! session.advance(500, &mut ());
//! assert_eq!(session.state().piece().y, 1);
//! ```

pub mod config;
pub mod pipeline;
pub mod session;
pub mod timeline;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::SessionConfig;
pub use pipeline::{Effect, GameOverMonitor, LineClearMonitor, LockMonitor, Pipeline};
pub use session::{ActionRecord, Session, SessionSink};
pub use timeline::{Deferred, Timeline};
