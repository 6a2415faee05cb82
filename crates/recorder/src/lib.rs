//! PSR Snapshot Recorder
//!
//! Interactive frame-by-frame labeling of per-component assembly states.
//! The recorder walks a recording's frames, keeps a working state vector
//! that the operator edits, and records a snapshot whenever an edit
//! actually changes the vector.
//!
//! - **Session:** synchronous command-processing state machine
//! - **Channel:** blocking input seam plus the read-eval loop
//! - **Console:** line-oriented terminal front end
//! - **Runner:** per-recording discovery, session, and output

pub mod channel;
pub mod command;
pub mod console;
pub mod frames;
pub mod runner;
pub mod session;

pub use channel::{run_session, InputChannel, SessionEnd};
pub use command::{Command, EditRequest};
pub use session::{LabelingSession, Notice, Step};
