//! Structured logging facility
//!
//! - one initialization point, `init(profile)`
//! - operation boundary macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//!   carrying the canonical field keys from `netstate_core_types::schema`
//! - an in-memory capture layer for asserting on emitted events in tests
//!
//! ```rust
//! use netstate_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
