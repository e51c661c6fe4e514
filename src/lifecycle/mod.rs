//! Lifecycle management.
//!
//! Ordered startup happens in `main`: config first, then subsystems, then
//! the listener. Shutdown is a broadcast signal every long-running task
//! subscribes to; Ctrl+C triggers it.

pub mod shutdown;

pub use shutdown::Shutdown;
