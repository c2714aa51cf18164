//! Ports - seams to the outside world.
//!
//! Only time is abstracted today; the lifecycle engine itself is exposed
//! through [`crate::queue::JobLifecycle`].

pub mod clock;

pub use self::clock::{Clock, FixedClock, SystemClock};
