//! App - background loops built on the lifecycle port.

pub mod reaper_loop;

pub use self::reaper_loop::ReaperLoop;
