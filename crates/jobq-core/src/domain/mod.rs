//! Domain model (IDs, kinds, specs).

pub mod ids;
pub mod kind;
pub mod spec;

pub use ids::{ConsumerId, Id, IdMarker, JobId, ParseIdError};
pub use kind::{JobKind, UnknownKind};
pub use spec::{JobSpec, Payload};
