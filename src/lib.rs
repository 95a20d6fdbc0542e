//! Cuts openings in walls where ducts and pipes pass through them.
//!
//! [`locate`] is the core: it casts a ray along a straight conduit run and
//! turns the wall hits into [`PenetrationRequest`]s. [`AddHoles`] drives it
//! against a modeling host described by the traits in [`host`];
//! [`model::Application`] is an in-memory host.

pub mod command;
pub mod error;
pub mod geometry;
pub mod host;
pub mod locate;
pub mod math;
pub mod model;
pub mod placement;

pub use command::{AddHoles, HoleReport, HoleSettings};
pub use error::{HolecutError, Result};
pub use locate::{locate, ConduitSegment, PenetrationRequest, SurfaceHit};
