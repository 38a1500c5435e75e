//! Grid geometry and deployment bounds.

pub mod geometry;
pub mod zone;

pub use geometry::*;
pub use zone::*;
