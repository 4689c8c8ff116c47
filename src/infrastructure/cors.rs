pub mod layer;
pub mod origins;

pub use layer::build_cors;
pub use origins::{default_allowed_origins, OriginAllowList};
