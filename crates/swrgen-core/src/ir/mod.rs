pub mod operations;
pub mod path;
pub mod schemas;
pub mod types;

pub use operations::*;
pub use path::{PathPart, PathSegment, PathTemplate};
pub use schemas::*;
pub use types::{IrInfo, IrServer, IrSpec, NormalizedName};
