pub mod footprint;
pub mod path;
pub mod rect;

pub use footprint::{Envelope, Footprint};
pub use path::{Baffle, BaffleKind, Divider, DuctPath, PathSegment};
pub use rect::Rect;
