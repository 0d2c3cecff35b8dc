//! Placeholder fields and the per-client placeholder map

pub mod dates;
pub mod fields;
pub mod map;

pub use dates::{format_long_date, today_long};
pub use fields::PlaceholderField;
pub use map::{build_placeholder_map, PlaceholderMap, TOKEN_CLOSE, TOKEN_OPEN};
