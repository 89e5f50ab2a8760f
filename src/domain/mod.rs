//! Domain layer: outline reconstruction and serialization
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod outline;
pub mod row;
pub mod serializer;

pub use builder::build_outline;
pub use outline::{OutlineIter, OutlineNode};
pub use row::{locate_payload, split_payload, Grid, Row, RowPayload};
pub use serializer::{serialize_outline, unique_key, Choice, Choices};
