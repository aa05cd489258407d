//! Mock edge source for testing and development.

mod edge;

pub use edge::{MockEdgeHandle, MockEdgeSource};
