//! Core types for the choreographed graph.

pub mod edge;
pub mod frame;
pub mod graph;
pub mod node;
pub mod point;

pub use edge::{Edge, EdgeId};
pub use frame::{EdgeSprite, NodeSprite, RenderFrame};
pub use graph::{Graph, TopologyError};
pub use node::{Node, NodeId};
pub use point::Point;
