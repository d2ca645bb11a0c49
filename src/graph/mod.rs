pub mod generators;
pub mod node;
pub mod weighted;

pub use node::Node;
pub use weighted::WeightedGraph;
