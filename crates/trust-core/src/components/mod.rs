//! Simulation Components
//!
//! Beliefs, nodes, and the population graph that owns them.

pub mod belief;
pub mod node;
pub mod population;

pub use belief::*;
pub use node::*;
pub use population::*;
