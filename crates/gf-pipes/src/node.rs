//! Network junctions.

/// A junction in the pipe network.
///
/// External flow is positive into the node, negative out of it, in L/s.
/// Pipe connectivity is held by the network, not the node.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub external_flow_lps: f64,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            external_flow_lps: 0.0,
        }
    }
}
