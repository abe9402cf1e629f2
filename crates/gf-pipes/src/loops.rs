//! Closed loops for head-loss balancing.

/// A loop through the network, listed as pipe names in traversal order.
///
/// Traversal begins at the start node of the first pipe and moves in that
/// pipe's positive direction, so a loop can be written clockwise or
/// counter-clockwise depending on which pipe leads.
#[derive(Debug, Clone)]
pub struct PipeLoop {
    pub name: String,
    pub pipes: Vec<String>,
}

impl PipeLoop {
    pub fn new(name: impl Into<String>, pipes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pipes,
        }
    }
}
