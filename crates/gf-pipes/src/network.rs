//! Pipe network assembly and flow-rate solution.

use crate::error::{PipeError, PipeResult};
use crate::fluid::Fluid;
use crate::loops::PipeLoop;
use crate::node::Node;
use crate::pipe::Pipe;
use gf_solver::{NewtonConfig, SolverError, SolverResult, newton_solve};
use nalgebra::DVector;
use tracing::debug;

/// A pipe network: pipes, nodes, loops, and the working fluid.
#[derive(Debug, Clone, Default)]
pub struct PipeNetwork {
    pub pipes: Vec<Pipe>,
    pub nodes: Vec<Node>,
    pub loops: Vec<PipeLoop>,
    pub fluid: Fluid,
}

impl PipeNetwork {
    pub fn new(fluid: Fluid) -> Self {
        Self {
            pipes: Vec::new(),
            nodes: Vec::new(),
            loops: Vec::new(),
            fluid,
        }
    }

    pub fn add_pipe(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    pub fn add_loop(&mut self, lp: PipeLoop) {
        self.loops.push(lp);
    }

    /// Create node objects from the pipe endpoints, in first-seen order.
    /// External flows default to zero; set them afterwards.
    pub fn build_nodes(&mut self) {
        for i in 0..self.pipes.len() {
            let (start, end) = (
                self.pipes[i].start().to_string(),
                self.pipes[i].end().to_string(),
            );
            if !self.nodes.iter().any(|n| n.name == start) {
                self.nodes.push(Node::new(start));
            }
            if !self.nodes.iter().any(|n| n.name == end) {
                self.nodes.push(Node::new(end));
            }
        }
    }

    /// Set the external in/out flow at a node [L/s], positive into the network.
    pub fn set_external_flow(&mut self, node: &str, lps: f64) -> PipeResult<()> {
        let n = self
            .nodes
            .iter_mut()
            .find(|n| n.name == node)
            .ok_or_else(|| PipeError::UnknownNode {
                name: node.to_string(),
            })?;
        n.external_flow_lps = lps;
        Ok(())
    }

    /// Look up a pipe by name; "a-b" and "b-a" are the same pipe.
    pub fn pipe_by_name(&self, name: &str) -> PipeResult<&Pipe> {
        let rev = reverse_pipe_name(name);
        self.pipes
            .iter()
            .find(|p| p.name() == name || p.name() == rev)
            .ok_or_else(|| PipeError::UnknownPipe {
                name: name.to_string(),
            })
    }

    /// Net flow into a node [L/s]: external flow plus signed pipe flows.
    pub fn node_net_flow(&self, node: &Node) -> f64 {
        let mut q = node.external_flow_lps;
        for p in &self.pipes {
            if p.contains_node(&node.name) {
                q += p.flow_into_node(&node.name);
            }
        }
        q
    }

    /// Net flow into every node, in node order.
    pub fn node_net_flows(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| self.node_net_flow(n)).collect()
    }

    /// Net head loss around a loop [m of fluid].
    pub fn loop_head_loss(&self, lp: &PipeLoop) -> PipeResult<f64> {
        let Some(first) = lp.pipes.first() else {
            return Ok(0.0);
        };
        let mut position = self.pipe_by_name(first)?.start().to_string();
        let mut total = 0.0;
        for name in &lp.pipes {
            let p = self.pipe_by_name(name)?;
            total += p.flow_head_loss(&position, &self.fluid);
            // step to the far end of this pipe
            position = if position != p.end() {
                p.end().to_string()
            } else {
                p.start().to_string()
            };
        }
        Ok(total)
    }

    /// Net head loss for every loop, in loop order.
    pub fn loop_head_losses(&self) -> PipeResult<Vec<f64>> {
        self.loops.iter().map(|l| self.loop_head_loss(l)).collect()
    }

    /// Residual vector for a candidate flow assignment: continuity at every
    /// node except the last (conservation over all nodes plus the loops is
    /// rank-deficient by exactly one), then the loop head losses.
    pub fn residuals(&mut self, q: &[f64]) -> PipeResult<Vec<f64>> {
        if q.len() != self.pipes.len() {
            return Err(PipeError::InvalidNetwork {
                what: format!(
                    "{} candidate flows for {} pipes",
                    q.len(),
                    self.pipes.len()
                ),
            });
        }
        for (pipe, &flow) in self.pipes.iter_mut().zip(q) {
            pipe.flow_lps = flow;
        }

        let node_count = self.nodes.len();
        let mut out: Vec<f64> = self.nodes[..node_count - 1]
            .iter()
            .map(|n| self.node_net_flow(n))
            .collect();
        out.extend(self.loop_head_losses()?);
        Ok(out)
    }

    /// Solve for the flow rate in each pipe [L/s].
    ///
    /// `guess` seeds the iteration, one entry per pipe in pipe order. On
    /// success the converged flows are left in the pipe objects and
    /// returned.
    pub fn find_flow_rates(&mut self, guess: &[f64]) -> PipeResult<Vec<f64>> {
        if self.nodes.is_empty() {
            return Err(PipeError::InvalidNetwork {
                what: "no nodes; call build_nodes first".to_string(),
            });
        }
        let unknowns = self.pipes.len();
        let equations = self.nodes.len() - 1 + self.loops.len();
        if unknowns != equations {
            return Err(PipeError::InvalidNetwork {
                what: format!(
                    "{} pipes but {} equations ({} nodes - 1 + {} loops)",
                    unknowns,
                    equations,
                    self.nodes.len(),
                    self.loops.len()
                ),
            });
        }

        let x0 = DVector::from_column_slice(guess);
        let config = NewtonConfig::default();

        let mut system = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let vals = self
                .residuals(x.as_slice())
                .map_err(SolverError::residual)?;
            Ok(DVector::from_vec(vals))
        };
        let result = newton_solve(x0, &mut system, &config)?;

        debug!(
            iterations = result.iterations,
            residual = result.residual_norm,
            "pipe network solve converged"
        );

        // Leave the network holding the converged flows.
        self.residuals(result.x.as_slice())?;
        Ok(result.x.as_slice().to_vec())
    }
}

fn reverse_pipe_name(name: &str) -> String {
    match name.split_once('-') {
        Some((a, b)) => format!("{b}-{a}"),
        None => name.to_string(),
    }
}
