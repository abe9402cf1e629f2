//! End-to-end pipe-network flow solution.

use gf_pipes::{Fluid, Pipe, PipeLoop, PipeNetwork};
use gf_core::units::{m, mm};

/// Two-loop demonstration network: four junctions, five pipes.
/// 60 L/s enters at a; 15, 15, and 30 L/s leave at b, c, and d.
fn demo_network() -> PipeNetwork {
    let mut net = PipeNetwork::new(Fluid::water());
    let rough = mm(0.25);
    net.add_pipe(Pipe::new("a", "b", m(250.0), mm(300.0), rough));
    net.add_pipe(Pipe::new("a", "c", m(100.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("b", "c", m(125.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("b", "d", m(100.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("c", "d", m(125.0), mm(200.0), rough));
    net.build_nodes();
    net.set_external_flow("a", 60.0).unwrap();
    net.set_external_flow("b", -15.0).unwrap();
    net.set_external_flow("c", -15.0).unwrap();
    net.set_external_flow("d", -30.0).unwrap();
    net.add_loop(PipeLoop::new(
        "A",
        vec!["a-b".into(), "b-c".into(), "a-c".into()],
    ));
    net.add_loop(PipeLoop::new(
        "B",
        vec!["b-d".into(), "c-d".into(), "b-c".into()],
    ));
    net
}

#[test]
fn solved_flows_balance_every_node() {
    let mut net = demo_network();
    // First two pipes seeded at 30 L/s, the rest nominal
    let flows = net
        .find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])
        .unwrap();
    assert_eq!(flows.len(), 5);

    // Continuity at every node, including the one excluded from the
    // residual vector
    for (node, q) in net.nodes.iter().zip(net.node_net_flows()) {
        assert!(q.abs() < 1e-6, "net flow into node {} is {}", node.name, q);
    }
}

#[test]
fn global_mass_conservation() {
    let mut net = demo_network();
    net.find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])
        .unwrap();

    let total: f64 = net.node_net_flows().iter().sum();
    assert!(total.abs() < 1e-6, "global imbalance {total}");
}

#[test]
fn loop_head_losses_vanish_at_solution() {
    let mut net = demo_network();
    net.find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])
        .unwrap();

    for hl in net.loop_head_losses().unwrap() {
        assert!(hl.abs() < 1e-6, "loop head loss {hl}");
    }
}

#[test]
fn converged_flows_are_written_into_pipes() {
    let mut net = demo_network();
    let flows = net
        .find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])
        .unwrap();
    for (pipe, q) in net.pipes.iter().zip(&flows) {
        assert_eq!(pipe.flow_lps, *q);
    }
}

#[test]
fn inflow_splits_between_parallel_paths() {
    let mut net = demo_network();
    net.find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])
        .unwrap();

    // Everything entering at a leaves through a-b and a-c
    let q_ab = net.pipe_by_name("a-b").unwrap().flow_lps;
    let q_ac = net.pipe_by_name("a-c").unwrap().flow_lps;
    assert!((q_ab + q_ac - 60.0).abs() < 1e-6);
    assert!(q_ab > 0.0 && q_ac > 0.0);
}
