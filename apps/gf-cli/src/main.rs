use clap::{Parser, Subcommand};
use gf_circuit::{parse_network, two_loop_formulation};
use gf_core::units::{m, mm};
use gf_pipes::{Fluid, Pipe, PipeLoop, PipeNetwork};
use gf_steam::{PropertySpec, RankineCycle, SteamTables};
use std::path::PathBuf;
use thiserror::Error;

/// Demo circuit solved when no input file is given.
const DEMO_CIRCUIT: &str = include_str!("../data/two_loop_network.txt");

#[derive(Parser)]
#[command(name = "gf-cli")]
#[command(about = "GridFlow CLI - circuit, pipe-network, and steam cycle solvers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a resistive circuit for its loop currents
    Circuit {
        /// Path to a circuit description file (omit for the built-in demo)
        path: Option<PathBuf>,
    },
    /// Solve the demonstration pipe network for volumetric flows
    Pipes,
    /// Evaluate an ideal Rankine cycle
    Rankine {
        /// Condenser pressure in kPa
        #[arg(long, default_value_t = 8.0)]
        p_low: f64,
        /// Boiler pressure in kPa
        #[arg(long, default_value_t = 8000.0)]
        p_high: f64,
        /// Turbine inlet temperature in C (omit for saturated vapor)
        #[arg(long)]
        t_high: Option<f64>,
    },
    /// Resolve a steam state from pressure plus one other property
    Steam {
        /// Pressure in kPa
        #[arg(long)]
        pressure: f64,
        /// Temperature in C
        #[arg(long)]
        temperature: Option<f64>,
        /// Vapor quality in [0, 1]
        #[arg(long)]
        quality: Option<f64>,
        /// Specific enthalpy in kJ/kg
        #[arg(long)]
        enthalpy: Option<f64>,
        /// Specific entropy in kJ/(kg K)
        #[arg(long)]
        entropy: Option<f64>,
        /// Specific volume in m^3/kg
        #[arg(long)]
        volume: Option<f64>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Circuit(#[from] gf_circuit::CircuitError),
    #[error(transparent)]
    Pipes(#[from] gf_pipes::PipeError),
    #[error(transparent)]
    Steam(#[from] gf_steam::SteamError),
    #[error("{0}")]
    Usage(String),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Circuit { path } => cmd_circuit(path.as_deref()),
        Commands::Pipes => cmd_pipes(),
        Commands::Rankine {
            p_low,
            p_high,
            t_high,
        } => cmd_rankine(p_low, p_high, t_high),
        Commands::Steam {
            pressure,
            temperature,
            quality,
            enthalpy,
            entropy,
            volume,
        } => cmd_steam(pressure, temperature, quality, enthalpy, entropy, volume),
    };

    if let Err(err) = outcome {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn cmd_circuit(path: Option<&std::path::Path>) -> Result<(), CliError> {
    let mut net = match path {
        Some(p) => gf_circuit::load_network(p)?,
        None => parse_network(DEMO_CIRCUIT)?,
    };

    let guess = vec![1.0; 3];
    net.solve_currents(two_loop_formulation, &guess)?;

    println!("Loop currents:");
    for r in &net.resistors {
        println!("  I({}) = {:.4} A", r.name, r.current.value);
    }
    println!("Loop voltage checks:");
    for (lp, dv) in net.loops.iter().zip(net.loop_voltage_drops()?) {
        println!("  sum(dV) around {} = {:.2e} V", lp.name, dv.value);
    }
    Ok(())
}

fn cmd_pipes() -> Result<(), CliError> {
    let mut net = demo_pipe_network();
    net.find_flow_rates(&[30.0, 30.0, 10.0, 10.0, 10.0])?;

    println!("Pipe flows:");
    for pipe in &net.pipes {
        println!(
            "  {}: Q = {:.3} L/s, v = {:.3} m/s, Re = {:.0}",
            pipe.name(),
            pipe.flow_lps,
            pipe.velocity(),
            pipe.reynolds(&net.fluid)
        );
    }
    println!("Node balances:");
    for (node, q) in net.nodes.iter().zip(net.node_net_flows()) {
        println!("  net flow into {} = {:.2e} L/s", node.name, q);
    }
    println!("Loop head-loss checks:");
    for (lp, hl) in net.loops.iter().zip(net.loop_head_losses()?) {
        println!("  loop {}: {:.2e} m", lp.name, hl);
    }
    Ok(())
}

/// Four junctions, five pipes, 60 L/s through-flow.
fn demo_pipe_network() -> PipeNetwork {
    let mut net = PipeNetwork::new(Fluid::water());
    let rough = mm(0.25);
    net.add_pipe(Pipe::new("a", "b", m(250.0), mm(300.0), rough));
    net.add_pipe(Pipe::new("a", "c", m(100.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("b", "c", m(125.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("b", "d", m(100.0), mm(200.0), rough));
    net.add_pipe(Pipe::new("c", "d", m(125.0), mm(200.0), rough));
    net.build_nodes();
    for (node, lps) in [("a", 60.0), ("b", -15.0), ("c", -15.0), ("d", -30.0)] {
        net.set_external_flow(node, lps)
            .unwrap_or_else(|_| unreachable!("demo nodes were just built"));
    }
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

fn cmd_rankine(p_low: f64, p_high: f64, t_high: Option<f64>) -> Result<(), CliError> {
    let tables = SteamTables::embedded();
    let cycle = match t_high {
        Some(t) => RankineCycle::with_superheat(p_low, p_high, t),
        None => RankineCycle::new(p_low, p_high),
    };
    let summary = cycle.evaluate(&tables)?;
    print!("{summary}");
    Ok(())
}

fn cmd_steam(
    pressure: f64,
    temperature: Option<f64>,
    quality: Option<f64>,
    enthalpy: Option<f64>,
    entropy: Option<f64>,
    volume: Option<f64>,
) -> Result<(), CliError> {
    let mut specs: Vec<PropertySpec> = Vec::new();
    if let Some(t) = temperature {
        specs.push(PropertySpec::Temperature(t));
    }
    if let Some(x) = quality {
        specs.push(PropertySpec::Quality(x));
    }
    if let Some(h) = enthalpy {
        specs.push(PropertySpec::Enthalpy(h));
    }
    if let Some(s) = entropy {
        specs.push(PropertySpec::Entropy(s));
    }
    if let Some(v) = volume {
        specs.push(PropertySpec::SpecificVolume(v));
    }
    let [spec] = specs.as_slice() else {
        return Err(CliError::Usage(
            "give exactly one of --temperature, --quality, --enthalpy, --entropy, --volume"
                .to_string(),
        ));
    };

    let tables = SteamTables::embedded();
    let state = tables.resolve(pressure, *spec)?.with_name("State 1");
    print!("{state}");
    Ok(())
}
