//! Line-oriented network-description parser.
//!
//! Format: blocks introduced by a line containing `resistor`, `source`, or
//! `loop`; subsequent `key = value` lines belong to the block until the
//! next block keyword or end of file. Keywords are case-insensitive,
//! `#` lines and blank lines are skipped, unrecognized lines are ignored.

use crate::element::{CircuitLoop, Resistor, VoltageSource};
use crate::error::{CircuitError, CircuitResult};
use crate::network::ResistorNetwork;
use gf_core::units::{ohm, volt};
use std::path::Path;
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Resistor,
    Source,
    Loop,
}

fn block_kind(line: &str) -> Option<BlockKind> {
    if line.contains("resistor") {
        Some(BlockKind::Resistor)
    } else if line.contains("source") {
        Some(BlockKind::Source)
    } else if line.contains("loop") {
        Some(BlockKind::Loop)
    } else {
        None
    }
}

/// `key = value` split; returns None for lines without `=`.
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (k, v) = line.split_once('=')?;
    Some((k.trim(), v.trim()))
}

fn parse_number(value: &str, line: usize) -> CircuitResult<f64> {
    value.parse::<f64>().map_err(|_| CircuitError::Parse {
        line,
        what: format!("expected a number, got '{value}'"),
    })
}

/// Parse a network description from text.
pub fn parse_network(text: &str) -> CircuitResult<ResistorNetwork> {
    let lines: Vec<String> = text.lines().map(|l| l.trim().to_lowercase()).collect();
    let mut net = ResistorNetwork::new();

    let mut idx = 0;
    while idx < lines.len() {
        let line = &lines[idx];
        if line.is_empty() || line.starts_with('#') {
            idx += 1;
            continue;
        }
        match block_kind(line) {
            Some(kind) => {
                debug!(line = idx + 1, "found block");
                idx = parse_block(&lines, idx + 1, kind, &mut net)?;
            }
            None => {
                // Unrecognized top-level line: ignored
                idx += 1;
            }
        }
    }
    Ok(net)
}

/// Consume one block's key/value lines. Returns the index of the line
/// that ended the block (next block keyword or EOF).
fn parse_block(
    lines: &[String],
    start: usize,
    kind: BlockKind,
    net: &mut ResistorNetwork,
) -> CircuitResult<usize> {
    let mut name: Option<String> = None;
    let mut number: Option<f64> = None;
    let mut source_kind = String::from("ideal");
    let mut nodes: Vec<String> = Vec::new();

    let mut idx = start;
    while idx < lines.len() {
        let line = &lines[idx];
        if line.is_empty() || line.starts_with('#') {
            idx += 1;
            continue;
        }
        if block_kind(line).is_some() {
            break;
        }
        if let Some((key, value)) = key_value(line) {
            // Line numbers are 1-based in diagnostics
            let line_no = idx + 1;
            if key.contains("name") {
                name = Some(value.to_string());
            } else if key.contains("resistance") || key.contains("value") {
                number = Some(parse_number(value, line_no)?);
            } else if key.contains("type") {
                source_kind = value.to_string();
            } else if key.contains("nodes") {
                nodes = value
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect();
            }
            // Unrecognized keys are ignored
        }
        idx += 1;
    }

    let name = name.ok_or_else(|| CircuitError::Parse {
        line: start,
        what: "block is missing a name".to_string(),
    })?;

    match kind {
        BlockKind::Resistor => {
            let r = number.ok_or_else(|| CircuitError::Parse {
                line: start,
                what: format!("resistor '{name}' is missing a resistance"),
            })?;
            debug!(name = %name, resistance = r, "parsed resistor");
            net.resistors.push(Resistor::new(name, ohm(r)));
        }
        BlockKind::Source => {
            let v = number.ok_or_else(|| CircuitError::Parse {
                line: start,
                what: format!("source '{name}' is missing a value"),
            })?;
            debug!(name = %name, voltage = v, "parsed source");
            net.sources
                .push(VoltageSource::new(name, volt(v), source_kind));
        }
        BlockKind::Loop => {
            if nodes.len() < 3 {
                return Err(CircuitError::Parse {
                    line: start,
                    what: format!("loop '{name}' needs at least 3 nodes"),
                });
            }
            debug!(name = %name, nodes = nodes.len(), "parsed loop");
            net.loops.push(CircuitLoop::new(name, nodes));
        }
    }
    Ok(idx)
}

/// Read and parse a network description file.
pub fn load_network(path: &Path) -> CircuitResult<ResistorNetwork> {
    let text = std::fs::read_to_string(path).map_err(|source| CircuitError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_network(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NETWORK: &str = "
# two-loop demonstration circuit
Resistor
  name = ad
  resistance = 4
resistor
  name = bc
  resistance = 2

resistor
  name = cd
  resistance = 5
resistor
  name = ce
  resistance = 10
Source
  name = ab
  value = 32
  type = ideal
source
  name = de
  value = 0
  type = wire
Loop
  name = L1
  nodes = a, b, c, d
loop
  name = L2
  nodes = d,c,e
";

    #[test]
    fn parses_all_blocks() {
        let net = parse_network(NETWORK).unwrap();
        assert_eq!(net.resistors.len(), 4);
        assert_eq!(net.sources.len(), 2);
        assert_eq!(net.loops.len(), 2);
    }

    #[test]
    fn node_lists_are_whitespace_stripped() {
        let net = parse_network(NETWORK).unwrap();
        assert_eq!(net.loops[0].nodes, vec!["a", "b", "c", "d"]);
        assert_eq!(net.loops[1].nodes, vec!["d", "c", "e"]);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        let net = parse_network("RESISTOR\nNAME = xy\nRESISTANCE = 7\n").unwrap();
        assert_eq!(net.resistors[0].name, "xy");
        assert!((net.resistors[0].resistance.value - 7.0).abs() < 1e-12);
    }

    #[test]
    fn comments_and_unknown_lines_ignored() {
        let net = parse_network(
            "# header\nresistor\n  # inline comment\n  name = ad\n  color = red\n  resistance = 1\n",
        )
        .unwrap();
        assert_eq!(net.resistors.len(), 1);
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        let err = parse_network("resistor\nname = ad\nresistance = abc\n").unwrap_err();
        assert!(matches!(err, CircuitError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_network(Path::new("/no/such/network.txt")).unwrap_err();
        assert!(matches!(err, CircuitError::Io { .. }));
    }
}
