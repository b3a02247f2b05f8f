use crate::error::{Error, Result};
use crate::graph::DirectedGraph;
use num_traits::{Float, ToPrimitive, Zero};
use std::fmt::Debug;
use std::io::{BufRead, Write};

/// Reads a graph from `src dst weight` lines (spec §6.2). Reading stops at
/// EOF or the first line that fails to parse as three whitespace-separated
/// tokens; a non-positive weight aborts the whole load, since a partially
/// loaded graph is worse than no graph. Duplicate `(src, dst)` pairs
/// accumulate their weight, per `DirectedGraph::add_edge`.
pub fn read_graph<R, W>(reader: R) -> Result<DirectedGraph<W>>
where
    R: BufRead,
    W: Float + Zero + Debug + Copy,
{
    let mut graph = DirectedGraph::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::InvalidInput(format!("line {}: {e}", line_no + 1)))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let src = tokens
            .next()
            .ok_or_else(|| Error::InvalidInput(format!("line {}: missing src", line_no + 1)))?
            .parse::<usize>()
            .map_err(|_| Error::InvalidInput(format!("line {}: bad src", line_no + 1)))?;
        let dst = tokens
            .next()
            .ok_or_else(|| Error::InvalidInput(format!("line {}: missing dst", line_no + 1)))?
            .parse::<usize>()
            .map_err(|_| Error::InvalidInput(format!("line {}: bad dst", line_no + 1)))?;
        let weight_str = tokens
            .next()
            .ok_or_else(|| Error::InvalidInput(format!("line {}: missing weight", line_no + 1)))?;
        let weight_f64: f64 = weight_str
            .parse()
            .map_err(|_| Error::InvalidInput(format!("line {}: bad weight", line_no + 1)))?;
        if weight_f64 <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "line {}: non-positive weight {weight_f64}",
                line_no + 1
            )));
        }
        let weight = W::from(weight_f64)
            .ok_or_else(|| Error::InvalidInput(format!("line {}: weight out of range", line_no + 1)))?;

        graph.add_edge(src, dst, weight);
    }

    Ok(graph)
}

/// Writes one BC value per line, in vertex-index order (spec §6.3). Negative
/// values — an artefact of the clustered driver's subtraction step — are
/// clamped to 0.
pub fn write_bc<W, Wr>(writer: &mut Wr, bc: &[W]) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    Wr: Write,
{
    for &value in bc {
        let clamped = if value < W::zero() { W::zero() } else { value };
        writeln!(writer, "{:?}", clamped.to_f64().unwrap_or(0.0))
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;
    use std::io::Cursor;

    type W = OrderedFloat<f64>;

    #[test]
    fn reads_graph_and_accumulates_duplicate_edges() {
        // Scenario E (spec §8): duplicate (0,1) weights accumulate, (2,1)
        // stands alone, giving exactly 2 distinct edges.
        let input = "0 1 2\n0 1 3\n2 1 1\n";
        let graph: DirectedGraph<W> = read_graph(Cursor::new(input)).unwrap();
        assert_eq!(graph.edge(0, 1), OrderedFloat(5.0));
        assert_eq!(graph.edge(2, 1), OrderedFloat(1.0));
        assert_eq!(graph.edges(), 2);
    }

    #[test]
    fn rejects_non_positive_weight() {
        let input = "0 1 0\n";
        let result: Result<DirectedGraph<W>> = read_graph(Cursor::new(input));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn stops_at_first_unparseable_line_without_erroring_on_trailing_blank() {
        let input = "0 1 2\n\n";
        let graph: DirectedGraph<W> = read_graph(Cursor::new(input)).unwrap();
        assert_eq!(graph.edges(), 1);
    }

    #[test]
    fn write_bc_clamps_negative_values_to_zero() {
        let bc = vec![OrderedFloat(-1.5), OrderedFloat(2.0)];
        let mut out = Vec::new();
        write_bc(&mut out, &bc).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0.0");
        assert_eq!(lines[1], "2.0");
    }
}
