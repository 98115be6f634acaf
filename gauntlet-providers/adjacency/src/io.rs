//! Text serialisation of [`AdjacencyGraph`].
//!
//! Adjacency lists start with `N=<order>` followed by one `v: w ... -1` line
//! per vertex. Adjacency matrices start with the order followed by the upper
//! triangle, one row of `0`/`1` digits per vertex. The debug format extends
//! the adjacency list with degrees and colours and is write-only.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use gauntlet_core::{GraphFormat, GraphHandle};

use crate::{errors::AdjacencyLibraryError, graph::AdjacencyGraph};

/// A graph read from disk.
#[derive(Debug)]
pub(crate) struct Loaded {
    pub(crate) graph: AdjacencyGraph,
    /// Edges dropped because the graph was full.
    pub(crate) dropped: usize,
}

pub(crate) fn write_graph_file(
    graph: &AdjacencyGraph,
    path: &Path,
    format: GraphFormat,
) -> Result<(), AdjacencyLibraryError> {
    let io_error = |source| AdjacencyLibraryError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    render(graph, format, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(io_error)
}

fn render(graph: &AdjacencyGraph, format: GraphFormat, out: &mut impl Write) -> std::io::Result<()> {
    let order = graph.vertex_count();
    match format {
        GraphFormat::AdjacencyList => {
            writeln!(out, "N={order}")?;
            for vertex in 0..order {
                write!(out, "{vertex}:")?;
                for neighbour in graph.neighbours(vertex) {
                    write!(out, " {neighbour}")?;
                }
                writeln!(out, " -1")?;
            }
        }
        GraphFormat::AdjacencyMatrix => {
            writeln!(out, "{order}")?;
            for u in 0..order {
                let row: String = (u + 1..order)
                    .map(|v| if graph.has_edge(u, v) { '1' } else { '0' })
                    .collect();
                writeln!(out, "{row}")?;
            }
        }
        GraphFormat::DebugInfo => {
            writeln!(out, "N={order} M={}", graph.edge_count())?;
            for vertex in 0..order {
                let color = graph
                    .color(vertex)
                    .map_or_else(|| "-".to_owned(), |color| color.to_string());
                write!(out, "{vertex}: degree={} color={color} [", graph.degree(vertex))?;
                let neighbours: Vec<_> = graph
                    .neighbours(vertex)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                writeln!(out, "{}]", neighbours.join(" "))?;
            }
        }
    }
    Ok(())
}

pub(crate) fn read_graph_file(path: &Path) -> Result<Loaded, AdjacencyLibraryError> {
    let text = fs::read_to_string(path).map_err(|source| AdjacencyLibraryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |line: usize, reason: String| AdjacencyLibraryError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());
    let Some((header_line, header)) = lines.next() else {
        return Err(parse_error(1, "empty graph file".to_owned()));
    };

    let (order, matrix) = match header.strip_prefix("N=") {
        Some(order) => (order, false),
        None => (header, true),
    };
    let order: usize = order
        .trim()
        .parse()
        .map_err(|error| parse_error(header_line, format!("invalid order: {error}")))?;

    let mut loaded = Loaded {
        graph: AdjacencyGraph::new(order),
        dropped: 0,
    };
    for (number, line) in lines {
        let pairs = if matrix {
            matrix_row(line, number, order)
        } else {
            list_row(line, order)
        }
        .map_err(|reason| parse_error(number, reason))?;
        for (u, v) in pairs {
            match loaded.graph.add_edge(u, v) {
                Ok(_) => {}
                Err(AdjacencyLibraryError::EdgeCapacity { .. }) => loaded.dropped += 1,
                Err(error) => return Err(parse_error(number, error.to_string())),
            }
        }
    }
    Ok(loaded)
}

fn list_row(line: &str, order: usize) -> Result<Vec<(usize, usize)>, String> {
    let (vertex, rest) = line
        .split_once(':')
        .ok_or_else(|| "expected `v: neighbours -1`".to_owned())?;
    let vertex: usize = vertex
        .trim()
        .parse()
        .map_err(|error| format!("invalid vertex: {error}"))?;
    if vertex >= order {
        return Err(format!("vertex {vertex} is out of range"));
    }
    let mut pairs = Vec::new();
    for token in rest.split_whitespace() {
        if token == "-1" {
            return Ok(pairs);
        }
        let neighbour: usize = token
            .parse()
            .map_err(|error| format!("invalid neighbour `{token}`: {error}"))?;
        pairs.push((vertex, neighbour));
    }
    Err("missing `-1` terminator".to_owned())
}

/// Row `number - 2` of the upper triangle; the header is line 1.
fn matrix_row(line: &str, number: usize, order: usize) -> Result<Vec<(usize, usize)>, String> {
    let u = number.saturating_sub(2);
    if u >= order {
        return Err("more rows than vertices".to_owned());
    }
    let expected = order - u - 1;
    if line.chars().count() != expected {
        return Err(format!("expected {expected} digits"));
    }
    line.chars()
        .zip(u + 1..order)
        .filter_map(|(digit, v)| match digit {
            '0' => None,
            '1' => Some(Ok((u, v))),
            other => Some(Err(format!("unexpected `{other}`"))),
        })
        .collect()
}
