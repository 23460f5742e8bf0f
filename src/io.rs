//! Adjacency matrix files in, [DOT](https://graphviz.org/doc/info/lang.html) files out.
//!
//! The input format is the vertex count `N` on the first line, followed by `N` rows of `N`
//! whitespace separated non-negative integers, where `0` means there is no edge.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use ndarray::prelude::*;
use tracing::{debug, warn};

use crate::{graph::Graph, Error, Result};

pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileNotFound {
        path: path.to_owned(),
        source,
    })?;
    let graph = parse_graph(BufReader::new(file))?;
    debug!(
        "Loaded {} vertices from {}",
        graph.num_vertices(),
        path.display()
    );
    Ok(graph)
}

/// Parse an adjacency matrix. Blank lines are skipped.
pub fn parse_graph(reader: impl BufRead) -> Result<Graph> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            line.map(|line| (idx + 1, line))
                .map_err(|err| Error::FileFormat {
                    line: idx + 1,
                    reason: err.to_string(),
                })
        })
        .filter(|line| !matches!(line, Ok((_, line)) if line.trim().is_empty()));

    let (header_line, header) = lines.next().transpose()?.ok_or(Error::FileFormat {
        line: 1,
        reason: "missing vertex count".into(),
    })?;
    let n: usize = header.trim().parse().map_err(|_| Error::FileFormat {
        line: header_line,
        reason: format!("vertex count {:?} is not a non-negative integer", header.trim()),
    })?;

    // Rows are checked before the matrix is shaped, so a bogus count never allocates
    let mut weights = Vec::new();
    let mut last_line = header_line;
    for row in 0..n {
        let (line_number, line) = lines.next().transpose()?.ok_or(Error::FileFormat {
            line: last_line + 1,
            reason: format!("expected {} rows, found {}", n, row),
        })?;
        last_line = line_number;

        let values = line.split_whitespace().collect::<Vec<_>>();
        if values.len() != n {
            return Err(Error::FileFormat {
                line: line_number,
                reason: format!("expected {} values, found {}", n, values.len()),
            });
        }
        for value in values {
            weights.push(value.parse::<u32>().map_err(|_| Error::FileFormat {
                line: line_number,
                reason: format!("{:?} is not a non-negative integer", value),
            })?);
        }
    }

    if let Some((line_number, _)) = lines.next().transpose()? {
        return Err(Error::FileFormat {
            line: line_number,
            reason: format!("expected {} rows, found more", n),
        });
    }

    let adjacency = Array2::from_shape_vec((n, n), weights).map_err(|err| Error::FileFormat {
        line: header_line,
        reason: err.to_string(),
    })?;
    for (vertex, weight) in adjacency.diag().indexed_iter() {
        if *weight != 0 {
            warn!("Vertex {} has a self loop of weight {}", vertex, weight);
        }
    }

    Ok(Graph::from_adjacency(adjacency.view()))
}

/// Export to a DOT file, named after the file stem.
pub fn export_dot(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    graph.ensure_not_empty()?;

    let name = path
        .file_stem()
        .map(|stem| {
            stem.to_string_lossy()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|name| !name.is_empty())
        .map(|name| {
            // DOT identifiers cannot start with a digit
            if name.starts_with(|c: char| c.is_ascii_digit()) {
                format!("_{}", name)
            } else {
                name
            }
        })
        .unwrap_or_else(|| "graph".to_owned());

    let write_error = |source| Error::Write {
        path: path.to_owned(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    write_dot(graph, &name, &mut writer).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    debug!("Exported {} vertices to {}", graph.num_vertices(), path.display());
    Ok(())
}

/// Write an undirected graph with vertices numbered from 1, taking edge weights from the upper triangle.
pub fn write_dot(graph: &Graph, name: &str, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph {} {{", name)?;
    for vertex in 1..=graph.num_vertices() {
        writeln!(writer, "\t{};", vertex)?;
    }
    for ((from, to), weight) in graph.weights().indexed_iter() {
        if let (true, Some(weight)) = (from < to, weight) {
            writeln!(writer, "\t{} -- {} [label=\"{}\"];", from + 1, to + 1, weight)?;
        }
    }
    writeln!(writer, "}}")
}
