use std::{fmt::Display, io, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use graph_navigator::{
    all_pairs_shortest_paths, export_dot, load_graph, minimum_spanning_tree, shortest_path,
    solve_tsp, traverse, AntColonyConfig, Graph, Result, Traversal,
};
use ndarray::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A graph in adjacency matrix format: the vertex count, then one row of weights per line
    graph: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Non-recursive depth-first search
    Dfs {
        #[arg(allow_negative_numbers = true)]
        start: i64,
    },
    /// Breadth-first search
    Bfs {
        #[arg(allow_negative_numbers = true)]
        start: i64,
    },
    /// Shortest path between two vertices
    Path {
        #[arg(allow_negative_numbers = true)]
        from: i64,
        #[arg(allow_negative_numbers = true)]
        to: i64,
    },
    /// Shortest paths between all pairs of vertices
    AllPaths,
    /// Minimum spanning tree
    Mst {
        /// Also export the tree to this DOT file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Traveling salesman tour with the ant colony algorithm
    Tsp {
        /// Ants released per iteration
        #[arg(long, default_value_t = AntColonyConfig::default().ants)]
        ants: usize,

        #[arg(long, default_value_t = AntColonyConfig::default().iterations)]
        iterations: usize,

        /// Fraction of pheromone lost per iteration, in [0, 1)
        #[arg(long, default_value_t = AntColonyConfig::default().evaporation_rate)]
        evaporation_rate: f64,

        /// Influence of pheromone
        #[arg(long, default_value_t = AntColonyConfig::default().alpha)]
        alpha: f64,

        /// Influence of edge weight
        #[arg(long, default_value_t = AntColonyConfig::default().beta)]
        beta: f64,

        /// Seed for a reproducible run, else seeded from entropy
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export the graph to a DOT file
    Export { out: PathBuf },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("graph_navigator=info")),
        )
        .with_writer(io::stderr)
        .init();
    let opt = Opt::parse();

    match run(opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(opt: Opt) -> Result<()> {
    let graph = load_graph(&opt.graph)?;
    info!("Read {} vertices from {}", graph.num_vertices(), opt.graph.display());

    match opt.command {
        Command::Dfs { start } => print_order(&graph, start, Traversal::DepthFirst, opt.json),
        Command::Bfs { start } => print_order(&graph, start, Traversal::BreadthFirst, opt.json),
        Command::Path { from, to } => {
            let (from, to) = (graph.resolve_vertex(from)?, graph.resolve_vertex(to)?);
            let distance = shortest_path(&graph, from, to)?;
            if opt.json {
                println!("{}", json!({ "from": from, "to": to, "distance": distance }));
            } else {
                match distance {
                    Some(distance) => println!("{}", distance),
                    None => println!("unreachable"),
                }
            }
            Ok(())
        }
        Command::AllPaths => {
            let distances = all_pairs_shortest_paths(&graph)?;
            print_matrix(
                distances.view(),
                |distance| match distance {
                    Some(distance) => distance.to_string(),
                    None => "-".to_owned(),
                },
                opt.json,
            );
            Ok(())
        }
        Command::Mst { out } => {
            let tree = minimum_spanning_tree(&graph)?;
            print_matrix(tree.to_adjacency().view(), u32::to_string, opt.json);
            if let Some(out) = out {
                export_dot(&tree, &out)?;
                info!("Wrote tree to {}", out.display());
            }
            Ok(())
        }
        Command::Tsp {
            ants,
            iterations,
            evaporation_rate,
            alpha,
            beta,
            seed,
        } => {
            let config = AntColonyConfig {
                ants,
                iterations,
                evaporation_rate,
                alpha,
                beta,
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let tour = solve_tsp(&graph, config, &mut rng)?;
            if opt.json {
                println!("{}", json!({ "config": config, "tour": tour }));
            } else {
                println!("{}", join(&tour.vertices));
                println!("{}", tour.distance);
            }
            Ok(())
        }
        Command::Export { out } => {
            export_dot(&graph, &out)?;
            info!("Wrote graph to {}", out.display());
            Ok(())
        }
    }
}

fn print_order(graph: &Graph, start: i64, traversal: Traversal, json: bool) -> Result<()> {
    let order = traverse(graph, graph.resolve_vertex(start)?, traversal)?;
    if json {
        println!("{}", json!({ "order": order }));
    } else {
        println!("{}", join(&order));
    }
    Ok(())
}

fn print_matrix<T: Clone + serde::Serialize>(
    matrix: ArrayView2<T>,
    to_string: impl Fn(&T) -> String,
    json: bool,
) {
    if json {
        let rows = matrix.outer_iter().map(|row| row.to_vec()).collect::<Vec<_>>();
        println!("{}", json!(rows));
    } else {
        for row in matrix.outer_iter() {
            println!("{}", row.iter().map(&to_string).collect::<Vec<_>>().join(" "));
        }
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
