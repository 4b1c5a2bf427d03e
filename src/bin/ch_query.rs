use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
    str::FromStr,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use ch_paths::{
    graphs::{reversible_graph::ReversibleGraph, Vertex, WeightedEdge},
    preprocess, ContractedGraph, PathFinding,
};
use clap::Parser;
use log::{error, info};

/// Answers shortest path distance queries with a contraction hierarchy.
///
/// Input is `V E`, then `E` lines `tail head weight`, then `Q`, then `Q`
/// lines `source target`. With `--load` the graph part is omitted. Prints one
/// distance per query, `-1` if the target is unreachable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Read from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Vertex ids in the input start at 0 instead of 1
    #[arg(long)]
    zero_based: bool,
    /// Write the contracted graph in .bincode format
    #[arg(short, long)]
    save: Option<PathBuf>,
    /// Read a contracted graph in .bincode format instead of building one
    #[arg(short, long, conflicts_with_all = ["save", "verify"])]
    load: Option<PathBuf>,
    /// Check every answer against plain Dijkstra
    #[arg(long)]
    verify: bool,
}

/// Whitespace separated tokens, each with the 1-based line it came from.
struct Tokens<'a> {
    tokens: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
    zero_based: bool,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str, zero_based: bool) -> Self {
        let tokens = input.lines().enumerate().flat_map(|(index, line)| {
            line.split_whitespace().map(move |token| (index + 1, token))
        });

        Tokens {
            tokens: Box::new(tokens),
            line: 0,
            zero_based,
        }
    }

    fn next_value<T: FromStr>(&mut self, what: &str) -> Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some((line, token)) = self.tokens.next() else {
            bail!(
                "unexpected end of input after line {}, expected {}",
                self.line,
                what
            );
        };
        self.line = line;

        token
            .parse()
            .with_context(|| format!("line {}: unable to parse {} from {:?}", line, what, token))
    }

    fn next_vertex(&mut self, what: &str) -> Result<Vertex> {
        let id: Vertex = self.next_value(what)?;
        if self.zero_based {
            return Ok(id);
        }
        id.checked_sub(1).with_context(|| {
            format!("line {}: {} is 0, but vertex ids start at 1", self.line, what)
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            input
        }
    };
    let mut tokens = Tokens::new(&input, args.zero_based);

    let mut reference = None;
    let contracted_graph = match &args.load {
        Some(path) => {
            info!("Reading contracted graph from {}", path.display());
            ContractedGraph::read_bincode(path)?
        }
        None => {
            let number_of_vertices: u32 = tokens.next_value("number of vertices")?;
            let number_of_edges: usize = tokens.next_value("number of edges")?;

            let mut edges = Vec::with_capacity(number_of_edges);
            for _ in 0..number_of_edges {
                let tail = tokens.next_vertex("edge tail")?;
                let head = tokens.next_vertex("edge head")?;
                let weight = tokens.next_value("edge weight")?;
                edges.push(WeightedEdge::new(tail, head, weight));
            }

            let start = Instant::now();
            let contracted_graph = preprocess(number_of_vertices, &edges)?;
            info!("Generating contracted graph took {:?}", start.elapsed());

            if args.verify {
                reference = Some(ReversibleGraph::from_edges(number_of_vertices, &edges));
            }
            contracted_graph
        }
    };

    if let Some(path) = &args.save {
        info!("Writing contracted graph to {}", path.display());
        contracted_graph.write_bincode(path)?;
    }

    let number_of_queries: usize = tokens.next_value("number of queries")?;
    let mut out = BufWriter::new(io::stdout().lock());
    let mut mismatches = 0;

    let start = Instant::now();
    for _ in 0..number_of_queries {
        let source = tokens.next_vertex("query source")?;
        let target = tokens.next_vertex("query target")?;

        let distance = contracted_graph
            .shortest_path_distance(source, target)
            .with_context(|| format!("line {}: query failed", tokens.line))?;
        match distance {
            Some(distance) => writeln!(out, "{}", distance)?,
            None => writeln!(out, "-1")?,
        }

        if let Some(reference) = &reference {
            let expected = reference.shortest_path_distance(source, target)?;
            if expected != distance {
                error!(
                    "{} -> {} failed: contracted graph {:?}, dijkstra {:?}",
                    source, target, distance, expected
                );
                mismatches += 1;
            }
        }
    }
    out.flush()?;
    info!("Answered {} queries in {:?}", number_of_queries, start.elapsed());

    if mismatches > 0 {
        bail!("{} of {} queries differ from dijkstra", mismatches, number_of_queries);
    }

    Ok(())
}
