//! Thin CLI wrapper over the `fastbc` library (spec §6.4). Parses its own
//! flags rather than depending on an argument-parsing crate, matching the
//! rest of this codebase's minimal-dependency binaries.

use fastbc::driver::DriverOptions;
use fastbc::error::Error;
use fastbc::louvain::Louvain;
use fastbc::pivot::exact::PivotPolicy;
use ordered_float::OrderedFloat;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

type W = OrderedFloat<f64>;

struct Args {
    input: PathBuf,
    output: PathBuf,
    seeds: Vec<u64>,
    instances: usize,
    precision: f64,
    k_frac: Option<f64>,
    exact: bool,
    log_level: String,
}

impl Args {
    fn parse(mut raw: std::env::Args) -> Result<Self, Error> {
        raw.next(); // program name

        let mut input = None;
        let mut output = PathBuf::from("bc.out");
        let mut seeds = vec![0u64];
        let mut instances = 1usize;
        let mut precision = 1e-4;
        let mut k_frac = None;
        let mut exact = false;
        let mut log_level = "warn".to_string();

        let args: Vec<String> = raw.collect();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "-s" => {
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or_else(|| Error::InvalidInput("-s requires a value".into()))?;
                    seeds = value
                        .split(',')
                        .map(|s| {
                            s.trim()
                                .parse::<u64>()
                                .map_err(|_| Error::InvalidInput(format!("bad seed: {s}")))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                }
                "-e" => {
                    i += 1;
                    instances = args
                        .get(i)
                        .ok_or_else(|| Error::InvalidInput("-e requires a value".into()))?
                        .parse()
                        .map_err(|_| Error::InvalidInput("bad -e value".into()))?;
                }
                "-p" => {
                    i += 1;
                    precision = args
                        .get(i)
                        .ok_or_else(|| Error::InvalidInput("-p requires a value".into()))?
                        .parse()
                        .map_err(|_| Error::InvalidInput("bad -p value".into()))?;
                }
                "-k" => {
                    i += 1;
                    let value: f64 = args
                        .get(i)
                        .ok_or_else(|| Error::InvalidInput("-k requires a value".into()))?
                        .parse()
                        .map_err(|_| Error::InvalidInput("bad -k value".into()))?;
                    if !(0.0 < value && value < 1.0) {
                        return Err(Error::InvalidInput(format!(
                            "kFrac must lie in (0, 1), got {value}"
                        )));
                    }
                    k_frac = Some(value);
                }
                "--exact" => exact = true,
                "-o" => {
                    i += 1;
                    output = PathBuf::from(
                        args.get(i)
                            .ok_or_else(|| Error::InvalidInput("-o requires a value".into()))?,
                    );
                }
                "-d" => {
                    i += 1;
                    log_level = args
                        .get(i)
                        .ok_or_else(|| Error::InvalidInput("-d requires a value".into()))?
                        .clone();
                }
                other if input.is_none() => input = Some(PathBuf::from(other)),
                other => {
                    return Err(Error::InvalidInput(format!("unrecognized argument: {other}")))
                }
            }
            i += 1;
        }

        Ok(Args {
            input: input.ok_or_else(|| Error::InvalidInput("missing input path".into()))?,
            output,
            seeds,
            instances,
            precision,
            k_frac,
            exact,
            log_level,
        })
    }
}

fn run(args: Args) -> Result<(), Error> {
    if args.output.exists() {
        return Err(Error::OutputExists(args.output));
    }

    let file = File::open(&args.input).map_err(|e| Error::InvalidInput(e.to_string()))?;
    let graph: fastbc::DirectedGraph<W> = fastbc::io::read_graph(BufReader::new(file))?;
    log::info!(
        "loaded graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edges()
    );

    let bc = if args.exact {
        fastbc::exact::exact_bc(&graph)
    } else {
        let seeds = if args.seeds.len() >= args.instances {
            args.seeds.clone()
        } else {
            (0..args.instances as u64).collect()
        };
        let detector = Louvain::new(seeds, args.precision);
        let options = DriverOptions {
            k_frac: args.k_frac,
            border_pivot_policy: PivotPolicy::default(),
            ..DriverOptions::default()
        };
        fastbc::clustered_bc(&graph, &detector, options)
    };

    let out_file = File::create(&args.output).map_err(|e| Error::InvalidInput(e.to_string()))?;
    fastbc::io::write_bc(&mut BufWriter::new(out_file), &bc)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("fastbc: {e}");
            return ExitCode::from(255); // -1
        }
    };

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::OutputExists(path)) => {
            eprintln!("fastbc: output already exists: {}", path.display());
            ExitCode::from(254) // -2
        }
        Err(e) => {
            eprintln!("fastbc: {e}");
            ExitCode::from(255) // -1
        }
    }
}
