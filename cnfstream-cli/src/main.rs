use std::{
    io::BufRead,
    path::{Path, PathBuf},
};

use clap::{ArgEnum, Parser, Subcommand};
use cnfstream::{
    config::Config,
    dimacs::cnf::parse_cnf_with,
    drat::{parse_drat_with, Format, ProofStep},
    error::ParseError,
    io::{read, write, ReadSource, WriteSink},
    lit::Lit,
    log::{info, verbose, LogLevel},
    proof::{drat::DratWriter, Proof},
};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(about)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Make output more verbose (use multiple times for more verbose output).
    #[clap(long, short = 'v', parse(from_occurrences), global = true)]
    verbose: u8,

    /// Make output less verbose.
    #[clap(
        long,
        short = 'q',
        parse(from_occurrences),
        conflicts_with = "verbose",
        global = true
    )]
    quiet: u8,

    /// Include originating source locations in log messages.
    #[clap(long, global = true)]
    log_src: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print statistics of a DIMACS CNF file.
    Stats {
        /// Input formula in DIMACS CNF format, possibly compressed (`-` for stdin).
        input: PathBuf,
    },
    /// Convert a DRAT proof between the text and binary formats.
    Convert {
        /// Input proof, possibly compressed (`-` for stdin).
        input: PathBuf,
        /// Output proof (`-` for stdout).
        output: PathBuf,
        /// Format of the input proof.
        #[clap(long, arg_enum, default_value = "text")]
        from: FormatArg,
        /// Format of the output proof.
        #[clap(long, arg_enum, default_value = "binary")]
        to: FormatArg,
    },
}

#[derive(Copy, Clone, ArgEnum)]
enum FormatArg {
    Text,
    Binary,
}

impl From<FormatArg> for Format {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Format::Text,
            FormatArg::Binary => Format::Binary,
        }
    }
}

fn is_std_stream(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn open_input(path: &Path) -> std::io::Result<ReadSource<Box<dyn BufRead>>> {
    if is_std_stream(path) {
        read::stdin()
    } else {
        read::open_file(path)
    }
}

fn create_output(path: &Path) -> std::io::Result<WriteSink<'static>> {
    if is_std_stream(path) {
        Ok(write::stdout())
    } else {
        write::create_file(path)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::default();
    let logger = config.logger_mut();

    match (args.verbose, args.quiet) {
        (0, 0) => logger.set_log_level(Some(LogLevel::Info)),
        (1, _) => logger.set_log_level(Some(LogLevel::Verbose)),
        (2, _) => logger.set_log_level(Some(LogLevel::Debug)),
        (_, 0) => logger.set_log_level(Some(LogLevel::Trace)),
        _ => logger.set_log_level(None),
    }

    logger.log_source_locations(args.log_src);

    match args.command {
        Command::Stats { input } => stats(&config, &input),
        Command::Convert {
            input,
            output,
            from,
            to,
        } => convert(&config, &input, &output, from.into(), to.into()),
    }
}

fn stats(config: &Config, input: &Path) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    let mut clauses = 0usize;
    let mut lits = 0usize;
    let mut max_var = None;

    let header = parse_cnf_with(open_input(input)?, config, |clause: &[Lit]| {
        clauses += 1;
        lits += clause.len();
        max_var = clause.iter().map(|lit| lit.var()).chain(max_var).max();
        Ok::<_, ParseError>(())
    })?;

    let duration = start.elapsed();
    verbose!(config, = duration);

    println!("variables: {}", header.var_count);
    println!("clauses: {}", clauses);
    println!("literals: {}", lits);
    if let Some(var) = max_var {
        println!("max variable: {}", var);
    }
    Ok(())
}

fn convert(
    config: &Config,
    input: &Path,
    output: &Path,
    from: Format,
    to: Format,
) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    let mut writer = DratWriter::new(create_output(output)?, to);
    info!(config, "converting DRAT proof", = from, = to);

    let steps = parse_drat_with(
        open_input(input)?,
        from,
        config,
        |step: ProofStep| -> anyhow::Result<()> {
            if step.is_addition {
                writer.add_clause(step.lits)?;
            } else {
                writer.delete_clause(step.lits)?;
            }
            Ok(())
        },
    )?;
    writer.flush()?;

    let duration = start.elapsed();
    info!(config, = steps, = duration);
    Ok(())
}
