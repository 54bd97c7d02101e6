use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cpusim::{paging, simulate, Policy};
use log::info;

mod parse;
mod render;
mod scenario;
mod units;

use parse::{parse_modification, parse_processes};
use scenario::Scenario;
use units::parse_size;

/// CPU scheduling and paging exercises
#[derive(Debug, Parser)]
#[command(name = "cpusim", version, about)]
struct Cli {
    /// Log every scheduling decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a set of processes under a scheduling policy
    Schedule(ScheduleArgs),
    /// Page holding a logical address
    PageNumber {
        #[arg(long)]
        logical_address: u64,
        /// Page size, e.g. 4096 or 4KB
        #[arg(long, value_parser = parse_size)]
        page_size: u64,
    },
    /// Physical address of a logical address
    Translate {
        #[arg(long)]
        logical_address: u64,
        #[arg(long, value_parser = parse_size)]
        page_size: u64,
        /// Frame the page is loaded in
        #[arg(long)]
        frame: u64,
    },
    /// Bits in a logical address
    LogicalWidth {
        #[arg(long)]
        pages: u64,
        #[arg(long, value_parser = parse_size)]
        page_size: u64,
    },
    /// Bits in a physical address
    PhysicalWidth {
        #[arg(long)]
        frames: u64,
        #[arg(long, value_parser = parse_size)]
        frame_size: u64,
    },
}

#[derive(Debug, Args)]
struct ScheduleArgs {
    /// JSON file describing processes and policy
    #[arg(long, conflicts_with_all = ["processes", "policy", "time_slice", "modifications"])]
    scenario: Option<PathBuf>,

    /// Processes as name-arrival-execution, comma separated: A-1-5,B-2-6
    #[arg(long, required_unless_present = "scenario")]
    processes: Option<String>,

    #[arg(long, value_enum, required_unless_present = "scenario")]
    policy: Option<PolicyArg>,

    /// Round robin time slice
    #[arg(long, default_value = "2")]
    time_slice: NonZeroUsize,

    /// Extra work as name-time-delta; round robin only, repeatable
    #[arg(long = "modification")]
    modifications: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Fcfs,
    Sjf,
    Srtn,
    Rr,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Chart,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    println!("{}", execute(cli.command)?);
    Ok(())
}

fn execute(command: Command) -> anyhow::Result<String> {
    match command {
        Command::Schedule(args) => schedule(args),
        Command::PageNumber {
            logical_address,
            page_size,
        } => Ok(format!(
            "page number: {}",
            paging::page_number(logical_address, page_size)?
        )),
        Command::Translate {
            logical_address,
            page_size,
            frame,
        } => Ok(render::translation(&paging::translate(
            logical_address,
            page_size,
            frame,
        )?)),
        Command::LogicalWidth { pages, page_size } => Ok(format!(
            "logical address length: {} bits",
            paging::logical_address_width(pages, page_size)?
        )),
        Command::PhysicalWidth { frames, frame_size } => Ok(format!(
            "physical address length: {} bits",
            paging::physical_address_width(frames, frame_size)?
        )),
    }
}

fn schedule(args: ScheduleArgs) -> anyhow::Result<String> {
    let (processes, policy) = match &args.scenario {
        Some(path) => Scenario::load(path)?.into_parts()?,
        None => inline_policy(&args)?,
    };

    info!("running {} over {} processes", policy.name(), processes.len());
    let table = simulate(processes, &policy)
        .with_context(|| format!("{} simulation failed", policy.name()))?;

    let output = match args.format {
        Format::Text => render::summary(policy.name(), &table),
        Format::Json => render::json(policy.name(), &table)?,
        Format::Chart => render::chart(&table),
    };

    Ok(output)
}

fn inline_policy(args: &ScheduleArgs) -> anyhow::Result<(Vec<cpusim::Process>, Policy)> {
    let (Some(processes), Some(policy)) = (&args.processes, args.policy) else {
        bail!("either --scenario or both --processes and --policy are required");
    };

    let processes = parse_processes(processes)?;
    let modifications = args
        .modifications
        .iter()
        .map(|item| parse_modification(item))
        .collect::<Result<Vec<_>, _>>()?;

    if !modifications.is_empty() && policy != PolicyArg::Rr {
        bail!("modifications only apply to round robin");
    }

    let policy = match policy {
        PolicyArg::Fcfs => Policy::FirstComeFirstServed,
        PolicyArg::Sjf => Policy::ShortestJobFirst,
        PolicyArg::Srtn => Policy::ShortestRemainingTimeNext,
        PolicyArg::Rr => Policy::RoundRobin {
            time_slice: args.time_slice,
            modifications,
        },
    };

    Ok((processes, policy))
}
