use std::{error::Error, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use os_model::{
    DiskScheduler, Sim,
    core::input::{parse_list, parse_non_negative, parse_positive, parse_process},
    memory::lru,
    scheduler::{Fcfs, priq},
    sim::{RandomEvents, RandomEventsConfig},
    sync::ReleasePolicy,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "os_model")]
#[command(about = "Step-by-step traces of classic OS algorithms")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// FCFS disk-head scheduling
    Disk {
        /// Initial head position
        #[arg(long)]
        head: String,

        /// Comma-separated cylinder requests, e.g. 82,170,43
        requests: String,
    },

    /// Non-preemptive priority CPU scheduling
    Priority {
        /// Processes as id:arrival:burst:priority
        #[arg(required = true)]
        processes: Vec<String>,
    },

    /// LRU page replacement
    Lru {
        /// Number of frames
        #[arg(long)]
        frames: String,

        /// Comma-separated page references, e.g. 7,0,1,2,0,3
        references: String,
    },

    /// Reader-writer arbitration over a random timeline
    Rw {
        #[arg(long, default_value_t = 3)]
        readers: usize,

        #[arg(long, default_value_t = 2)]
        writers: usize,

        /// Random seed for reproducibility
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value_t = Policy::PromoteReaders)]
        policy: Policy,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    PromoteReaders,
    HandOff,
}

impl From<Policy> for ReleasePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::PromoteReaders => ReleasePolicy::PromoteReaders,
            Policy::HandOff => ReleasePolicy::HandOff,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Disk { head, requests } => {
            let head = parse_non_negative("initial head", &head)?;
            let requests = parse_list("requests", &requests)?;
            let trace = Fcfs.schedule(head, &requests);

            if cli.json {
                return Ok(print_json(&trace)?);
            }
            for (i, (from, to, movement)) in trace.steps().enumerate() {
                println!("step {}: {from} -> {to} ({movement})", i + 1);
            }
            println!("Total head movement: {}", trace.total_movement);
        }
        Commands::Priority { processes } => {
            let processes = processes
                .iter()
                .map(|row| parse_process(row))
                .collect::<os_model::Result<Vec<_>>>()?;
            let schedule = priq::schedule(&processes)?;

            if cli.json {
                return Ok(print_json(&schedule)?);
            }
            for e in &schedule.entries {
                println!(
                    "{}: at={} bt={} pr={} ct={} tat={} wt={}",
                    e.id,
                    e.arrival_time,
                    e.burst_time,
                    e.priority,
                    e.completion_time,
                    e.turnaround_time,
                    e.waiting_time
                );
            }
            let gantt: Vec<String> = schedule
                .gantt_chart
                .iter()
                .map(|s| format!("{}[{}-{}]", s.id, s.start_time, s.end_time))
                .collect();
            println!("Gantt: {}", gantt.join(" "));
            println!("Average turnaround time: {:.2}", schedule.avg_turnaround_time);
            println!("Average waiting time: {:.2}", schedule.avg_waiting_time);
        }
        Commands::Lru { frames, references } => {
            let frames = parse_positive("frames", &frames)?;
            let references = parse_list("references", &references)?;
            let trace = lru::replace(&references, frames as usize)?;

            if cli.json {
                return Ok(print_json(&trace)?);
            }
            for (i, step) in trace.steps.iter().enumerate() {
                println!(
                    "step {}: page {} {:?} {:?} -> {:?}",
                    i + 1,
                    step.request,
                    step.outcome,
                    step.frames_before,
                    step.frames_after
                );
            }
            println!("Page faults: {}", trace.total_faults);
            println!("Hit ratio: {:.2}%", trace.hit_ratio_percent());
        }
        Commands::Rw {
            readers,
            writers,
            seed,
            policy,
        } => {
            let mut source = RandomEvents::new(RandomEventsConfig {
                readers,
                writers,
                seed,
                ..Default::default()
            })?;
            let mut sim = Sim::new(&mut source, policy.into());

            let mut steps = Vec::new();
            while let Some(step) = sim.step()? {
                if !cli.json {
                    println!(
                        "t={} {:?} active={:?} writer={:?} waiting_r={:?} waiting_w={:?}",
                        step.timestamp,
                        step.transitions,
                        step.state.active_readers,
                        step.state.active_writer,
                        step.state.waiting_readers,
                        step.state.waiting_writers
                    );
                }
                steps.push(step);
            }

            if cli.json {
                return Ok(print_json(&steps)?);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
