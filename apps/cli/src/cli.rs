use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use decoded_core::{DurationError, OptionalSections, parse_minutes};

#[derive(Parser, Debug)]
#[command(name = "decoded")]
#[command(about = "Plan podcast episodes: duration tiers, section budgets, sources and publishing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults to decoded.toml in the base directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Deployment root holding scripts/, logs/ and output/
    #[arg(long, global = true, value_name = "PATH")]
    pub base_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v = debug, -vv = trace).
    /// Can also set RUST_LOG env var.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the section plan for an episode
    Plan(PlanArgs),
    /// Create the directory layout
    Init,
    /// Report which API credentials are set
    Check,
    /// List enabled content sources
    Sources,
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Target runtime in minutes; snapped to 15, 30 or 45
    #[arg(short, long, value_parser = parse_duration_arg, allow_hyphen_values = true)]
    pub duration: Option<i64>,

    /// Include the deep-dive segment
    #[arg(long, overrides_with = "no_deep_dive")]
    pub deep_dive: bool,

    /// Leave out the deep-dive segment even if settings enable it
    #[arg(long, overrides_with = "deep_dive")]
    pub no_deep_dive: bool,

    /// Include the expert-interview segment
    #[arg(long, overrides_with = "no_expert_interview")]
    pub expert_interview: bool,

    /// Leave out the expert-interview segment even if settings enable it
    #[arg(long, overrides_with = "expert_interview")]
    pub no_expert_interview: bool,

    /// Comma-separated topics (ai, big_data, tech_futures)
    #[arg(short, long)]
    pub topics: Option<String>,

    /// Print the plan as JSON instead of a rundown
    #[arg(long)]
    pub json: bool,

    /// Also write the plan as JSON to this path
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

fn parse_duration_arg(value: &str) -> Result<i64, DurationError> {
    parse_minutes(value)
}

/// `Some` when one of a `--flag`/`--no-flag` pair was given.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl PlanArgs {
    /// Apply the section flags on top of the configured ones.
    pub fn optional_sections(&self, configured: OptionalSections) -> OptionalSections {
        OptionalSections {
            deep_dive: toggle(self.deep_dive, self.no_deep_dive).unwrap_or(configured.deep_dive),
            expert_interview: toggle(self.expert_interview, self.no_expert_interview)
                .unwrap_or(configured.expert_interview),
        }
    }
}

impl Cli {
    /// Log filter for tracing_subscriber::EnvFilter when RUST_LOG is unset.
    pub fn log_level_filter(&self, configured: &str) -> String {
        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => configured,
                1 => "debug",
                _ => "trace",
            }
        };

        format!("{}={},decoded_core={}", env!("CARGO_CRATE_NAME"), level, level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("decoded").chain(args.iter().copied()))
    }

    #[test]
    fn test_plan_flags() {
        let cli = parse(&["plan", "-d", "45", "--deep-dive", "--topics", "ai"]).unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.duration, Some(45));
        assert!(args.deep_dive);
        assert!(!args.expert_interview);
        assert_eq!(args.topics.as_deref(), Some("ai"));
    }

    fn plan_args(args: &[&str]) -> PlanArgs {
        let mut argv = vec!["plan"];
        argv.extend_from_slice(args);
        let cli = parse(&argv).unwrap();
        let Command::Plan(args) = cli.command else {
            panic!("expected plan");
        };
        args
    }

    #[test]
    fn test_section_flags_override_settings() {
        let configured = OptionalSections {
            deep_dive: true,
            expert_interview: false,
        };

        let kept = plan_args(&[]).optional_sections(configured);
        assert_eq!(kept, configured);

        let flipped =
            plan_args(&["--no-deep-dive", "--expert-interview"]).optional_sections(configured);
        assert!(!flipped.deep_dive);
        assert!(flipped.expert_interview);

        // Last one wins.
        let last = plan_args(&["--no-deep-dive", "--deep-dive"]).optional_sections(configured);
        assert!(last.deep_dive);
        let last = plan_args(&["--expert-interview", "--no-expert-interview"])
            .optional_sections(configured);
        assert!(!last.expert_interview);
    }

    #[test]
    fn test_duration_validation() {
        assert!(parse(&["plan", "--duration", "abc"]).is_err());
        assert!(parse(&["plan", "--duration", "-5"]).is_err());
        assert!(parse(&["plan", "--duration", "12.5"]).is_err());
        assert!(parse(&["plan", "--duration", "100"]).is_ok());
    }

    #[test]
    fn test_log_level_filter() {
        let cli = parse(&["check"]).unwrap();
        assert_eq!(cli.log_level_filter("info"), "decoded=info,decoded_core=info");

        let cli = parse(&["check", "-vv"]).unwrap();
        assert_eq!(cli.log_level_filter("info"), "decoded=trace,decoded_core=trace");

        let cli = parse(&["-q", "init"]).unwrap();
        assert_eq!(cli.log_level_filter("info"), "decoded=error,decoded_core=error");
    }
}
