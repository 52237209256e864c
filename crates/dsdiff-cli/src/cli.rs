use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dsdiff_format::FormatKind;

#[derive(Parser)]
#[command(
    name = "dsdiff",
    about = "Compare two dataset records component by component",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with [diff] and [format] tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    #[value(name = "simple")]
    Simple,
    #[value(name = "listKeys")]
    ListKeys,
    #[value(name = "plusMinus")]
    PlusMinus,
    #[value(name = "plusMinusColor")]
    PlusMinusColor,
    #[value(name = "delta")]
    Delta,
}

impl From<FormatArg> for FormatKind {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Simple => FormatKind::Simple,
            FormatArg::ListKeys => FormatKind::ListKeys,
            FormatArg::PlusMinus => FormatKind::UnifiedPlain,
            FormatArg::PlusMinusColor => FormatKind::UnifiedColored,
            FormatArg::Delta => FormatKind::DeltaTree,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the changes between two records
    Diff(DiffArgs),
    /// Show which components changed
    Components(ComponentsArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub a: PathBuf,
    pub b: PathBuf,
    #[arg(short, long, default_value = "simple")]
    pub format: FormatArg,
    /// Report every changed component instead of the first
    #[arg(long)]
    pub all: bool,
    /// Raw payload to compare in place of the first record's body
    #[arg(long, requires = "body_b")]
    pub body_a: Option<PathBuf>,
    /// Raw payload to compare in place of the second record's body
    #[arg(long, requires = "body_a")]
    pub body_b: Option<PathBuf>,
    /// Compare components on worker threads
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Args)]
pub struct ComponentsArgs {
    pub a: PathBuf,
    pub b: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff_defaults() {
        let cli = Cli::try_parse_from(["dsdiff", "diff", "a.json", "b.json"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.a, PathBuf::from("a.json"));
            assert_eq!(args.b, PathBuf::from("b.json"));
            assert_eq!(args.format, FormatArg::Simple);
            assert!(!args.all);
            assert!(!args.parallel);
            assert!(args.body_a.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_diff_format_names() {
        for (name, kind) in [
            ("simple", FormatKind::Simple),
            ("listKeys", FormatKind::ListKeys),
            ("plusMinus", FormatKind::UnifiedPlain),
            ("plusMinusColor", FormatKind::UnifiedColored),
            ("delta", FormatKind::DeltaTree),
        ] {
            let cli = Cli::try_parse_from(["dsdiff", "diff", "a", "b", "--format", name]).unwrap();
            if let Command::Diff(args) = cli.command {
                assert_eq!(FormatKind::from(args.format), kind);
            } else {
                panic!("wrong command");
            }
        }
    }

    #[test]
    fn parse_unknown_format_fails() {
        let parsed = Cli::try_parse_from(["dsdiff", "diff", "a", "b", "--format", "markdown"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn body_flags_come_in_pairs() {
        let unpaired = Cli::try_parse_from(["dsdiff", "diff", "a", "b", "--body-a", "x"]);
        assert!(unpaired.is_err());
        let cli = Cli::try_parse_from([
            "dsdiff", "diff", "a", "b", "--body-a", "x", "--body-b", "y",
        ])
        .unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.body_a, Some(PathBuf::from("x")));
            assert_eq!(args.body_b, Some(PathBuf::from("y")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_components() {
        let cli = Cli::try_parse_from(["dsdiff", "components", "a", "b"]).unwrap();
        assert!(matches!(cli.command, Command::Components(_)));
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "dsdiff", "diff", "a", "b", "--verbose", "--config", "dsdiff.toml", "--all",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("dsdiff.toml")));
    }
}
