use clap::Parser;
use std::path::PathBuf;

use crate::application::dto::OutputFormat;

/// Turn Maven dependency:tree output into deduplicated package graphs
#[derive(Parser, Debug)]
#[command(name = "mvn-dep-graph")]
#[command(version)]
#[command(
    about = "Turn Maven dependency:tree output into deduplicated package graphs",
    long_about = None,
    after_help = "EXAMPLES:\n    \
        mvn dependency:tree -DoutputType=dot | mvn-dep-graph\n    \
        mvn-dep-graph deps.txt --resolve-report resolve.txt -f markdown\n    \
        mvn-dep-graph --tree --aggregate tree.txt -o graph.json"
)]
pub struct Args {
    /// Saved build output (reads stdin when omitted)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output of `mvn dependency:resolve`, used to pin RELEASE/LATEST versions
    #[arg(short, long, value_name = "FILE")]
    pub resolve_report: Option<PathBuf>,

    /// Output format: json or markdown [default: json]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Parse plain indented tree output instead of digraph blocks
    #[arg(long)]
    pub tree: bool,

    /// Keep test-only subtrees that never reach a production dependency
    #[arg(long)]
    pub include_test_scope: bool,

    /// Treat each version and scope of an artifact as a distinct node
    #[arg(long)]
    pub verbose: bool,

    /// Merge all modules into one graph rooted at the first module
    #[arg(long)]
    pub aggregate: bool,

    /// Label nodes with their Maven scope
    #[arg(long)]
    pub label_scopes: bool,

    /// Label nodes with the SHA-256 of the artifact in the local repository
    #[arg(long)]
    pub checksums: bool,

    /// Local Maven repository used for checksums [default: ~/.m2/repository]
    #[arg(long, value_name = "DIR")]
    pub repository: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to config file (default: auto-discover mvn-dep-graph.config.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
