use crate::config::Config;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "react-compiler-healthcheck",
    version,
    about = "Reports which components React Compiler can optimize"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Debug-level logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
    /// Only log warnings and errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Disable ANSI colors in the console report
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan, compile and report; exits non-zero when the gate fails
    Check(CheckArgs),
    /// List the files `check` would compile
    Scan(ScanArgs),
    /// Re-render a saved result (from `check --json-out`)
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Project directory to scan
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
    /// Comma-separated include globs
    #[arg(long, value_delimiter = ',')]
    pub include: Vec<String>,
    /// Comma-separated exclude globs
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

impl ScanArgs {
    pub fn apply(&self, config: &mut Config) {
        if !self.include.is_empty() {
            config.include.clone_from(&self.include);
        }
        if !self.exclude.is_empty() {
            config.exclude.clone_from(&self.exclude);
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    /// Repository URL used for source links in Markdown
    #[arg(long)]
    pub repo_url: Option<String>,
    /// Commit SHA used for source links in Markdown
    #[arg(long)]
    pub commit_sha: Option<String>,
    /// List optimized components in Markdown
    #[arg(long)]
    pub show_successes: bool,
}

#[allow(clippy::struct_field_names)]
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: ScanArgs,
    #[command(flatten)]
    pub links: LinkArgs,
    /// Path to babel-plugin-react-compiler, relative to the project
    #[arg(long, value_name = "DIR")]
    pub plugin_path: Option<PathBuf>,
    /// Fail on any unoptimized component
    #[arg(long, value_name = "BOOL")]
    pub fail_on_error: Option<bool>,
    /// Fail when the failure rate exceeds this percentage (with --fail-on-error false)
    #[arg(long, value_name = "PERCENT")]
    pub fail_threshold: Option<f64>,
    /// Emit CI annotations when running under GitHub Actions
    #[arg(long, value_name = "BOOL")]
    pub annotations: Option<bool>,
    /// Write the Markdown report to this file
    #[arg(long, value_name = "FILE")]
    pub markdown_out: Option<PathBuf>,
    /// Write the PR comment body (marker + Markdown) to this file
    #[arg(long, value_name = "FILE")]
    pub comment_out: Option<PathBuf>,
    /// Write the full result as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub json_out: Option<PathBuf>,
}

impl CheckArgs {
    /// Applies command-line overrides, the highest configuration layer.
    pub fn apply(&self, config: &mut Config) {
        self.scan.apply(config);
        if let Some(path) = &self.plugin_path {
            config.plugin_path = Some(path.clone());
        }
        if let Some(v) = self.fail_on_error {
            config.policy.fail_on_error = v;
        }
        if let Some(v) = self.fail_threshold {
            config.policy.fail_threshold = v;
        }
        if let Some(v) = self.annotations {
            config.annotations = v;
        }
        if self.links.show_successes {
            config.show_successes = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Markdown,
    Annotations,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Saved result JSON
    #[arg(long, short, value_name = "FILE")]
    pub input: PathBuf,
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub format: ReportFormat,
    #[command(flatten)]
    pub links: LinkArgs,
}
