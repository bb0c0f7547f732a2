use clap::builder::PossibleValuesParser;
use clap::{ArgGroup, Args, Parser, Subcommand};
use pwcli::query;
use std::path::PathBuf;

const SERIES_SORTS: [&str; 6] = ["id", "-id", "name", "-name", "date", "-date"];
const PATCH_SORTS: [&str; 6] = ["id", "-id", "name", "-name", "date", "-date"];
const BUNDLE_SORTS: [&str; 4] = ["id", "-id", "name", "-name"];

#[derive(Parser, Debug)]
#[command(name = "pwcli")]
#[command(about = "Command-line client for the Patchwork patch tracking service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API root, e.g. https://patchwork.example.com/api/1.2
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Project link-name used to scope listings
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// API token for authenticated requests
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Username for basic authentication
    #[arg(long, global = true)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Verbose logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Work with series
    #[command(subcommand)]
    Series(SeriesCommand),

    /// Work with patches
    #[command(subcommand)]
    Patch(PatchCommand),

    /// Work with bundles
    #[command(subcommand)]
    Bundle(BundleCommand),
}

#[derive(Subcommand, Debug)]
pub enum SeriesCommand {
    /// List series matching the given filters
    #[command(alias = "ls")]
    List(SeriesListArgs),

    /// Show one series
    Show { id: u32 },

    /// Save the series mbox locally
    Download {
        id: u32,

        /// Write here instead of a temporary directory
        output: Option<PathBuf>,
    },

    /// Apply the series to the current branch with git am
    Apply {
        id: u32,

        /// Extra arguments handed to git am unchanged, e.g. -- -3
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct SeriesListArgs {
    /// Filter by submitter name or email fragment
    #[arg(long)]
    pub submitter: Option<String>,

    /// Page to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Entries per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort key; prefix with - for descending
    #[arg(long, default_value = query::DEFAULT_SORT,
          value_parser = PossibleValuesParser::new(SERIES_SORTS))]
    pub sort: String,

    /// Free-text search
    pub query: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PatchCommand {
    /// List patches matching the given filters
    #[command(alias = "ls")]
    List(PatchListArgs),

    /// Show one patch
    Show { id: u32 },

    /// Save the patch mbox locally
    Download {
        id: u32,

        /// Write here instead of a temporary directory
        output: Option<PathBuf>,
    },

    /// Apply the patch to the current branch with git am
    Apply {
        id: u32,

        /// Extra arguments handed to git am unchanged, e.g. -- -3
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Modify one patch
    Update(PatchUpdateArgs),
}

#[derive(Args, Debug)]
pub struct PatchListArgs {
    /// Filter by state, e.g. under-review; may be repeated
    #[arg(long)]
    pub state: Vec<String>,

    /// Filter by submitter name or email fragment
    #[arg(long)]
    pub submitter: Option<String>,

    /// Filter by delegate username or email fragment
    #[arg(long)]
    pub delegate: Option<String>,

    /// Filter by patch content hash
    #[arg(long)]
    pub hash: Option<String>,

    /// Include archived patches
    #[arg(long)]
    pub archived: bool,

    /// Page to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Entries per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort key; prefix with - for descending
    #[arg(long, default_value = query::DEFAULT_SORT,
          value_parser = PossibleValuesParser::new(PATCH_SORTS))]
    pub sort: String,

    /// Free-text search
    pub query: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("changes").required(true).multiple(true)))]
pub struct PatchUpdateArgs {
    pub id: u32,

    /// New state, e.g. accepted or rejected
    #[arg(long, group = "changes")]
    pub state: Option<String>,

    /// Delegate username or email fragment
    #[arg(long, group = "changes")]
    pub delegate: Option<String>,

    /// Set or clear the archived flag
    #[arg(long, group = "changes", value_name = "BOOL")]
    pub archived: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum BundleCommand {
    /// List bundles matching the given filters
    #[command(alias = "ls")]
    List(BundleListArgs),

    /// Show one bundle
    Show { id: u32 },

    /// Save the bundle mbox locally
    Download {
        id: u32,

        /// Write here instead of a temporary directory
        output: Option<PathBuf>,
    },

    /// Apply the bundle to the current branch with git am
    Apply {
        id: u32,

        /// Extra arguments handed to git am unchanged, e.g. -- -3
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct BundleListArgs {
    /// Filter by owner username or email fragment
    #[arg(long)]
    pub owner: Option<String>,

    /// Page to fetch
    #[arg(long)]
    pub page: Option<u32>,

    /// Entries per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort key; prefix with - for descending
    #[arg(long, default_value = query::BUNDLE_DEFAULT_SORT,
          value_parser = PossibleValuesParser::new(BUNDLE_SORTS))]
    pub sort: String,

    /// Free-text search
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_series_sort_is_newest_first() {
        let cli = Cli::try_parse_from(["pwcli", "series", "list"]).unwrap();
        match cli.command {
            Commands::Series(SeriesCommand::List(args)) => assert_eq!(args.sort, "-date"),
            other => panic!("parsed into {:?}", other),
        }
    }

    #[test]
    fn unknown_sort_keys_are_rejected() {
        assert!(Cli::try_parse_from(["pwcli", "series", "list", "--sort", "submitter"]).is_err());
    }

    #[test]
    fn apply_collects_pass_through_arguments_after_the_separator() {
        let cli = Cli::try_parse_from(["pwcli", "series", "apply", "123", "--", "-3", "-s"]).unwrap();
        match cli.command {
            Commands::Series(SeriesCommand::Apply { id, args }) => {
                assert_eq!(id, 123);
                assert_eq!(args, vec!["-3".to_string(), "-s".to_string()]);
            }
            other => panic!("parsed into {:?}", other),
        }
    }

    #[test]
    fn patch_update_requires_at_least_one_change() {
        assert!(Cli::try_parse_from(["pwcli", "patch", "update", "1057"]).is_err());
        assert!(
            Cli::try_parse_from(["pwcli", "patch", "update", "1057", "--state", "accepted"])
                .is_ok()
        );
    }

    #[test]
    fn patch_states_may_repeat() {
        let cli = Cli::try_parse_from([
            "pwcli", "patch", "list", "--state", "new", "--state", "under-review",
        ])
        .unwrap();
        match cli.command {
            Commands::Patch(PatchCommand::List(args)) => {
                assert_eq!(args.state, vec!["new", "under-review"]);
            }
            other => panic!("parsed into {:?}", other),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "pwcli",
            "series",
            "list",
            "--server",
            "https://example.com/api/1.2",
            "--project",
            "linux-next",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("https://example.com/api/1.2"));
        assert_eq!(cli.project.as_deref(), Some("linux-next"));
    }
}
