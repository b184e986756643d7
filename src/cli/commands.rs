//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated REST client CLI
#[derive(Parser, Debug)]
#[command(name = "paged-rest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Subscription id (overrides config and environment)
    #[arg(short, long, global = true)]
    pub subscription: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List preview features, page by page
    ListFeatures {
        /// Resource provider namespace (all namespaces when omitted)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Stop after this many pages (at least one page is always fetched)
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Show one preview feature
    GetFeature {
        /// Resource provider namespace, e.g. Microsoft.Compute
        namespace: String,

        /// Feature name
        name: String,
    },

    /// Register a preview feature for the subscription
    RegisterFeature {
        /// Resource provider namespace, e.g. Microsoft.Compute
        namespace: String,

        /// Feature name
        name: String,
    },

    /// Look up a value in one of the known string enumerations
    ParseEnum {
        /// Enumeration to search
        kind: EnumKind,

        /// Serialized value (matched case-insensitively)
        value: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

/// Enumerations reachable from `parse-enum`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EnumKind {
    /// Compute node operating system family
    OsType,
    /// Compute node state
    ComputeNodeState,
    /// Custom host name DNS record type
    DnsRecordType,
    /// Preview feature registration state
    FeatureState,
    /// Chat message type
    ChatMessageType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_list_features() {
        let cli = Cli::try_parse_from([
            "paged-rest",
            "--subscription",
            "sub-1",
            "list-features",
            "--namespace",
            "Microsoft.Compute",
            "--max-pages",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.subscription.as_deref(), Some("sub-1"));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::ListFeatures {
                namespace,
                max_pages,
            } => {
                assert_eq!(namespace.as_deref(), Some("Microsoft.Compute"));
                assert_eq!(max_pages, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "paged-rest",
            "get-feature",
            "Microsoft.Compute",
            "AllowPreview",
            "-v",
            "--format",
            "pretty",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(cli.command, Commands::GetFeature { .. }));
    }

    #[test]
    fn test_parse_enum_kind() {
        let cli =
            Cli::try_parse_from(["paged-rest", "parse-enum", "compute-node-state", "idle"]).unwrap();
        match cli.command {
            Commands::ParseEnum { kind, value } => {
                assert_eq!(kind, EnumKind::ComputeNodeState);
                assert_eq!(value, "idle");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_register_requires_both_arguments() {
        assert!(Cli::try_parse_from(["paged-rest", "register-feature", "Microsoft.Compute"]).is_err());
    }
}
