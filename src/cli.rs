use clap::{Parser, Subcommand};

/// Command-line arguments for errorshots.
#[derive(Parser, Debug)]
#[clap(
    name = "errorshots",
    version,
    about = "Collect npm error logs and push them to cloud storage"
)]
pub struct Args {
    /// Verbose logging
    #[clap(short, long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Print the discovered log files, one per line
    List,

    /// Upload the discovered log files to a storage provider
    Push {
        /// Storage provider to upload to (supported: s3)
        provider: Option<String>,

        /// Accept an empty ERROR_SHOTS_S3_REGION; URLs then use the default S3 host
        #[clap(long)]
        optional_region: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let args = Args::try_parse_from(["errorshots", "list"]).unwrap();
        assert_eq!(args.command, Commands::List);
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_push_with_provider() {
        let args = Args::try_parse_from(["errorshots", "push", "s3", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert_eq!(
            args.command,
            Commands::Push {
                provider: Some("s3".to_string()),
                optional_region: false,
            }
        );
    }

    #[test]
    fn test_parse_push_without_provider() {
        let args = Args::try_parse_from(["errorshots", "push", "--optional-region"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Push {
                provider: None,
                optional_region: true,
            }
        );
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["errorshots"]).is_err());
    }
}
