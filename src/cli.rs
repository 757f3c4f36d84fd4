// src/cli.rs

use clap::Parser;

/// Download folders and files from Github.
///
/// github-dlr takes the URL of a folder (or a single file) as shown in the
/// GitHub web UI, walks the folder through the GitHub contents API and
/// downloads every file concurrently, reproducing the folder structure
/// locally. Set GITHUB_ACCESS_TOKEN (environment or a .env file) to access
/// private repositories or raise the API rate limit.
#[derive(Parser, Debug)]
#[command(name = "github-dlr", author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Thanks for using github-dlr!")]
pub struct Cli {
    /// Github directory full URL path, e.g. https://github.com/owner/repo/tree/main/docs.
    #[arg(value_name = "GITHUB_PATH")]
    pub github_path: String,

    /// Destination directory to download to (defaults to the current directory).
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<String>,

    /// Ignore files with these extensions (plain suffix match, repeatable).
    #[arg(short = 'i', long = "ignore-extensions", value_name = "EXT", num_args = 1..)]
    pub ignore_extensions: Option<Vec<String>>,

    /// Maximum number of files downloaded at the same time (default: no limit).
    #[arg(short = 'c', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Do not descend more than this many directory levels below the requested folder.
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Base URL of the GitHub REST API (e.g. for GitHub Enterprise).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Print version.
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::parse_from([
            "github-dlr",
            "https://github.com/o/r/tree/main/docs",
            "-o",
            "out",
            "-i",
            ".md",
            ".png",
            "-c",
            "4",
            "--max-depth",
            "2",
        ]);
        assert_eq!(cli.github_path, "https://github.com/o/r/tree/main/docs");
        assert_eq!(cli.output.as_deref(), Some("out"));
        assert_eq!(
            cli.ignore_extensions,
            Some(vec![".md".to_string(), ".png".to_string()])
        );
        assert_eq!(cli.concurrency, Some(4));
        assert_eq!(cli.max_depth, Some(2));
        assert_eq!(cli.api_url, None);
    }

    #[test]
    fn test_github_path_is_required() {
        assert!(Cli::try_parse_from(["github-dlr"]).is_err());
    }

    #[test]
    fn test_short_version_flag() {
        let error = Cli::try_parse_from(["github-dlr", "-v"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
