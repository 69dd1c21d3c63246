use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sonar-report")]
#[command(about = "Collect issues, facets and quality profiles of a project from a SonarQube server")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Named server profile from the configuration file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[arg(long, global = true)]
    pub config_dir: Option<String>,

    /// Server URL, overrides the profile
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Authentication token
    #[arg(long, global = true, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Project key
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Branch to report on, overrides the profile
    #[arg(long, global = true)]
    pub branch: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect the whole report and export it
    Report {
        /// Directory the JSON report and profile exports are written to
        #[arg(short, long, default_value = ".")]
        output: String,
    },
    /// List project issues
    Issues {
        /// Issues resolved as false positive or won't fix
        #[arg(long, conflicts_with = "raw")]
        unconfirmed: bool,
        /// Print issues as JSON, exactly as the server sent them
        #[arg(long)]
        raw: bool,
        /// Limit the number of rows shown
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Show issue counts per severity, type, rule, status and tag
    Facets,
    /// List the quality profiles used by the project
    Profiles,
    /// Show server version and health status
    Status,
}
