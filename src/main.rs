use clap::Parser;
use sonar_report::cli::dispatcher::{ConnectionOverrides, Dispatcher};
use sonar_report::cli::main_types::Cli;
use sonar_report::storage::config::Config;
use sonar_report::storage::credentials::Credentials;
use sonar_report::utils::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match Config::file_in(cli.config_dir.as_deref()) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Error locating config: {}", err);
            std::process::exit(1);
        }
    };

    let config = match Config::load(Some(config_path.clone())) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };
    log::debug!("Using configuration at {}", config_path.display());

    let profile_name = cli.profile.or_else(|| config.default_profile.clone());
    if let Some(name) = &profile_name {
        log::debug!("Using profile: {}", name);
    }

    let credentials = Credentials::resolve(cli.token);
    if !credentials.has_token() {
        log::warn!("No token given; requests are sent anonymously");
    }

    let overrides = ConnectionOverrides {
        server: cli.server,
        project: cli.project,
        branch: cli.branch,
    };
    let dispatcher = Dispatcher::new(config, profile_name, credentials, overrides);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("[{}] {}", e.severity().label(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}
