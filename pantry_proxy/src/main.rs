use anyhow::Result;
use clap::{value_parser, Arg};
use pantry_proxy::{
    server::{self, AppState},
    CatalogClient, CatalogConfig, Credentials,
};
use tracing_subscriber::EnvFilter;

fn init_app_cli_arguments() -> clap::Command {
    clap::Command::new("pantry_proxy")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("127.0.0.1")
                .help("Address to listen on"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .default_value("54321")
                .value_parser(value_parser!(u16))
                .help("Port to listen on"),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pantry_proxy=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = init_app_cli_arguments().get_matches();
    let host = args
        .get_one::<String>("host")
        .expect("host should have a default value");
    let port = *args
        .get_one::<u16>("port")
        .expect("port should have a default value");

    let credentials = Credentials::from_env();
    if credentials.is_none() {
        tracing::warn!(
            "SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set, requests will fail until both are provided"
        );
    }

    let catalog = CatalogClient::new(CatalogConfig::default(), credentials);
    server::serve((host.as_str(), port), AppState::new(catalog)).await
}
