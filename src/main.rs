use clap::Parser;
use credhub_interpolate::utils::logger;
use credhub_interpolate::{
    CliConfig, CredHubError, InterpolationClient, InterpolationOperations, ReqwestProvider,
    ServicesData,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Interpolation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: &CliConfig) -> credhub_interpolate::Result<String> {
    let config = cli.client_config()?;
    let services = ServicesData::from_json_str(&cli.read_input()?)?;

    tracing::info!(
        "Interpolating {} service labels via {}",
        services.len(),
        config.url()
    );

    let client = InterpolationClient::new(ReqwestProvider::from_config(&config)?);
    let interpolated = client.interpolate_service_data(&services).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&interpolated)
    } else {
        serde_json::to_string(&interpolated)
    };
    output.map_err(CredHubError::SerializationError)
}
