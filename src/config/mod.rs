pub mod toml_config;

pub use toml_config::ClientConfig;

#[cfg(feature = "cli")]
pub mod cli {
    use super::ClientConfig;
    use crate::utils::error::{CredHubError, Result};
    use crate::utils::validation::{validate_required_field, Validate};
    use clap::Parser;
    use std::io::Read;
    use std::path::PathBuf;

    pub const VCAP_SERVICES: &str = "VCAP_SERVICES";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "credhub-interpolate")]
    #[command(about = "Resolve CredHub credential references in service bindings")]
    pub struct CliConfig {
        #[arg(long, help = "TOML configuration file, takes precedence over --url")]
        pub config: Option<PathBuf>,

        #[arg(long, env = "CREDHUB_URL", help = "CredHub base URL")]
        pub url: Option<String>,

        #[arg(
            long,
            help = "Services data JSON file, '-' for stdin (defaults to $VCAP_SERVICES)"
        )]
        pub input: Option<String>,

        #[arg(long, help = "Pretty-print the interpolated JSON")]
        pub pretty: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines on stderr")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// 優先使用 --config，否則以 --url 建立預設配置
        pub fn client_config(&self) -> Result<ClientConfig> {
            let config = match &self.config {
                Some(path) => ClientConfig::from_file(path)?,
                None => ClientConfig::new(validate_required_field("url", &self.url)?.clone()),
            };
            config.validate()?;
            Ok(config)
        }

        pub fn read_input(&self) -> Result<String> {
            self.read_input_from(std::io::stdin(), VCAP_SERVICES)
        }

        /// `-` 讀取 `stdin`，未指定 --input 時讀取 `env_var` 環境變數
        fn read_input_from<R: Read>(&self, mut stdin: R, env_var: &str) -> Result<String> {
            match self.input.as_deref() {
                Some("-") => {
                    let mut content = String::new();
                    stdin.read_to_string(&mut content)?;
                    Ok(content)
                }
                Some(path) => Ok(std::fs::read_to_string(path)?),
                None => std::env::var(env_var).map_err(|_| CredHubError::MissingConfigError {
                    field: format!("--input or ${}", env_var),
                }),
            }
        }
    }

}
