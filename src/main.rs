use clap::Parser;
use qa_fixture::core::ConfigProvider;
use qa_fixture::utils::{logger, validation::Validate};
use qa_fixture::{
    CliConfig, EtlEngine, FixturePipeline, HttpTableSource, LocalStorage, Result, TomlConfig,
};

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<String> {
    config.validate()?;

    let source = HttpTableSource::from_config(&config);
    let storage = LocalStorage::new(config.output_dir().to_string());
    let pipeline = FixturePipeline::new(source, storage, config);

    EtlEngine::new(pipeline).run().await
}

fn load_toml(path: &str, max_rows_override: Option<usize>) -> Result<TomlConfig> {
    tracing::info!("Loading configuration from: {}", path);
    let mut config = TomlConfig::from_file(path)?;

    if let Some(max_rows) = max_rows_override {
        config.extract.max_rows = Some(max_rows);
        tracing::info!("Row limit overridden to: {}", max_rows);
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting qa-fixture");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.config.as_deref() {
        Some(path) => match load_toml(path, cli.max_rows) {
            Ok(config) => run(config).await,
            Err(e) => Err(e),
        },
        None => run(cli.clone()).await,
    };

    match result {
        Ok(output_path) => {
            println!("Fixture written to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "Fixture generation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            eprintln!("error: {}", e);
            eprintln!("hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
