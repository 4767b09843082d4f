use clap::Parser;
use tickerdesk::{App, AppResult, Command, Settings, telemetry};

#[derive(Debug, Parser)]
#[command(version, about = "Tickerdesk chart and order tools")]
struct Cli {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();
    let settings = Settings::load_from(&cli.config)?;
    telemetry::init(&settings.telemetry)?;
    let app = App::new(settings);
    app.run(cli.command).await
}
