use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use argh::FromArgs;
use nightsky::dashboard::resolution_alerts;
use nightsky::render::{Theme, render_dashboard, use_styling};
use nightsky::{
    FjallStore, NightSky, NightSkyConfig, NightSkyError, NoaaClient, UserSettings, classify,
    logging,
};

#[derive(FromArgs)]
/// Current weather, aurora visibility and forecast for a latitude/longitude.
struct Cli {
    /// path to a TOML config file
    #[argh(option)]
    config: Option<PathBuf>,

    /// log at debug level
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// no colour escape codes in output (implied when stdout is not a terminal)
    #[argh(switch)]
    plain: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Check(CheckArgs),
    Aurora(AuroraArgs),
    Set(SetArgs),
    Settings(SettingsArgs),
    Kp(KpArgs),
}

#[derive(FromArgs)]
/// Weather and aurora visibility; blank input uses the saved location.
#[argh(subcommand, name = "check")]
struct CheckArgs {
    /// latitude in decimal degrees
    #[argh(option, default = "String::new()")]
    lat: String,

    /// longitude in decimal degrees
    #[argh(option, default = "String::new()")]
    lon: String,

    /// include the four-day forecast
    #[argh(switch)]
    forecast: bool,
}

#[derive(FromArgs)]
/// Solar weather card only.
#[argh(subcommand, name = "aurora")]
struct AuroraArgs {
    /// latitude in decimal degrees
    #[argh(option, default = "String::new()")]
    lat: String,
}

#[derive(FromArgs)]
/// Save a location for later checks.
#[argh(subcommand, name = "set")]
struct SetArgs {
    /// latitude in decimal degrees
    #[argh(option)]
    lat: String,

    /// longitude in decimal degrees
    #[argh(option)]
    lon: String,
}

#[derive(FromArgs)]
/// Show or change user settings.
#[argh(subcommand, name = "settings")]
struct SettingsArgs {
    /// turn dark mode on or off (true/false)
    #[argh(option)]
    dark_mode: Option<bool>,
}

#[derive(FromArgs)]
/// Classify visibility for a K-index and latitude without any lookups.
#[argh(subcommand, name = "kp")]
struct KpArgs {
    /// planetary K-index
    #[argh(option)]
    kp: i32,

    /// latitude in decimal degrees
    #[argh(option)]
    lat: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli: Cli = argh::from_env();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = NightSkyConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!("Using store at {}", config.store.location);

    if let Command::Kp(args) = &cli.command {
        let verdict = classify(args.kp, args.lat);
        println!("{verdict}: {}", verdict.message());
        return Ok(());
    }

    let store = FjallStore::open(&config.store.location).with_context(|| {
        format!("Failed to open preference store at {}", config.store.location)
    })?;
    let services = NoaaClient::new(&config.services)?;
    let app = NightSky::new(services, store);

    let settings = app.settings().await?;
    let no_color = std::env::var("NO_COLOR").ok();
    let styled = use_styling(std::io::stdout().is_terminal(), no_color.as_deref());
    let theme = Theme::select(&settings, cli.plain || !styled);

    match cli.command {
        Command::Check(args) => {
            let dashboard = app.check(&args.lat, &args.lon, args.forecast).await?;
            print!("{}", render_dashboard(&dashboard, theme));
        }
        Command::Aurora(args) => {
            let dashboard = app.aurora(&args.lat).await?;
            print!("{}", render_dashboard(&dashboard, theme));
        }
        Command::Set(args) => match app.save_location(&args.lat, &args.lon).await {
            Ok(coordinate) => println!("Saved location {}", coordinate.format_coordinates()),
            Err(err @ NightSkyError::Validation { .. }) => {
                for alert in resolution_alerts(&err) {
                    println!("! {alert}");
                }
            }
            Err(err) => return Err(err.into()),
        },
        Command::Settings(args) => {
            let settings: UserSettings = match args.dark_mode {
                Some(darkmode) => app.set_dark_mode(darkmode).await?,
                None => settings,
            };
            println!("Dark mode: {}", if settings.darkmode { "on" } else { "off" });
        }
        Command::Kp(_) => {}
    }

    Ok(())
}
