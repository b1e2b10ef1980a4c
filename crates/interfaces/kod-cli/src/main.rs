use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use kod_app_core::ports::EventsRenderer;
use kod_cli::commands::{self, EventsRequest};
use kod_cli::render::{JsonRenderer, TextRenderer};
use kod_cli::OutputFormat;
use kod_core::contact::ContactSubmission;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the events catalog and show the filtered listing
    Events {
        /// Site base URL or a local directory mirroring the site root
        #[arg(long, env = "KOD_SITE")]
        site: String,
        /// Page path with optional query, e.g. "/en/events?year=2025"
        #[arg(long, default_value = "/")]
        location: String,
        #[arg(long, help = "Reset every filter before applying the others")]
        clear: bool,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long, help = "Genre key or Turkish label; empty selects all")]
        genre: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, help = "Venue key or Turkish label; empty selects all")]
        venue: Option<String>,
    },
    /// Show the upcoming-events timeline
    Upcoming {
        #[arg(long, env = "KOD_SITE")]
        site: String,
        #[arg(long, default_value = "/")]
        location: String,
        #[arg(long, help = "Reference date (YYYY-MM-DD); defaults to today")]
        today: Option<NaiveDate>,
    },
    /// Validate a contact form submission and print the resulting mail
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long)]
        referer: Option<String>,
    },
}

fn renderer(format: OutputFormat) -> Box<dyn EventsRenderer> {
    let out = std::io::stdout();
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(out)),
        OutputFormat::Json => Box::new(JsonRenderer::new(out)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Events {
            site,
            location,
            clear,
            artist,
            genre,
            year,
            venue,
        } => {
            let req = EventsRequest {
                site,
                location,
                clear,
                artist,
                genre,
                year,
                venue,
            };
            let outcome = commands::cmd_events(req, renderer(cli.format).as_mut()).await?;
            if outcome.failed() {
                anyhow::bail!("events catalog could not be loaded");
            }
            if let (Some(url), OutputFormat::Text) = (&outcome.url, cli.format) {
                println!();
                println!(":: {url}");
            }
        }
        Commands::Upcoming {
            site,
            location,
            today,
        } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            commands::cmd_upcoming(&site, &location, today, renderer(cli.format).as_mut()).await?;
        }
        Commands::Contact {
            name,
            email,
            message,
            referer,
        } => {
            let submission = ContactSubmission {
                name,
                email,
                message,
            };
            let outcome = commands::cmd_contact(
                &submission,
                referer.as_deref(),
                Local::now().naive_local(),
                cli.format == OutputFormat::Json,
                &mut std::io::stdout(),
            )?;
            if matches!(outcome, commands::ContactOutcome::Rejected { .. }) {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
