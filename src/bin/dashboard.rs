use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use time::{Date, OffsetDateTime};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use budget_dashboard::{
    ClientConfig, DEFAULT_API_BASE, Dashboard, EChartsBackend, Error, HtmlDashboard, HttpApi,
    MonthKey, NewTransaction, TransactionId,
};

/// Renders the budget dashboard for the persistence service to an HTML file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the persistence and insights service.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Where to write the rendered page.
    #[arg(short, long, default_value = "dashboard.html")]
    output: PathBuf,

    /// The month the category chart covers, as YYYY-MM. Defaults to the current month.
    #[arg(long)]
    month: Option<MonthKey>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the latest data and render the page.
    Show,

    /// Add a transaction, then render the page.
    Add {
        /// The date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// The amount, e.g. 12.50.
        #[arg(long)]
        amount: String,

        /// Either income or expense.
        #[arg(long = "type", default_value = "expense")]
        kind: String,

        /// A label such as Food or Salary.
        #[arg(long)]
        category: String,

        /// An optional note.
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Delete a transaction, then render the page.
    Delete {
        /// The ID of the transaction to delete.
        id: TransactionId,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::ValidationRejected(message)) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(args: Args) -> Result<(), Error> {
    let config = ClientConfig::new(&args.api_base)?;
    let today = local_date();
    let month = args.month.unwrap_or_else(|| MonthKey::of(today));

    let dashboard = Dashboard::new(
        HttpApi::new(&config)?,
        EChartsBackend::default(),
        HtmlDashboard::new(today),
    );

    match args.command {
        Command::Show => {
            dashboard.refresh(month).await?;
        }
        Command::Add {
            date,
            amount,
            kind,
            category,
            note,
        } => {
            dashboard.view_mut().set_form_input(NewTransaction {
                date: date.unwrap_or_else(|| today.to_string()),
                amount,
                kind,
                category,
                note,
            });
            dashboard.submit_form(today, month).await?;
        }
        Command::Delete { id } => {
            dashboard.delete_transaction(id, month).await?;
        }
    }

    write_page(&args.output, &dashboard.render_page().into_string())
}

fn local_date() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(error) => {
            tracing::warn!("could not get the local time, using UTC instead: {error}");
            OffsetDateTime::now_utc().date()
        }
    }
}

fn write_page(path: &Path, page: &str) -> Result<(), Error> {
    fs::write(path, page)
        .map_err(|error| Error::WritePage(path.display().to_string(), error.to_string()))?;

    tracing::info!("wrote the dashboard to {}", path.display());

    Ok(())
}
