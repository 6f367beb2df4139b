mod terminal;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fifo_pl_dashboard_core::api::client::FifoPlClient;
use fifo_pl_dashboard_core::api::traits::FifoPlApi;
use fifo_pl_dashboard_core::models::settings::{ClientSettings, DEFAULT_BASE_URL};
use fifo_pl_dashboard_core::models::transaction::TxnType;
use fifo_pl_dashboard_core::render::environment::RenderEnvironment;
use fifo_pl_dashboard_core::{DashboardController, SubmitOutcome};

use terminal::TerminalSurface;

const API_URL_ENV: &str = "FIFO_PL_API_URL";

/// Terminal dashboard for the FIFO profit/loss API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the transactions API. Falls back to $FIFO_PL_API_URL, then the local default.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds. No timeout when omitted.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Skip drawing the chart.
    #[arg(long, global = true)]
    no_chart: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show totals, per-product P&L and the chart.
    Summary,
    /// List all recorded transactions.
    Transactions,
    /// Record a buy or sell, then show the refreshed summary.
    Add {
        #[arg(long)]
        product: String,

        /// buy or sell
        #[arg(long = "type", default_value = "buy")]
        txn_type: TxnType,

        #[arg(long)]
        quantity: f64,

        #[arg(long)]
        price: f64,

        /// ISO-8601 timestamp. Defaults to now.
        #[arg(long)]
        date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    setup_logging();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing::info!(base_url = %settings.base_url, "using FIFO P&L API");

    let client = FifoPlClient::new(settings)?;
    let environment = if args.no_chart {
        RenderEnvironment::server()
    } else {
        RenderEnvironment::browser(Box::new(TerminalSurface::new()))
    };
    let mut dashboard = DashboardController::new(client, environment);

    let result = run(&mut dashboard, args.command).await;
    dashboard.teardown();
    result
}

async fn run<A: FifoPlApi>(
    dashboard: &mut DashboardController<A>,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Summary => {
            // The view is up before the first response arrives.
            dashboard.after_first_render();
            dashboard.initialize().await?;
            print_summary(dashboard);
        }
        Command::Transactions => {
            dashboard.load_transactions().await?;
            print_transactions(dashboard);
        }
        Command::Add {
            product,
            txn_type,
            quantity,
            price,
            date,
        } => {
            let form = dashboard.form_mut();
            form.product = product;
            form.txn_type = txn_type;
            form.quantity = quantity;
            form.price_per_unit = price;
            if let Some(date) = date {
                form.date = date;
            }

            match dashboard.submit_transaction().await {
                SubmitOutcome::Added(created) => {
                    println!(
                        "Added #{}: {} {} x {} @ {:.2}",
                        created.id,
                        created.txn_type,
                        created.product,
                        created.quantity,
                        created.price_per_unit
                    );
                    print_summary(dashboard);
                }
                SubmitOutcome::Invalid(errors) => {
                    for error in &errors {
                        eprintln!("  {error}");
                    }
                    return Err("transaction form is invalid".into());
                }
                SubmitOutcome::Busy => return Err("a submission is already in progress".into()),
                SubmitOutcome::Failed(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

fn print_summary<A: FifoPlApi>(dashboard: &DashboardController<A>) {
    let summary = &dashboard.state().summary;
    println!(
        "Total P&L: {:.2} [{}]",
        summary.total_pnl,
        dashboard.total_pnl_class()
    );
    println!(
        "Transactions: {}  Products: {}  Profitable: {}",
        summary.total_transactions, summary.total_products, summary.profitable_products
    );
    if !dashboard.has_product_data() {
        println!("No product data yet.");
        return;
    }
    for (product, pnl) in summary.pnl_by_product.iter() {
        println!("  {product:<20} {pnl:>12.2} [{}]", dashboard.product_pnl_class(pnl));
    }
}

fn print_transactions<A: FifoPlApi>(dashboard: &DashboardController<A>) {
    let transactions = &dashboard.state().transactions;
    if transactions.is_empty() {
        println!("No transactions recorded.");
        return;
    }
    println!(
        "{:>6}  {:<24}  {:<16}  {:<4}  {:>10}  {:>10}  {:>12}",
        "ID", "Date", "Product", "Type", "Quantity", "Price", "Total"
    );
    for t in transactions {
        println!(
            "{:>6}  {:<24}  {:<16}  {:<4}  {:>10}  {:>10.2}  {:>12.2}",
            t.id,
            t.date,
            t.product,
            t.txn_type.to_string(),
            t.quantity,
            t.price_per_unit,
            t.total_value()
        );
    }
}

/// Flag, then environment, then the built-in default.
fn resolve_settings(args: &Args) -> Result<ClientSettings, Box<dyn std::error::Error>> {
    let url = args
        .api_url
        .clone()
        .or_else(|| std::env::var(API_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut settings = ClientSettings::with_base_url(&url)?;
    if let Some(secs) = args.timeout_secs {
        settings = settings.timeout(Duration::from_secs(secs));
    }
    Ok(settings)
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fifo_pl=info,fifo_pl_dashboard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
