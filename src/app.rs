use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;
use tracing::{info, warn};

use crate::config::Settings;
use crate::engine::{SearchOutcome, SearchSession};
use crate::errors::AppResult;
use crate::marketdata::{ChartPeriod, HistoricalSeries};
use crate::orders::{OrderRecord, OrderSide, OrderTicket};
use crate::storage::documents::{print_json, read_json};
use crate::tables::{DateRange, HoldingRow, OrderFilter, SideFilter, TextQuery};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Moving-average overlays for a `{dates, prices, volumes}` document.
    Overlays {
        #[arg(short, long)]
        input: PathBuf,
        /// Overrides `charts.overlay_windows`; repeatable.
        #[arg(short, long = "window")]
        windows: Vec<usize>,
        #[arg(short, long)]
        period: Option<ChartPeriod>,
    },
    /// Filter an order history document.
    Orders {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value = "ALL")]
        side: SideFilter,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Debounced search over holdings; one query input per stdin line.
    Search {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Validate an order ticket and print its request body.
    Ticket {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        side: OrderSide,
        #[arg(long)]
        quantity: String,
        #[arg(long)]
        price: String,
    },
}

#[derive(Debug, Serialize)]
struct TicketPreview<'a> {
    request: &'a OrderTicket,
    total: String,
}

pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(self, command: Command) -> AppResult<()> {
        match command {
            Command::Overlays {
                input,
                windows,
                period,
            } => self.overlays(input, windows, period),
            Command::Orders {
                input,
                query,
                side,
                from,
                to,
            } => self.orders(input, query, side, from, to),
            Command::Search { input } => self.search(input).await,
            Command::Ticket {
                symbol,
                side,
                quantity,
                price,
            } => self.ticket(&symbol, side, &quantity, &price),
        }
    }

    fn overlays(
        &self,
        input: PathBuf,
        windows: Vec<usize>,
        period: Option<ChartPeriod>,
    ) -> AppResult<()> {
        let series: HistoricalSeries = read_json(&input)?;
        let windows = if windows.is_empty() {
            self.settings.charts.overlay_windows.clone()
        } else {
            windows
        };
        let view = series.into_chart(&windows, period)?;
        info!(points = view.series.len(), ?windows, "overlays computed");
        print_json(&view)
    }

    fn orders(
        &self,
        input: PathBuf,
        query: Option<String>,
        side: SideFilter,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<()> {
        let orders: Vec<OrderRecord> = read_json(&input)?;
        let dates = if from.is_none() && to.is_none() {
            None
        } else {
            Some(DateRange::from_bounds(from, to)?)
        };
        let filter = OrderFilter {
            query: TextQuery::new(query.as_deref().unwrap_or_default()),
            side,
            dates,
        };
        print_json(&filter.apply(&orders))
    }

    async fn search(&self, input: PathBuf) -> AppResult<()> {
        let holdings: Vec<HoldingRow> = read_json(&input)?;
        let session = SearchSession::new(holdings, &self.settings.search);
        let stdin = BufReader::new(tokio::io::stdin());
        let inputs = LinesStream::new(stdin.lines()).filter_map(|line| match line {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(error = %e, "unable to read query input");
                None
            }
        });

        session
            .run(inputs, |outcome| match outcome {
                SearchOutcome::Cleared => println!("-- cleared"),
                SearchOutcome::Matches { query, rows } => {
                    println!("-- {query}: {} match(es)", rows.len());
                    for row in rows {
                        println!("{}", row.display_line());
                    }
                }
            })
            .await?;
        Ok(())
    }

    fn ticket(&self, symbol: &str, side: OrderSide, quantity: &str, price: &str) -> AppResult<()> {
        let ticket = OrderTicket::parse(symbol, side, quantity, price)?;
        info!(ticket = %ticket.describe(), "ticket ready");
        print_json(&TicketPreview {
            request: &ticket,
            total: ticket.total_display(),
        })
    }
}
