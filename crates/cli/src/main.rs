use anyhow::Context;
use clap::{Parser, Subcommand};
use omaha_core::agent::http::HttpAgentClient;
use omaha_core::agent::AgentClient;
use omaha_core::config::Settings;
use omaha_core::invest::{InvestmentClient, InvestmentSuggestion};
use omaha_core::view::{ChatView, DashboardView, MarketsView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

#[derive(Debug, Parser)]
#[command(name = "omaha", about = "Stock desk for the value-investing agent")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Chat with the agent. Without --message, reads lines from stdin until EOF or /quit.
    Chat {
        /// Message to send; repeat to send several in one conversation.
        #[arg(long = "message", short = 'm')]
        messages: Vec<String>,
    },

    /// Top picks and portfolio positions.
    Dashboard {
        /// Analyze every position, one request at a time.
        #[arg(long)]
        analyze: bool,

        /// Show details for one position.
        #[arg(long)]
        select: Option<String>,

        /// Submit buy-rated positions to the investment endpoint (implies --analyze).
        #[arg(long)]
        invest: bool,
    },

    /// Trending stocks and symbol search.
    Markets {
        /// Free-text search, e.g. "soft drinks".
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        select: Option<String>,
    },

    /// Value-investing analysis of one symbol.
    Analyze { symbol: String },

    /// Submit suggestions given as SYMBOL:QTY[:short|long].
    Invest {
        #[arg(required = true)]
        suggestions: Vec<String>,
    },

    /// Check that the agent is up.
    Health,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let agent = HttpAgentClient::from_settings(&settings)?;
    tracing::debug!(base_url = %settings.agent_base_url, "agent client ready");

    let result = run(args.command, &settings, &agent).await;
    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "command failed");
    }
    result
}

async fn run(command: Command, settings: &Settings, agent: &dyn AgentClient) -> anyhow::Result<()> {
    match command {
        Command::Chat { messages } => chat(agent, messages).await,
        Command::Dashboard {
            analyze,
            select,
            invest,
        } => dashboard(settings, agent, analyze || invest, select, invest).await,
        Command::Markets { search, select } => markets(agent, search, select).await,
        Command::Analyze { symbol } => analyze(agent, &symbol).await,
        Command::Invest { suggestions } => {
            let suggestions = suggestions
                .iter()
                .map(|s| s.parse::<InvestmentSuggestion>())
                .collect::<anyhow::Result<Vec<_>>>()?;
            InvestmentClient::from_settings(settings)?
                .submit(&suggestions)
                .await?;
            println!("Submitted {} suggestion(s).", suggestions.len());
            Ok(())
        }
        Command::Health => {
            let health = agent.health().await.context("agent health check failed")?;
            println!(
                "{} {} ({})",
                health.service.as_deref().unwrap_or("agent"),
                health.version.as_deref().unwrap_or(""),
                health.status
            );
            anyhow::ensure!(health.is_healthy(), "agent reports status={}", health.status);
            Ok(())
        }
    }
}

async fn chat(agent: &dyn AgentClient, messages: Vec<String>) -> anyhow::Result<()> {
    let mut view = ChatView::new();

    if !messages.is_empty() {
        for text in messages {
            send_and_print(&mut view, agent, &text).await;
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        send_and_print(&mut view, agent, line).await;
    }
    Ok(())
}

async fn send_and_print(view: &mut ChatView, agent: &dyn AgentClient, text: &str) {
    match view.send(agent, text).await {
        Ok(_) => {
            if let Some(reply) = view.session.messages().last() {
                println!("{}", render::message(reply));
            }
        }
        Err(err) => eprintln!("not sent: {err:#}"),
    }
}

async fn dashboard(
    settings: &Settings,
    agent: &dyn AgentClient,
    analyze: bool,
    select: Option<String>,
    invest: bool,
) -> anyhow::Result<()> {
    let mut view = DashboardView::new();
    view.load_all(agent).await;

    if analyze {
        let analyzed = view
            .analyze_positions(agent, settings.analysis_delay)
            .await;
        tracing::info!(analyzed, positions = view.positions.items.len(), "positions analyzed");
    }

    println!("{}", render::quotes("Top picks", &view.top_picks));
    println!("{}", render::positions(&view.positions, &view.summary()));

    if let Some(symbol) = select {
        if view.select(&symbol) {
            if let Some(record) = view.selected().and_then(|p| p.analysis.as_ref()) {
                println!("{}", render::analysis(record));
            }
        } else {
            eprintln!("{symbol} is not in the portfolio");
        }
    }

    if invest {
        let suggestions = view.investment_suggestions();
        if suggestions.is_empty() {
            println!("No buy-rated positions to submit.");
        } else {
            match InvestmentClient::from_settings(settings) {
                Ok(client) => {
                    if let Err(err) = client.submit(&suggestions).await {
                        tracing::warn!(error = %format!("{err:#}"), "investment submission failed");
                        eprintln!("investment submission failed: {err:#}");
                    } else {
                        println!("Submitted {} suggestion(s).", suggestions.len());
                    }
                }
                Err(err) => eprintln!("cannot submit: {err:#}"),
            }
        }
    }

    Ok(())
}

async fn markets(
    agent: &dyn AgentClient,
    search: Option<String>,
    select: Option<String>,
) -> anyhow::Result<()> {
    let mut view = MarketsView::new();

    match search {
        Some(query) => {
            view.search(agent, &query).await?;
            println!("{}", render::quotes(&format!("Results for \"{query}\""), &view.results));
        }
        None => {
            view.load_trending(agent).await;
            println!("{}", render::quotes("Trending", &view.trending));
            println!("{}", render::breadth(&view.breadth()));
        }
    }

    if let Some(symbol) = select {
        match view.select(&symbol).then(|| view.selected()).flatten() {
            Some(quote) => println!("{}", serde_json::to_string_pretty(quote)?),
            None => eprintln!("{symbol} is not listed"),
        }
    }

    Ok(())
}

async fn analyze(agent: &dyn AgentClient, symbol: &str) -> anyhow::Result<()> {
    let symbol = omaha_core::agent::normalize_symbol(symbol)?;
    let record = match agent.analyze(&symbol).await {
        Ok(record) => record,
        Err(err) => {
            tracing::warn!(%symbol, error = %format!("{err:#}"), "analysis failed; showing placeholder");
            omaha_core::demo::analysis(&symbol)
        }
    };
    println!("{}", render::analysis(&record));
    println!("generated {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
