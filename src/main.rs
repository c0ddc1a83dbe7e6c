use feedex::app::App;
use feedex::config::Config;
use feedex::feed::{BlockFeedView, RefreshOutcome};
use feedex::files;
use feedex::logging;
use feedex::rpc::{self, Block, RpcClient, Transport};
use feedex::ui;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{error, info};
use tui_input::backend::crossterm::EventHandler;

#[derive(Parser)]
#[command(name = "feedex", version, about = "Terminal block feed explorer")]
struct Cli {
    /// Override the configured RPC URL for this run
    #[arg(long, global = true, env = "FEEDEX_RPC_URL")]
    rpc: Option<String>,

    /// Talk to the plain REST variant of the block source
    #[arg(long, global = true)]
    rest: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Persist the RPC URL to the config file
    SetRpc { url: String },
    /// Fetch the feed once and print the (filtered) blocks
    Blocks {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Mint a new block
    Mint,
    /// Upload a file through `upload_file`
    Upload { path: PathBuf },
    /// Download a file by id through `get_file`
    Download {
        id: String,
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    logging::init(&config);

    if let Some(url) = cli.rpc.clone() {
        config.rpc_url = Some(url);
    }
    if cli.rest {
        config.transport = Transport::Rest;
    }

    match cli.command {
        None => run_tui(config).await,
        Some(Command::SetRpc { url }) => {
            rpc::connect(&url, config.transport)?;
            config.set_rpc(url.clone())?;
            println!("RPC set to {url}");
            Ok(())
        }
        Some(Command::Blocks { query }) => print_blocks(&config, query).await,
        Some(Command::Mint) => mint(&config).await,
        Some(Command::Upload { path }) => {
            let client = files_client(&config)?;
            let uploaded = files::upload(&client, &path).await?;
            println!(
                "Uploaded {} ({} bytes) as {}",
                uploaded.filename, uploaded.size, uploaded.id
            );
            Ok(())
        }
        Some(Command::Download { id, out }) => {
            let client = files_client(&config)?;
            let path = files::download(&client, &id, &out).await?;
            println!("Saved {}", path.display());
            Ok(())
        }
    }
}

fn require_rpc(config: &Config) -> Result<&str> {
    config
        .rpc_url
        .as_deref()
        .ok_or_else(|| anyhow!("No RPC configured. Use 'feedex set-rpc <url>' first."))
}

fn files_client(config: &Config) -> Result<RpcClient> {
    let url = config
        .files_url()
        .ok_or_else(|| anyhow!("No RPC configured. Use 'feedex set-rpc <url>' first."))?;
    RpcClient::new(url)
}

async fn print_blocks(config: &Config, query: Option<String>) -> Result<()> {
    let source = rpc::connect(require_rpc(config)?, config.transport)?;
    let view = BlockFeedView::new(source);
    view.set_search_query(query.unwrap_or_default());

    if view.refresh().await != RefreshOutcome::Applied {
        let msg = view.snapshot().last_error.unwrap_or_default();
        return Err(anyhow!(msg));
    }

    let state = view.snapshot();
    println!(
        "blocks: {}  transactions: {}  tokens: {}",
        state.total_blocks,
        state.filtered_tx_count(),
        state.total_tokens
    );
    for block in state.filtered_blocks() {
        print_block(block);
    }
    Ok(())
}

fn print_block(block: &Block) {
    println!("#{} {} ({} tokens)", block.index, block.hash, block.tokens);
    for tx in &block.transactions {
        println!(
            "    {} -> {}  amount {}  gas {}",
            tx.sender, tx.receiver, tx.amount, tx.gas_cost
        );
    }
}

async fn mint(config: &Config) -> Result<()> {
    let source = rpc::connect(require_rpc(config)?, config.transport)?;
    let block = source
        .create_block()
        .await
        .context("Failed to create block")?;
    print_block(&block);
    Ok(())
}

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    BlockCreated(Option<Block>),
    Refreshed(RefreshOutcome),
}

async fn run_tui(config: Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);
    app.start_feed();

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(10);

    let result = run_event_loop(&mut terminal, &mut app, tx, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    if let Err(e) = &result {
        error!(error = %e, "event loop exited with error");
    }
    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Check for async results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AsyncMessage::BlockCreated(block) => app.block_created(block),
                AsyncMessage::Refreshed(_) => app.clear_status(),
            }
        }

        // Poll for input events
        if event::poll(std::time::Duration::from_millis(50))? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

                // Global keys
                match key.code {
                    KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('c') if ctrl => {
                        app.should_quit = true;
                    }
                    _ => {}
                }

                if app.needs_rpc_setup() {
                    match key.code {
                        KeyCode::Enter => match app.submit_rpc() {
                            Ok(()) => app.start_feed(),
                            Err(e) => app.set_status(&e),
                        },
                        KeyCode::Esc => {}
                        _ => {
                            app.rpc_input.handle_event(&ev);
                        }
                    }
                } else if app.is_on_feed() {
                    match key.code {
                        KeyCode::Char('n') if ctrl => {
                            if let Some(feed) = app.feed_handle() {
                                app.set_status("Creating block...");
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let block = feed.create_block().await;
                                    let _ = tx.send(AsyncMessage::BlockCreated(block)).await;
                                });
                            }
                        }
                        KeyCode::Char('r') if ctrl => {
                            if let Some(feed) = app.feed_handle() {
                                app.set_status("Refreshing...");
                                let tx = tx.clone();
                                tokio::spawn(async move {
                                    let outcome = feed.refresh().await;
                                    let _ = tx.send(AsyncMessage::Refreshed(outcome)).await;
                                });
                            }
                        }
                        KeyCode::Up => app.select_prev(),
                        KeyCode::Down => app.select_next(),
                        KeyCode::Enter => {
                            if app.open_selected_block() {
                                info!("opened block detail");
                            }
                        }
                        KeyCode::Esc => {}
                        _ => {
                            if app.search_input.handle_event(&ev).is_some() {
                                app.sync_search_query();
                            }
                        }
                    }
                } else {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
                        KeyCode::Backspace | KeyCode::Char('b') => app.go_back(),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(feed) = app.feed.as_mut() {
        feed.stop();
    }

    Ok(())
}
