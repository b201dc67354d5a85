use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use conduit_llm::Provider;
use conduit_session::{AppConfig, ConversationEntry, EntryDisplay, Session, UseCase};

#[derive(Parser)]
#[command(name = "conduit", version, about = "Chatbot, web search agent and AI news summarizer")]
struct Cli {
    /// Model provider (openai, groq, gemini); overrides the config file
    #[arg(long)]
    provider: Option<String>,

    /// Model name; overrides the config file
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the plain chatbot
    Chat {
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
    },
    /// Ask the chatbot that can search the web
    Web {
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
    },
    /// Summarize the latest AI news
    News {
        /// daily, weekly, monthly or yearly
        #[arg(long, short)]
        window: Option<String>,
        /// Also save the summary as ai_news_summary.md in this directory
        #[arg(long)]
        download: Option<PathBuf>,
    },
    /// Interactive conversation
    Repl {
        #[arg(long, default_value = "chatbot")]
        use_case: String,
    },
    /// Print a use case's graph as Mermaid
    Graph {
        #[arg(default_value = "chatbot")]
        use_case: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    let provider = cli.provider.as_deref().map(str::parse::<Provider>).transpose()?;
    config.apply_overrides(provider, cli.model.clone());
    config
        .load_secrets()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!(provider = %config.llm.provider, model = %config.llm.model, "Starting conduit");

    let mut session = Session::from_config(&config)?;

    match cli.command {
        Commands::Chat { prompt } => {
            run_turn(&mut session, UseCase::Chatbot, &prompt.join(" ")).await?;
        }
        Commands::Web { prompt } => {
            run_turn(&mut session, UseCase::ChatbotWithWebSearch, &prompt.join(" ")).await?;
        }
        Commands::News { window, download } => {
            let window = window.unwrap_or_else(|| config.news.time_window.clone());
            run_turn(&mut session, UseCase::AiNewsSummarizer, &window).await?;

            if let Some(dir) = download {
                if let Some(document) = session.latest_summary_document() {
                    let path = document.save_to(&dir).await?;
                    println!("Saved {}", path.display());
                }
            }
        }
        Commands::Repl { use_case } => {
            repl(&mut session, use_case.parse()?).await?;
        }
        Commands::Graph { use_case } => {
            let graph = session.graph(use_case.parse()?)?;
            print!("{}", graph.to_mermaid());
        }
    }

    Ok(())
}

async fn run_turn(session: &mut Session, use_case: UseCase, input: &str) -> anyhow::Result<()> {
    match session.submit_with(use_case, input, print_entry).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::error!(use_case = %use_case, error = %e, "Turn failed");
            Err(e.into())
        }
    }
}

async fn repl(session: &mut Session, use_case: UseCase) -> anyhow::Result<()> {
    println!("{} (empty line to quit)", use_case);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }

        if let Err(e) = session.submit_with(use_case, line.trim(), print_entry).await {
            eprintln!("error: {}", e);
        }
    }
    Ok(())
}

fn print_entry(entry: &ConversationEntry) {
    match entry.display() {
        EntryDisplay::Hidden => {}
        EntryDisplay::Inline => println!("{}: {}", entry.role, entry.content),
        EntryDisplay::Collapsed => {
            let preview: String = entry.content.chars().take(120).collect();
            println!("[{} {}] {}...", entry.role, entry.call_id.as_deref().unwrap_or("-"), preview);
        }
    }
}

fn init_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
                .init();
        }
    }
}
