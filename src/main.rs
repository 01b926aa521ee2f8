use clap::{Parser, Subcommand};
use inlaw::api::{AnswerResponse, ApiClient, LegalAdvisor};
use inlaw::core::config::{self, InlawConfig, ResolvedConfig};
use inlaw::core::question::{MAX_QUESTION_CHARS, Question};
use inlaw::tui;
use inlaw::tui::components::answer_panel::AnswerSections;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "inlaw", about = "Ask questions about Indian law from the terminal")]
struct Args {
    /// Backend base URL (overrides config file and INLAW_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Where to write the debug log
    #[arg(long, default_value = "inlaw.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the backend reports itself healthy
    Health,
    /// Print the backend's info banner
    Info,
    /// Ask a single question and print the answer
    Ask { question: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the TUI owns stdout
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("Ignoring unreadable config: {}", e);
            InlawConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.api_url.as_deref());

    log::info!("InLaw starting up against {}", resolved.base_url);

    match args.command {
        None => match tui::run(resolved) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Terminal error: {}", e);
                ExitCode::FAILURE
            }
        },
        Some(command) => run_command(command, resolved).await,
    }
}

async fn run_command(command: Command, config: ResolvedConfig) -> ExitCode {
    let client = ApiClient::new(config.base_url, config.timeout);

    match command {
        Command::Health => {
            if client.check_server_health().await {
                println!("healthy ({})", client.base_url());
                ExitCode::SUCCESS
            } else {
                println!("unhealthy ({})", client.base_url());
                ExitCode::FAILURE
            }
        }
        Command::Info => match client.get_api_info().await {
            Ok(serde_json::Value::String(body)) => {
                println!("{}", body);
                ExitCode::SUCCESS
            }
            Ok(info) => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&info).unwrap_or_else(|_| info.to_string())
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Command::Ask { question } => {
            let Some(question) = Question::parse(&question) else {
                eprintln!(
                    "Question must be between 1 and {} characters",
                    MAX_QUESTION_CHARS
                );
                return ExitCode::FAILURE;
            };
            match client.ask_legal_question(question.as_str()).await {
                Ok(response) => {
                    print_answer(&response);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn print_answer(response: &AnswerResponse) {
    let sections = AnswerSections::new(response);

    match &sections.score {
        Some(score) => println!("[{}] {}", sections.badge.label(), score),
        None => println!("[{}]", sections.badge.label()),
    }
    println!();
    for paragraph in &sections.paragraphs {
        println!("{}", paragraph.trim());
        println!();
    }
    if let Some(sources) = sections.sources {
        println!("Sources:");
        for (i, source) in sources.iter().enumerate() {
            println!("{}. {}", i + 1, source);
        }
    }
}
