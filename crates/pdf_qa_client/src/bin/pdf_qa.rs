//! pdf-qa: command-line client for the PDF Q&A server.
//! Reads config, resolves the server base URL, and runs one of the chat or
//! library commands against it. `chat` keeps a session open over stdin lines.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use pdf_qa_client::{config, ApiClient, ChatSession, Library, Role};

const USAGE: &str = "Usage: pdf-qa [--config <path>] <command>

Commands:
  ask [question]   Ask one question (reads the question from stdin when omitted)
  chat             Interactive chat; 'exit' or end of input ends the session
  upload <file>    Upload a PDF and print the refreshed library
  list             Print the document library
  show <id>        Print a stored document's extracted chunks
  delete <id>      Delete a stored document and print the refreshed library
  status           Check that the server is reachable";

/// Load config: `--config <path>` flag, then `PDF_QA_CONFIG` env var, then the
/// default `~/.pdf-qa/config.yaml` if present, else built-in defaults.
/// Consumes the flag pair from `args`.
fn load_config(args: &mut Vec<String>) -> config::Config {
    let explicit = if let Some(pos) = args.iter().position(|a| a == "--config") {
        if pos + 1 >= args.len() {
            eprintln!("Error: --config requires a path");
            process::exit(1);
        }
        let path = args.remove(pos + 1);
        args.remove(pos);
        Some(PathBuf::from(path))
    } else {
        std::env::var("PDF_QA_CONFIG").ok().map(PathBuf::from)
    };

    match explicit {
        Some(path) => match config::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error: failed to load config from {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => match config::default_config_path() {
            Some(path) if path.exists() => match config::load(&path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("Error: failed to load config from {}: {}", path.display(), e);
                    process::exit(1);
                }
            },
            _ => config::Config::default(),
        },
    }
}

/// Read the question from stdin (first line) for `ask` invocations without a
/// positional question.
fn read_question_from_stdin() -> String {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line).unwrap_or(0);
    line.trim().to_string()
}

fn print_documents(library: &Library) {
    if library.documents().is_empty() {
        println!("No PDFs uploaded.");
        return;
    }
    for record in library.documents() {
        println!(
            "{}  {}  {}",
            record.id,
            record.filename,
            record.upload_date.as_deref().unwrap_or("-")
        );
    }
}

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = load_config(&mut args);
    let base_url = config::resolve_base_url(&cfg);

    if args.is_empty() {
        eprintln!("{}", USAGE);
        process::exit(1);
    }
    let command = args.remove(0);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    rt.block_on(async {
        let api = ApiClient::new(&base_url);
        match command.as_str() {
            "ask" => run_ask(&api, &args).await,
            "chat" => run_chat(&api).await,
            "upload" => run_upload(&api, &args).await,
            "list" => run_list(&api).await,
            "show" => run_show(&api, &args).await,
            "delete" => run_delete(&api, &args).await,
            "status" => run_status(&api).await,
            other => {
                eprintln!("Error: unknown command '{}'\n\n{}", other, USAGE);
                process::exit(1);
            }
        }
    });
}

async fn run_ask(api: &ApiClient, args: &[String]) {
    let question = if args.is_empty() {
        read_question_from_stdin()
    } else {
        args.join(" ")
    };

    let mut session = ChatSession::new();
    if !session.submit(api, &question).await {
        eprintln!("Error: no question provided");
        process::exit(1);
    }
    if let Some(err) = session.error() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    match session.transcript().last() {
        Some(turn) if turn.role == Role::Bot => println!("{}", turn.text),
        _ => {
            eprintln!("Error: no answer received");
            process::exit(1);
        }
    }
}

async fn run_chat(api: &ApiClient) {
    let mut session = ChatSession::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    {
        let mut out = stdout.lock();
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if matches!(line.trim().to_lowercase().as_str(), "exit" | "quit" | "/exit" | "/quit") {
            break;
        }

        if session.submit(api, &line).await {
            if let Some(err) = session.error() {
                eprintln!("Error: {}", err);
            } else if let Some(turn) = session.transcript().last() {
                println!("{}", turn.text);
            }
        }
        let mut out = stdout.lock();
        let _ = write!(out, "> ");
        let _ = out.flush();
    }
}

async fn run_upload(api: &ApiClient, args: &[String]) {
    let Some(path) = args.first() else {
        eprintln!("Error: upload requires a file path\n\n{}", USAGE);
        process::exit(1);
    };

    let mut library = Library::new();
    library.upload(api, Path::new(path)).await;
    if let Some(err) = library.error() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    if let Some(msg) = library.success() {
        println!("{}", msg);
    }
    print_documents(&library);
}

async fn run_list(api: &ApiClient) {
    let mut library = Library::new();
    library.refresh(api).await;
    if let Some(err) = library.error() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    print_documents(&library);
}

async fn run_show(api: &ApiClient, args: &[String]) {
    let Some(id) = args.first() else {
        eprintln!("Error: show requires a document id\n\n{}", USAGE);
        process::exit(1);
    };

    let mut library = Library::new();
    library.inspect(api, id).await;
    if let Some(err) = library.error() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    let Some(detail) = library.detail() else {
        eprintln!("Error: no document data received");
        process::exit(1);
    };
    println!("PDF: {}", detail.filename);
    for chunk in &detail.chunks {
        println!("\nChunk {}:\n{}", chunk.chunk_index + 1, chunk.text);
    }
}

async fn run_delete(api: &ApiClient, args: &[String]) {
    let Some(id) = args.first() else {
        eprintln!("Error: delete requires a document id\n\n{}", USAGE);
        process::exit(1);
    };

    let mut library = Library::new();
    library.remove(api, id).await;
    if let Some(err) = library.error() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    println!("Deleted {}.", id);
    print_documents(&library);
}

async fn run_status(api: &ApiClient) {
    match api.health().await {
        Ok(message) => println!("{}", message),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
