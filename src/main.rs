use std::sync::Arc;

use family_chat::api::ApiClient;
use family_chat::config::Settings;
use family_chat::sync::{Intent, SyncController, Tab};
use family_chat::ui::main_window;
use log::error;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Intents(Vec<Intent>),
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let intents = match word {
        "quit" | "q" => return Ok(Command::Quit),
        "tab" => vec![Intent::SetTab(rest.parse::<Tab>()?)],
        "open" => {
            let id = rest.trim().parse::<i64>().map_err(|_| format!("not a chat id: {}", rest))?;
            vec![Intent::SetTab(Tab::Chats), Intent::SelectChat(id)]
        }
        "close" => vec![Intent::CloseChat],
        "draft" => vec![Intent::EditDraft(rest.to_string())],
        "send" if rest.is_empty() => vec![Intent::Send],
        "send" => vec![Intent::EditDraft(rest.to_string()), Intent::Send],
        "" => vec![],
        other => return Err(format!("unknown command: {} (tab, open, close, draft, send, quit)", other)),
    };
    Ok(Command::Intents(intents))
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load();
    let client = match ApiClient::from_settings(&settings) {
        Ok(client) => client,
        Err(e) => {
            error!("cannot use {}: {}", settings.base_url, e);
            std::process::exit(1);
        }
    };
    let sync = SyncController::new(Arc::new(client), settings.poll_interval());

    let mut rx = sync.subscribe();
    let render_settings = settings.clone();
    let renderer = tokio::spawn(async move {
        println!("{}", main_window::render(&rx.borrow_and_update(), &render_settings));
        while rx.changed().await.is_ok() {
            let screen = main_window::render(&rx.borrow_and_update(), &render_settings);
            println!("{}", screen);
        }
    });

    let poller = sync.start();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("reading input: {}", e);
                break;
            }
        };
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Intents(intents)) => {
                for intent in intents {
                    sync.dispatch(intent).await;
                }
            }
            Err(msg) => eprintln!("{}", msg),
        }
    }

    poller.shutdown().await;
    renderer.abort();
}
