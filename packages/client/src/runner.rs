//! Client main loop.

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use kotozute_server::{domain::ROSTER_REQUEST, infrastructure::dto::websocket::WireMessage};
use kotozute_shared::time::{format_jst_clock, get_jst_timestamp};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::{command::Command, error::ClientError};

/// Relay command-line client
#[derive(Debug, Clone, Parser)]
#[command(name = "kotozute-client", version, about)]
pub struct ClientArgs {
    /// WebSocket endpoint of the relay
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    pub url: String,

    /// Identity to connect as
    #[arg(long)]
    pub id: String,
}

/// Append the identity to the endpoint as a percent-encoded `id` query pair.
pub fn connect_url(endpoint: &str, id: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(endpoint).map_err(|source| ClientError::InvalidUrl {
        url: endpoint.to_string(),
        source,
    })?;
    url.query_pairs_mut().append_pair("id", id);
    Ok(url)
}

pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let url = connect_url(&args.url, &args.id)?;
    let (ws, _response) = connect_async(url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: url.to_string(),
            source,
        })?;
    tracing::info!("Connected to {} as '{}'", args.url, args.id);
    println!("Type @<identity> <message> to send, /roster to list peers, /quit to leave.");

    let (mut sink, mut stream) = ws.split();
    let mut lines = spawn_line_reader(format!("{}> ", args.id));

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                let wire = match Command::parse(&line) {
                    Ok(Command::Send { to, message }) => WireMessage {
                        to,
                        from: args.id.clone(),
                        message,
                    },
                    Ok(Command::Roster) => WireMessage {
                        to: String::new(),
                        from: args.id.clone(),
                        message: ROSTER_REQUEST.to_string(),
                    },
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => continue,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                sink.send(Message::Text(wire.encode()?.into())).await?;
            }
            frame = stream.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => print_incoming(text.as_str()),
                    Some(Ok(Message::Close(_))) | None => {
                        println!("Connection closed by server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
        }
    }

    if let Err(e) = sink.close().await {
        tracing::debug!("Failed to close connection: {}", e);
    }
    Ok(())
}

fn print_incoming(text: &str) {
    let clock = format_jst_clock(get_jst_timestamp());
    match WireMessage::decode(text.as_bytes()) {
        Ok(wire) => println!("[{clock}] {} → {}: {}", wire.from, wire.to, wire.message),
        Err(_) => println!("[{clock}] {text}"),
    }
}

/// Read lines on a plain thread. `readline` blocks, and a detached thread
/// does not hold up runtime shutdown the way `spawn_blocking` would.
fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to initialize line editor: {}", e);
                return;
            }
        };

        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    rx
}
