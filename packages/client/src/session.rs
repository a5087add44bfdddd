//! WebSocket client session.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use irori_server::infrastructure::dto::websocket::{
    ClientEvent, JoinChatData, OutgoingChatData, OutgoingFileData, ServerEvent,
};
use irori_shared::time::unix_millis;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    command::{HELP, InputCommand},
    endpoint,
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
    upload::upload_file,
};

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Options the client was started with.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Relay WebSocket URL, e.g. `ws://127.0.0.1:8080/ws`
    pub url: String,
    /// Display name to join with
    pub name: String,
    /// Optional chat color sent with every message
    pub color: Option<String>,
}

async fn send_event(write: &mut WsWriter, event: &ClientEvent) -> Result<(), ClientError> {
    let json = serde_json::to_string(event)
        .map_err(|e| ClientError::ConnectionError(format!("failed to encode event: {}", e)))?;
    write
        .send(Message::Text(json.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Spawn a blocking thread for rustyline (synchronous readline).
///
/// Lines are forwarded to the returned channel until Ctrl+C, Ctrl+D or the
/// receiving side goes away.
fn spawn_readline(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    tracing::info!("Input closed");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run one client session until the user quits or the connection drops.
///
/// There is no automatic reconnection.
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    let base_url = endpoint::http_base_url(&options.url)?;
    let upload_url = endpoint::upload_url(&base_url)?;
    let file_base = endpoint::file_url(&base_url, "");

    let (ws_stream, _response) = connect_async(options.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to {}", options.url);

    let (mut write, mut read) = ws_stream.split();

    send_event(
        &mut write,
        &ClientEvent::JoinChat(JoinChatData {
            name: options.name.clone(),
            color: options.color.clone(),
        }),
    )
    .await?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /help lists commands.\n",
        options.name
    );

    // Spawn a task to print incoming events
    let name_for_read = options.name.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => MessageFormatter::format_event(
                            &event,
                            &name_for_read,
                            unix_millis(),
                            &file_base,
                        ),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                Ok(_) => {}
            }
        }
    });

    let mut input_rx = spawn_readline(format!("{}> ", options.name));
    let http = reqwest::Client::new();

    // Handle input lines until /quit, end of input, or a send failure
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let Some(command) = InputCommand::parse(&line) else {
                continue;
            };

            match command {
                InputCommand::Chat(message) => {
                    let event = ClientEvent::ChatMessage(OutgoingChatData {
                        user: Some(options.name.clone()),
                        message,
                        color: options.color.clone(),
                    });
                    send_event(&mut write, &event).await?;
                }
                InputCommand::Upload(path) => {
                    match upload_file(&http, upload_url.clone(), &path).await {
                        Ok(file_name) => {
                            let event = ClientEvent::FileUpload(OutgoingFileData {
                                user: Some(options.name.clone()),
                                file_name,
                            });
                            send_event(&mut write, &event).await?;
                        }
                        Err(e) => {
                            println!("! {}", e);
                            redisplay_prompt(&options.name);
                        }
                    }
                }
                InputCommand::Help => {
                    println!("{}", HELP);
                    redisplay_prompt(&options.name);
                }
                InputCommand::Invalid(reason) => {
                    println!("! {}", reason);
                    redisplay_prompt(&options.name);
                }
                InputCommand::Quit => break,
            }
        }

        write.close().await.ok();
        Ok::<(), ClientError>(())
    };

    // If either side finishes, the session is over
    tokio::select! {
        result = write_loop => {
            read_task.abort();
            result
        }
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
    }
}
