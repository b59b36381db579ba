use std::sync::Arc;

use glanz_config::Config;
use glanz_types::{AppEvent, UiCommand};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::RwLock;

pub mod command;
pub mod render;

use command::{HELP, Input, parse_command};
use render::{render, render_notice};

async fn print(stdout: &mut tokio::io::Stdout, text: &str) -> anyhow::Result<()> {
    stdout.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await?;
    Ok(())
}

/// Terminal front end: stdin lines become commands, app events are printed
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut stdin_open = true;

    tracing::debug!("UI loop started (interactive: {})", interactive);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed, quitting");
                    stdin_open = false;
                    ui_to_app_tx.send(AppEvent::Command(UiCommand::Quit)).await?;
                    continue;
                };

                match parse_command(&line) {
                    Ok(Input::Command(command)) => {
                        ui_to_app_tx.send(AppEvent::Command(command)).await?;
                    }
                    Ok(Input::Help) => print(&mut stdout, HELP).await?,
                    Ok(Input::Blank) => {}
                    Err(e) => print(&mut stdout, &e.to_string()).await?,
                }
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("App channel closed");
                    break;
                };

                match event {
                    AppEvent::Render(view) => {
                        let text = {
                            let config = config.read().await;
                            render(&view, &config.ui)
                        };
                        print(&mut stdout, &text).await?;
                        if interactive {
                            stdout.write_all(b"> ").await?;
                            stdout.flush().await?;
                        }
                    }
                    AppEvent::Notice(notice) => print(&mut stdout, &render_notice(&notice)).await?,
                    AppEvent::Loading { status, busy } => {
                        if busy {
                            print(&mut stdout, &format!("... {}", status)).await?;
                        }
                    }
                    AppEvent::Shutdown => {
                        print(&mut stdout, "Tschüss!").await?;
                        break;
                    }
                    other => {
                        tracing::debug!("UI ignoring {:?}", std::mem::discriminant(&other));
                    }
                }
            }
        }
    }

    Ok(())
}
