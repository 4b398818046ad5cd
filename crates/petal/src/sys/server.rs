use crate::events::{AppEvent, TouchPhase};
use async_channel::Sender;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

const SOCKET_PATH: &str = "/tmp/petal.sock";

/// Translates one socket line into an app event: a touch phase spelling
/// (`press`, `release`, `cancel`, ...), `tap N`, or `quit`.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let mut words = line.split_whitespace();
    let head = words.next()?;

    if let Ok(phase) = TouchPhase::from_str(head) {
        return Some(AppEvent::Touch(phase));
    }

    match head {
        "tap" => words.next()?.parse().ok().map(AppEvent::Tap),
        "quit" => Some(AppEvent::Quit),
        _ => None,
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match parse_command(line.trim()) {
                            Some(event) => {
                                let _ = tx.send(event).await;
                            }
                            None => log::warn!("Unknown command: {}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_spellings_parse() {
        assert!(matches!(
            parse_command("press"),
            Some(AppEvent::Touch(TouchPhase::Began))
        ));
        assert!(matches!(
            parse_command("  release "),
            Some(AppEvent::Touch(TouchPhase::Ended))
        ));
        assert!(matches!(
            parse_command("cancel"),
            Some(AppEvent::Touch(TouchPhase::Cancelled))
        ));
    }

    #[test]
    fn tap_takes_an_index() {
        assert!(matches!(parse_command("tap 3"), Some(AppEvent::Tap(3))));
        assert!(parse_command("tap").is_none());
        assert!(parse_command("tap x").is_none());
    }

    #[test]
    fn noise_is_rejected() {
        assert!(parse_command("").is_none());
        assert!(parse_command("open sesame").is_none());
    }
}
