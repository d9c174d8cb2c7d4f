//! Interactive chat loop over stdin.

use std::io::Write;
use std::sync::Arc;

use fixr_ai::{ImageHandle, SendOutcome, Sender, Session, SessionEvent, SkipReason};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::render::format_message;

/// A parsed line of REPL input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ReplCommand {
    Text(String),
    Image(String),
    Thread,
    Quit,
    Unknown(String),
}

pub(crate) fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return ReplCommand::Text(line.to_string());
    };
    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((rest, ""));
    match name {
        "image" | "img" if !arg.is_empty() => ReplCommand::Image(arg.to_string()),
        "thread" => ReplCommand::Thread,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}

/// Print assistant messages and the typing indicator as the session changes.
///
/// Runs until every sender is gone, so all queued events are written out.
async fn render_events<W: Write>(mut rx: broadcast::Receiver<SessionEvent>, mut out: W) -> W {
    loop {
        match rx.recv().await {
            Ok(SessionEvent::MessageAppended(message)) if message.sender == Sender::Assistant => {
                let _ = writeln!(out, "{}", format_message(&message));
            }
            Ok(SessionEvent::PendingChanged(true)) => {
                let _ = writeln!(out, "  ...typing");
            }
            Ok(SessionEvent::ThreadChanged(thread)) => debug!(%thread, "conversation thread"),
            Ok(_) => {}
            Err(RecvError::Lagged(n)) => warn!("renderer skipped {n} session events"),
            Err(RecvError::Closed) => break,
        }
        let _ = out.flush();
    }
    out
}

fn report_skip(outcome: SendOutcome) {
    if let SendOutcome::Skipped(SkipReason::Busy) = outcome {
        println!("  (still waiting for the last reply)");
    }
}

pub async fn run(session: Arc<Session>) -> std::io::Result<()> {
    for message in session.messages() {
        println!("{}", format_message(&message));
    }

    let renderer = tokio::spawn(render_events(session.subscribe(), std::io::stdout()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut sends: Vec<JoinHandle<()>> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ReplCommand::Text(text) => {
                let session = Arc::clone(&session);
                sends.retain(|t| !t.is_finished());
                sends.push(tokio::spawn(async move {
                    report_skip(session.send_text(&text).await)
                }));
            }
            ReplCommand::Image(path) => {
                let session = Arc::clone(&session);
                let handle = ImageHandle::from_path(path);
                sends.retain(|t| !t.is_finished());
                sends.push(tokio::spawn(async move {
                    report_skip(session.send_image(handle).await)
                }));
            }
            ReplCommand::Thread => {
                let thread = session.thread_id();
                if thread.is_empty() {
                    println!("  (no thread yet)");
                } else {
                    println!("  thread: {thread}");
                }
            }
            ReplCommand::Quit => break,
            ReplCommand::Unknown(cmd) => {
                println!("  unknown command {cmd}; try /image PATH, /thread, /quit")
            }
        }
    }

    for send in sends {
        let _ = send.await;
    }
    // Last handle on the session: dropping it closes the event channel and
    // the renderer exits once it has printed everything still queued.
    drop(session);
    let _ = renderer.await;
    Ok(())
}
