//! Line-oriented chat front-end.
//!
//! Reads stdin, forwards text to the controller and prints whatever the
//! controller publishes. Sends run on their own task so typing while a
//! request is in flight supersedes it, same as the dashboard input.

use beacon_chat::{ChatController, ChatSnapshot, Message, Role};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// One line of user input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Text(String),
    Clear,
    History,
    Quit,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }
    match trimmed {
        "/clear" => Input::Clear,
        "/history" => Input::History,
        "/quit" | "/exit" => Input::Quit,
        cmd if cmd.starts_with('/') => Input::Unknown(cmd.to_string()),
        _ => Input::Text(line.to_string()),
    }
}

pub fn format_message(message: &Message) -> String {
    match message.role {
        Role::User => format!("you> {}", message.content),
        Role::Assistant => format!("beacon> {}", message.content),
    }
}

/// Turns successive snapshots into the lines worth printing.
///
/// Rejections leave no message in the log; they are reported from the
/// send's own outcome instead, so repeats are never collapsed.
#[derive(Debug, Default)]
pub struct Renderer {
    printed: usize,
    loading: bool,
    cooldown: u64,
}

impl Renderer {
    pub fn new(initial: &ChatSnapshot) -> Self {
        Self {
            printed: initial.messages.len(),
            loading: initial.loading,
            cooldown: initial.cooldown_remaining,
        }
    }

    pub fn update(&mut self, snapshot: &ChatSnapshot) -> Vec<String> {
        let mut lines = Vec::new();

        if snapshot.messages.len() < self.printed {
            lines.push("(history cleared)".to_string());
            self.printed = 0;
        }
        lines.extend(
            snapshot.messages[self.printed..]
                .iter()
                .filter(|m| m.role == Role::Assistant)
                .map(format_message),
        );
        self.printed = snapshot.messages.len();

        if snapshot.loading && !self.loading {
            lines.push("(waiting for reply...)".to_string());
        }
        self.loading = snapshot.loading;

        let remaining = snapshot.cooldown_remaining;
        if remaining != self.cooldown {
            if remaining == 0 {
                lines.push("(ready)".to_string());
            } else if remaining < self.cooldown && remaining % 5 == 0 {
                lines.push(format!("(next message in {remaining}s)"));
            }
            self.cooldown = remaining;
        }

        lines
    }
}

/// Run until `/quit`, end of input, or Ctrl-C while idle.
pub async fn run(chat: ChatController, max_input_chars: usize) -> std::io::Result<()> {
    let mut snapshots = chat.subscribe();
    let mut renderer = Renderer::new(&snapshots.borrow_and_update());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let restored = chat.messages().len();
    if restored > 0 {
        println!("(restored {restored} messages, /history to show)");
    }
    println!("Ask about your dashboard. /clear, /history, /quit.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Empty => {}
                    Input::Quit => break,
                    Input::Clear => chat.clear_history(),
                    Input::History => {
                        for message in chat.messages() {
                            println!("{}", format_message(&message));
                        }
                    }
                    Input::Unknown(cmd) => println!("! unknown command {cmd}"),
                    Input::Text(text) => {
                        let count = text.chars().count();
                        if count > max_input_chars {
                            println!("! message too long ({count} > {max_input_chars} characters)");
                            continue;
                        }
                        let chat = chat.clone();
                        tokio::spawn(async move {
                            let outcome = chat.send_message(&text).await;
                            if let Some(notice) = outcome.notice() {
                                println!("! {notice}");
                            }
                            debug!(?outcome, "send settled");
                        });
                    }
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                for line in renderer.update(&snapshot) {
                    println!("{line}");
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                if chat.loading() {
                    chat.cancel();
                    println!("(cancelled)");
                } else {
                    break;
                }
            }
        }
    }

    chat.cancel();
    Ok(())
}
