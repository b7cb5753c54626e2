//! Line-based REPL driving a `SessionController`.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use r3aler_client::{Registration, SessionController};
use r3aler_common::{ChatError, Event, Message, Sender};

const HELP: &str = "\
commands:
  /login <user> <pass>             sign in
  /register <user> <pass> [email]  create an account
  /logout                          end the session
  /voice                           toggle spoken replies
  /debrief                         summarise the conversation
  /state                           show assistant state
  /quit                            exit
anything else is sent as a chat message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Login { username: String, password: String },
    Register { username: String, password: String, email: Option<String> },
    Logout,
    Voice,
    Debrief,
    State,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Say(line.to_string()));
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let command = match (name, args.as_slice()) {
        ("login", [user, pass]) => Command::Login {
            username: user.to_string(),
            password: pass.to_string(),
        },
        ("login", _) => Command::Invalid("usage: /login <user> <pass>".into()),
        ("register", [user, pass]) => Command::Register {
            username: user.to_string(),
            password: pass.to_string(),
            email: None,
        },
        ("register", [user, pass, email]) => Command::Register {
            username: user.to_string(),
            password: pass.to_string(),
            email: Some(email.to_string()),
        },
        ("register", _) => Command::Invalid("usage: /register <user> <pass> [email]".into()),
        ("logout", []) => Command::Logout,
        ("voice", []) => Command::Voice,
        ("debrief", []) => Command::Debrief,
        ("state", []) => Command::State,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => Command::Invalid(format!("unknown command: /{rest}")),
    };
    Some(command)
}

/// One transcript line for `message`.
pub fn render(message: &Message) -> String {
    match message.sender {
        Sender::User => format!("you> {}", message.text),
        Sender::Assistant => format!("r3aler> {}", message.text),
        Sender::System => format!("* {}", message.text),
    }
}

/// Print the transcript as the controller appends to it.
pub fn spawn_transcript_printer(mut rx: broadcast::Receiver<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Event::MessageAppended(message)) => println!("{}", render(&message)),
                Ok(Event::LogCleared) => println!("-- transcript cleared --"),
                Ok(event) => debug!(?event, "controller event"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "transcript printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Read commands from stdin until `/quit` or EOF.
pub async fn run(controller: Arc<SessionController>) -> std::io::Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        if command == Command::Quit {
            break;
        }
        dispatch(&controller, command).await;
    }
    Ok(())
}

async fn dispatch(controller: &Arc<SessionController>, command: Command) {
    match command {
        Command::Say(text) => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                match controller.send_message(&text).await {
                    Err(ChatError::Busy) => println!("! still waiting on the previous reply"),
                    Err(e) => debug!(error = %e, "chat message failed"),
                    Ok(_) => {}
                }
            });
        }
        Command::Login { username, password } => {
            if let Err(e) = controller.login(&username, &password).await {
                println!("! login failed: {e}");
            }
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let mut registration = Registration::new(&username, password);
            if let Some(email) = email {
                registration = registration.with_email(email);
            }
            match controller.register(&registration).await {
                Ok(()) => println!("registered {username}; sign in with /login"),
                Err(e) => println!("! registration failed: {e}"),
            }
        }
        Command::Logout => controller.logout(),
        Command::Voice => match controller.toggle_voice_output() {
            Ok(enabled) => debug!(enabled, "voice output toggled"),
            Err(e) => println!("! voice unavailable: {e}"),
        },
        Command::Debrief => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                match controller.generate_debrief().await {
                    Ok(debrief) => println!("== debrief ==\n{debrief}"),
                    Err(e) => println!("! debrief failed: {e}"),
                }
            });
        }
        Command::State => println!(
            "state: {} | authenticated: {} | busy: {}",
            controller.assistant_state(),
            controller.is_authenticated(),
            controller.is_busy()
        ),
        Command::Help => println!("{HELP}"),
        Command::Invalid(reason) => println!("! {reason}"),
        Command::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_chat() {
        assert_eq!(
            parse_command("  status report  "),
            Some(Command::Say("status report".into()))
        );
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn login_needs_two_arguments() {
        assert_eq!(
            parse_command("/login neo matrix"),
            Some(Command::Login {
                username: "neo".into(),
                password: "matrix".into()
            })
        );
        assert!(matches!(
            parse_command("/login neo"),
            Some(Command::Invalid(_))
        ));
    }

    #[test]
    fn register_takes_optional_email() {
        assert_eq!(
            parse_command("/register trinity zion t@r3aler.ai"),
            Some(Command::Register {
                username: "trinity".into(),
                password: "zion".into(),
                email: Some("t@r3aler.ai".into()),
            })
        );
        assert!(matches!(
            parse_command("/register trinity zion"),
            Some(Command::Register { email: None, .. })
        ));
    }

    #[test]
    fn bare_commands() {
        assert_eq!(parse_command("/logout"), Some(Command::Logout));
        assert_eq!(parse_command("/voice"), Some(Command::Voice));
        assert_eq!(parse_command("/debrief"), Some(Command::Debrief));
        assert_eq!(parse_command("/state"), Some(Command::State));
        assert_eq!(parse_command("/quit"), Some(Command::Quit));
        assert!(matches!(
            parse_command("/launch"),
            Some(Command::Invalid(_))
        ));
    }

    #[test]
    fn transcript_lines_by_sender() {
        let msg = |sender, text: &str| Message {
            sender,
            text: text.into(),
            sequence: 1,
        };
        assert_eq!(render(&msg(Sender::User, "hi")), "you> hi");
        assert_eq!(render(&msg(Sender::Assistant, "hello")), "r3aler> hello");
        assert_eq!(render(&msg(Sender::System, "Voice enabled")), "* Voice enabled");
    }
}
