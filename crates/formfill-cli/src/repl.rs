//! Interactive REPL mode.
//!
//! Free text lines feed the debounced extraction pipeline; a background view
//! task redraws the forms whenever the session publishes a resolved snapshot.

use crate::error::{CliError, Result};
use crate::output::{AlertNotifier, Formatter};
use formfill_extractor::{Debouncer, ExtractorConfig, FormSession, SessionCommand};
use formfill_llm::{CredentialError, OpenAiProvider};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::error;

/// Run the interactive REPL.
pub async fn run_repl(config: ExtractorConfig, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Formfill - type a message to fill out the form, 'help' for commands")
    );
    println!();

    // Assemble the pipeline: REPL → debouncer → session → view.
    let notifier = AlertNotifier::new(formatter.clone());
    let (session, snapshots) = FormSession::<OpenAiProvider, _>::new(config.clone(), notifier);
    let (debouncer, settled_rx) = Debouncer::spawn(config.quiet_window());
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session_task = tokio::spawn(session.run(settled_rx, command_rx));

    // View: subscribed to session snapshots. In-flight snapshots render as a
    // short progress line; resolved snapshots redraw the full forms.
    let view_formatter = formatter.clone();
    let mut view_rx = snapshots.clone();
    let view_task = tokio::spawn(async move {
        while view_rx.changed().await.is_ok() {
            let snapshot = view_rx.borrow_and_update().clone();
            if snapshot.loading {
                println!("\n{}", view_formatter.progress());
                continue;
            }
            match view_formatter.format_snapshot(&snapshot) {
                Ok(rendered) => println!("\n{}", rendered),
                Err(e) => eprintln!("{}", view_formatter.error(&e.to_string())),
            }
        }
    });

    let mut editor = DefaultEditor::new()?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("formfill> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    ReplCommand::Exit => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    ReplCommand::Help => print_help(formatter),
                    ReplCommand::SetKey(key) => set_key(&key, &command_tx, formatter),
                    ReplCommand::Show => {
                        let snapshot = snapshots.borrow().clone();
                        match formatter.format_snapshot(&snapshot) {
                            Ok(rendered) => println!("{}", rendered),
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    ReplCommand::Text(text) => {
                        debouncer.observe(text);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    // Teardown: closing the channels stops the debounce pipeline and the
    // session; an in-flight network call is not cancelled.
    drop(debouncer);
    drop(command_tx);
    let _ = session_task.await;
    let _ = view_task.await;

    Ok(())
}

/// REPL command type.
enum ReplCommand {
    Exit,
    Help,
    Show,
    SetKey(String),
    Text(String),
}

/// Parse a REPL line. Anything that is not a recognized command is treated
/// as source text for the form.
fn parse_repl_command(line: &str) -> ReplCommand {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        "show" => ReplCommand::Show,
        "key" => ReplCommand::SetKey(rest.to_string()),
        "text" => ReplCommand::Text(rest.to_string()),
        _ => ReplCommand::Text(line.to_string()),
    }
}

/// Bind the session's client to a freshly submitted API key.
fn set_key(
    key: &str,
    command_tx: &mpsc::UnboundedSender<SessionCommand<OpenAiProvider>>,
    formatter: &Formatter,
) {
    match OpenAiProvider::with_api_key(key) {
        Ok(provider) => {
            let _ = command_tx.send(SessionCommand::InstallClient(provider));
            println!("{}", formatter.success("API client configured"));
        }
        Err(CredentialError::Missing) => {
            eprintln!("{}", formatter.alert("Please enter a valid OpenAI API key"));
        }
        Err(err) => {
            error!("Failed to construct API client: {}", err);
            let _ = command_tx.send(SessionCommand::ClearClient);
            eprintln!("{}", formatter.alert("Something went wrong"));
        }
    }
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let formfill_dir = home.join(".formfill");
    std::fs::create_dir_all(&formfill_dir)?;
    Ok(formfill_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  key <API_KEY>   - Bind the session to an OpenAI API key");
    println!("  text <message>  - Feed a message to the form (any other input works too)");
    println!("  show            - Render the current form state");
    println!("  help            - Show this help");
    println!("  exit            - Quit");
    println!();
    println!("Anything else you type is treated as your message; after a short");
    println!("quiet period it is sent to the model and the form fills itself in.");
}
