use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use prattle_core::model::chat_config::ChatConfig;
use prattle_core::model::session::ChatSession;

/// Corpus used when no path is given on the command line.
const DEFAULT_CORPUS: &str = "data/alice.txt";

/// Cosmetic pause before each reply, for a human-like feel.
const THINKING_DELAY: Duration = Duration::from_millis(400);

fn main() -> Result<()> {
    env_logger::init();

    let corpus = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CORPUS.to_owned());

    println!();
    println!("{}", "=".repeat(40));
    println!("         PRATTLE MARKOV INTERFACE");
    println!("{}", "=".repeat(40));
    println!("[*] Loading corpus: {corpus}");

    let mut session = ChatSession::from_corpus(&corpus, ChatConfig::default());
    match session.training_error() {
        None => println!(
            "[+] Model mapping complete: {} distinct words.",
            session.distinct_words()
        ),
        Some(error) => println!("[!] {error} - replies are disabled until a corpus loads."),
    }
    println!("[!] Enter 'exit' or 'quit' to end the session.");
    println!("{}", "-".repeat(40));

    let stdin = io::stdin();
    loop {
        println!();
        print!("User > ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            println!("[Session closed]");
            break;
        }

        let message = line.trim();
        if matches!(message.to_lowercase().as_str(), "quit" | "exit" | "stop") {
            println!();
            println!("[Process terminated: user exit]");
            break;
        }
        if message.is_empty() {
            continue;
        }

        print!("Thinking...\r");
        io::stdout().flush()?;
        thread::sleep(THINKING_DELAY);

        match session.respond(message) {
            Ok(reply) => println!("Bot > {reply}"),
            Err(error) => println!("Bot > I cannot respond: {error}."),
        }
    }

    Ok(())
}
