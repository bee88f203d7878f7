use std::io::Write;
use std::time::Instant;

use anyhow::Result;
use chatrelay_ai::{Answer, ChatRelay};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::ChatArgs;

const PROMPT: &str = ">>> ";

pub async fn run(relay: &mut ChatRelay, args: ChatArgs) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if is_exit(question) {
            break;
        }

        let started = Instant::now();
        let answer = relay.ask(&args.session, question).await;
        print_answer(&answer);
        println!(
            "{}",
            format!("{:.2}s", started.elapsed().as_secs_f64()).dimmed()
        );
    }

    Ok(())
}

fn is_exit(input: &str) -> bool {
    matches!(input, "exit" | "quit")
}

fn print_answer(answer: &Answer) {
    if answer.success {
        println!("{}", answer.text);
    } else {
        println!("{}", answer.text.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert!(is_exit("exit"));
        assert!(is_exit("quit"));
        assert!(!is_exit("exit please"));
        assert!(!is_exit("#CMD#设置时延#3#"));
    }
}
