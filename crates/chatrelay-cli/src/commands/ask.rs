use anyhow::{Result, bail};
use chatrelay_ai::ChatRelay;

use crate::cli::AskArgs;

pub async fn run(relay: &mut ChatRelay, args: AskArgs) -> Result<()> {
    let question = args.question.join(" ");
    let answer = relay.ask(&args.session, &question).await;

    if !answer.success {
        bail!("{}", answer.text);
    }
    println!("{}", answer.text);
    Ok(())
}
