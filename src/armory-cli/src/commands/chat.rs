//! Line-oriented chat loop
//!
//! Reads one message per line and writes exactly one reply per command.
//! Lines that are not commands get no reply.

use anyhow::Result;
use armory::Transport;
use armory_idb::ItemLookup;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::commands::report::live_builder;
use crate::config::Config;
use crate::dispatch::{dispatch, Message, MessageContext};

/// Handle `chat` on stdin/stdout
pub async fn run(config: &Config) -> Result<()> {
    let builder = live_builder(config)?;
    let realms = config.realms();
    let ctx = MessageContext {
        builder: &builder,
        realms: &realms,
        default_realm: &config.default_realm,
    };

    tracing::info!("Listening for commands on stdin");
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    serve(&ctx, stdin, &mut stdout).await
}

/// Answer every command line from `input` on `output`
pub async fn serve<T, L, R, W>(
    ctx: &MessageContext<'_, T, L>,
    input: R,
    output: &mut W,
) -> Result<()>
where
    T: Transport,
    L: ItemLookup,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut answered = 0usize;

    while let Some(line) = lines.next_line().await? {
        let message = Message::new("stdin", line);
        if let Some(reply) = dispatch(ctx, &message).await {
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
            answered += 1;
        }
    }

    tracing::info!("Input closed after {} replies", answered);
    Ok(())
}
