use anyhow::Result;
use clap::Parser;
use client_core::{ConversationApi, ConversationPhase, HttpConversationApi, PageController};
use shared::error::Locale;
use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(about = "Ask the MSLearn question service from a terminal")]
struct Args {
    #[arg(long)]
    server_url: String,
    /// Ask a single question and exit once its conversation ends.
    #[arg(long)]
    query: Option<String>,
    #[arg(long, default_value_t = Locale::Ko)]
    locale: Locale,
    /// Print verification logs returned with each answer.
    #[arg(long)]
    show_logs: bool,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let api = HttpConversationApi::new(&args.server_url)?;
    let mut page = PageController::new(api, args.locale);
    let mut input = BufReader::new(stdin()).lines();

    if let Some(query) = args.query.as_deref() {
        ask(&mut page, &mut input, query, args.show_logs).await?;
        return Ok(());
    }

    loop {
        let Some(line) = prompt(&mut input, "question> ").await? else {
            break;
        };
        if line.trim() == "q" {
            break;
        }
        ask(&mut page, &mut input, &line, args.show_logs).await?;
    }
    Ok(())
}

async fn ask<A: ConversationApi>(
    page: &mut PageController<A>,
    input: &mut Input,
    query: &str,
    show_logs: bool,
) -> Result<()> {
    if let Err(err) = page.submit_query(query).await {
        println!("! {}", err.message);
        return Ok(());
    }

    let view = page.view();
    if let Some(answer) = &view.text_response {
        println!("{answer}");
    }
    if show_logs && view.log_section_visible {
        page.toggle_logs();
        for log in &page.view().verification_logs {
            println!("  [{}] {}", log.agent, log.response);
        }
    }
    if let Some(initial) = &page.view().talk_response {
        println!("\n{initial}");
    }

    while page.conversation_phase() == ConversationPhase::Active {
        let Some(line) = prompt(input, "[enter] next, q stop> ").await? else {
            break;
        };
        if line.trim() == "q" {
            break;
        }
        match page.advance_conversation().await {
            Ok(outcome) => {
                debug!(?outcome, "advanced");
                if let Some(part) = &page.view().talk_response {
                    println!("{part}");
                }
            }
            Err(err) => {
                println!("! {}", err.message);
                break;
            }
        }
    }
    Ok(())
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    let mut out = stdout();
    out.write_all(label.as_bytes()).await?;
    out.flush().await?;
    Ok(input.next_line().await?)
}
