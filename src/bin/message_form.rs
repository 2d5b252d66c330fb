use std::time::Duration;

use clap::{Parser, Subcommand};
use message_backend::client::{
    api::MessageApiClient,
    form::{Field, FormStatus, MessageForm, SubmitBlocked, SUCCESS_RESET_DELAY},
};
use message_backend::models::message::Message;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

const CANCEL_COMMAND: &str = ":cancel";

/// Terminal front end for the contact form.
#[derive(Debug, Parser)]
#[command(name = "message-form")]
struct Cli {
    /// Origin of the message backend.
    #[arg(long, env = "API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    /// Milliseconds a confirmation is shown before the form is cleared.
    #[arg(long, default_value_t = SUCCESS_RESET_DELAY.as_millis() as u64)]
    reset_delay_ms: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in and send a message (default).
    Send,
    /// List stored messages, newest first.
    List,
    /// Show a single stored message.
    Show { id: i32 },
}

type Input = Lines<BufReader<Stdin>>;

enum Prompted {
    Value(String),
    Cancelled,
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Prompted> {
    let mut stdout = io::stdout();
    stdout.write_all(format!("{label}: ").as_bytes()).await?;
    stdout.flush().await?;

    match input.next_line().await? {
        Some(line) if line.trim() == CANCEL_COMMAND => Ok(Prompted::Cancelled),
        Some(line) => Ok(Prompted::Value(line)),
        None => Ok(Prompted::Cancelled),
    }
}

/// Asks for every field until its rule passes. Returns `false` on cancel.
async fn fill_fields(form: &mut MessageForm, input: &mut Input) -> anyhow::Result<bool> {
    for field in Field::ALL {
        loop {
            match prompt(input, field.label()).await? {
                Prompted::Cancelled => return Ok(false),
                Prompted::Value(value) => form.set_value(field, value),
            }
            let errors = form.blur(field);
            if errors.is_empty() {
                break;
            }
            for error in errors {
                println!("  ! {error}");
            }
        }
    }
    Ok(true)
}

async fn run_send(client: &MessageApiClient, reset_delay: Duration) -> anyhow::Result<()> {
    let mut input = BufReader::new(io::stdin()).lines();
    let mut form = MessageForm::new();
    println!("Send us a message (type {CANCEL_COMMAND} to go back).");
    println!("Phone example: +375291234567 or 80291234567");

    loop {
        if !fill_fields(&mut form, &mut input).await? {
            form.cancel();
            println!("Cancelled.");
            return Ok(());
        }

        match form.submit(client).await {
            Ok(FormStatus::Success(message)) => {
                println!("Thank you! Your message #{} has been sent.", message.id);
                form.reset_after(reset_delay).await;
                return Ok(());
            }
            Ok(FormStatus::Error(text)) => {
                println!("Could not send the message: {text}");
                match prompt(&mut input, "Try again? [y/N]").await? {
                    Prompted::Value(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        form.cancel();
                    }
                    _ => return Ok(()),
                }
            }
            Ok(_) => return Ok(()),
            Err(SubmitBlocked::InFlight) => println!("A submission is already in progress."),
            Err(SubmitBlocked::InvalidFields) => println!("Please correct the highlighted fields."),
        }
    }
}

fn print_message(message: &Message) {
    println!(
        "#{} [{}] {} <{}>\n  {}",
        message.id,
        message.created_at.format("%Y-%m-%d %H:%M:%S"),
        message.name,
        message.phone,
        message.message
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = MessageApiClient::new(&cli.api_url)?;
    let reset_delay = Duration::from_millis(cli.reset_delay_ms);

    match cli.command.unwrap_or(Command::Send) {
        Command::Send => run_send(&client, reset_delay).await?,
        Command::List => {
            let messages = client.get_all_messages().await?;
            if messages.is_empty() {
                println!("No messages yet.");
            }
            for message in &messages {
                print_message(message);
            }
        }
        Command::Show { id } => print_message(&client.get_message_by_id(id).await?),
    }

    Ok(())
}
