//! The chinwag terminal chat client.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use chinwag_core::config::{
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, FieldOutcome, SessionConfig,
    SetupWizard, WizardStep,
};
use chinwag_core::persona::PersonaStore;
use chinwag_core::{
    ChatClient, ChatSession, Conversation, EXIT_KEYWORD, SessionEnd,
    SessionError, TranscriptError, TranscriptWriter, Turn,
};
use chinwag_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt};

const TRANSCRIPT_DIR: &str = "conversations";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Credentials may live in a `.env` file; a missing file is fine.
    dotenvy::dotenv().ok();

    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        eprintln!("OPENAI_API_KEY environment variable is not set");
        return ExitCode::FAILURE;
    };
    let mut config_builder = OpenAIConfigBuilder::with_api_key(api_key);
    if let Ok(base_url) = env::var("OPENAI_BASE_URL") {
        config_builder = config_builder.with_base_url(base_url);
    }
    let client = ChatClient::new(OpenAIProvider::new(config_builder.build()));

    print_banner();

    let Some(user_name) = prompt("What should I call you? ").await else {
        return ExitCode::SUCCESS;
    };
    let user_name = user_name.trim().to_owned();

    let store = PersonaStore::builtin();
    let Some(config) = resolve_config(&store).await else {
        return ExitCode::SUCCESS;
    };

    println!(
        "\nType {} to exit the program at any time.",
        format!("'{EXIT_KEYWORD}'").red().bold()
    );

    let transcript = match open_transcript(&user_name).await {
        Ok(Some(transcript)) => transcript,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("could not create the transcript: {err}");
            return ExitCode::FAILURE;
        }
    };

    let conversation = Conversation::opening(
        &user_name,
        config.persona.prompt,
        &config.instructions,
    );
    let session = ChatSession::new(client, config, conversation, transcript);
    run_chat(session).await
}

fn print_banner() {
    println!();
    println!(
        "{}",
        "This is Chinwag, your personal assistant.".bright_cyan().bold()
    );
    println!(
        "Chinwag is a conversational assistant that can help you with a \
         variety of tasks."
    );
    println!();
}

/// Resolves the session configuration, either from the defaults or by
/// driving the setup wizard. `None` means stdin was closed.
async fn resolve_config(store: &PersonaStore) -> Option<SessionConfig> {
    let customize = prompt(
        "Do you want to customize the model, temperature, or instructions? \
         (y/n) ",
    )
    .await?;
    if !is_yes(&customize) {
        return Some(SessionConfig::default_for(store));
    }

    println!("\n{}", "Customize Chinwag".bold());
    println!(
        "{}",
        "To keep a field's default, just press Enter. For more info about \
         any field, type 'help'."
            .italic()
    );

    let mut wizard = SetupWizard::new(store.clone());
    loop {
        let line = match wizard.step() {
            WizardStep::Confirm => {
                print_summary(wizard.draft());
                prompt(
                    "\nAre these customization options correct? (y/n) ",
                )
                .await?
            }
            step => prompt(&field_prompt(step, store)).await?,
        };
        match wizard.feed(&line) {
            FieldOutcome::Help => print_help(wizard.step()),
            FieldOutcome::Retry(err) => {
                println!("{} {err}", "Invalid value:".red().bold());
            }
            FieldOutcome::Advanced => {}
            FieldOutcome::Restarted => {
                println!("\nOkay, let's take it from the top.");
            }
            FieldOutcome::Accepted(config) => return Some(config),
        }
    }
}

fn field_prompt(step: WizardStep, store: &PersonaStore) -> String {
    match step {
        WizardStep::Model => format!(
            "Which {} would you like to use? (default: {DEFAULT_MODEL}) ",
            "model".bold()
        ),
        WizardStep::Temperature => format!(
            "What {} would you like to use? (0.0 - 2.0, default: \
             {DEFAULT_TEMPERATURE}) ",
            "temperature".bold()
        ),
        WizardStep::Instructions => format!(
            "What extra {} should the assistant follow? ",
            "instructions".bold()
        ),
        WizardStep::Persona => {
            let names: Vec<_> = store.names().collect();
            format!(
                "Which {} would you like to talk to? ({}) ",
                "persona".bold(),
                names.join(", ")
            )
        }
        WizardStep::Confirm => String::new(),
    }
}

fn print_help(step: WizardStep) {
    let text = match step {
        WizardStep::Model => {
            "The model used to generate responses. Any model id your \
             backend accepts works here. The default is gpt-4."
        }
        WizardStep::Temperature => {
            "The randomness of the responses: higher temperatures make \
             replies more varied. Values from 0.0 to 2.0 are accepted and \
             rounded to one decimal place. The default is 0.8."
        }
        WizardStep::Instructions => {
            "Any additional context or instructions for the assistant to \
             follow, in your own words. Leave empty to skip."
        }
        WizardStep::Persona => {
            "The persona framing the assistant for this session. 'default' \
             is a general assistant; the others specialize it."
        }
        WizardStep::Confirm => return,
    };
    println!("\n{}", text.italic());
}

fn print_summary(config: &SessionConfig) {
    println!("\n{}", "Customization Summary".bold());
    println!("{} {}", "Model:".bold(), config.model);
    println!("{} {}", "Temperature:".bold(), config.temperature);
    println!("{} {}", "Instructions:".bold(), config.instructions);
    println!("{} {}", "Persona:".bold(), config.persona.name);
}

/// Opens the transcript, prompting for a custom filename when the user
/// wants one. `Ok(None)` means stdin was closed.
async fn open_transcript(
    user_name: &str,
) -> std::io::Result<Option<TranscriptWriter>> {
    let dir = Path::new(TRANSCRIPT_DIR);
    let Some(customize) = prompt(
        "\nDo you want to customize the conversation file name? (y/n) ",
    )
    .await
    else {
        return Ok(None);
    };
    if !is_yes(&customize) {
        return TranscriptWriter::create(dir, user_name).map(Some);
    }

    loop {
        let Some(name) = prompt("Enter a custom file name: ").await else {
            return Ok(None);
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        match TranscriptWriter::create_named(dir, name) {
            Ok(writer) => return Ok(Some(writer)),
            Err(TranscriptError::NameCollision(name)) => {
                println!(
                    "{}",
                    format!(
                        "A file named '{name}' already exists. Please enter \
                         a different name."
                    )
                    .red()
                );
            }
            Err(TranscriptError::Io(err)) => return Err(err),
        }
    }
}

async fn run_chat(mut session: ChatSession) -> ExitCode {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    let decision = loop {
        let you = format!("{}", "You:".bright_cyan().bold());
        let Some(line) = prompt(&format!("\n{you} ")).await else {
            // EOF: conclude with a save, never silently delete a live
            // transcript.
            break String::new();
        };
        if line.trim().is_empty() {
            continue;
        }

        let progress_bar = ProgressBar::new_spinner();
        progress_bar.set_style(progress_style.clone());
        progress_bar.set_message("🤔 Thinking...");
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        let result = session.submit(&line).await;
        progress_bar.finish_and_clear();

        match result {
            Ok(Turn::Reply(reply)) => {
                println!(
                    "\n{} {}",
                    "Chinwag:".bright_yellow().bold(),
                    reply.bright_white()
                );
            }
            Ok(Turn::ExitRequested) => {
                let Some(line) = prompt(&format!(
                    "\nDo you want to save this conversation? ({}/{}) ",
                    "y".green(),
                    "n".red()
                ))
                .await
                else {
                    break String::new();
                };
                break line;
            }
            Err(SessionError::Backend(err)) => {
                println!("\n{} {err}", "The backend failed:".red().bold());
                println!(
                    "Your message stayed in the transcript; you can send \
                     it again."
                );
            }
            Err(err @ SessionError::Transcript(_)) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        }
    };

    match session.conclude(&decision) {
        Ok(SessionEnd::Saved(path)) => {
            println!(
                "\n{} {}",
                "Conversation saved to".bright_cyan(),
                path.display().bold()
            );
        }
        Ok(SessionEnd::Discarded) => {
            println!("\n{}", "Conversation discarded.".bright_cyan());
        }
        Err(err) => {
            eprintln!("could not close the transcript: {err}");
            return ExitCode::FAILURE;
        }
    }
    println!("\n{}\n", "Goodbye!".bright_cyan().bold());
    ExitCode::SUCCESS
}

fn is_yes(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes")
}

async fn prompt(text: &str) -> Option<String> {
    print!("{text}");
    std::io::stdout().flush().ok();
    read_line().await
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
