//! Session assembly and the two ways of playing it.
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use game_content::{ConfigLoader, ScenarioLoader};
use game_core::{Intent, SessionStatus};
use runtime::{
    FileSaveRepository, GameStateManager, RuntimeError, ScriptedIntentProvider, SelfPlayConfig,
    SelfPlaySummary, SessionHandle, restore_state, run_self_play,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use crate::cli::Command;
use crate::config::ClientConfig;
use crate::narrator::{KeywordNarrator, describe_view};

const HELP: &str = "\
Commands:
  go <direction> | <direction>   move along an exit
  take <item>                    pick something up
  drop <item>                    leave something here
  use <item>                     drink, eat or equip an item
  attack <target>                fight a hostile here
  rest                           sleep, where it is safe
  look                           describe your surroundings
  save [slot]                    save the session
  help                           show this text
  quit                           leave the game";

pub async fn run(command: Command, config: ClientConfig) -> Result<()> {
    let manager = open_session(&command, &config)?;
    let repository = FileSaveRepository::new(&config.save_dir, config.save_format)
        .with_context(|| format!("Failed to open save directory {}", config.save_dir.display()))?;
    let handle = SessionHandle::new(manager).with_narrator(Arc::new(KeywordNarrator));

    match &command.common().self_play {
        Some(script) => {
            let intents = load_script(script)?;
            let limits = SelfPlayConfig {
                max_intents: command.common().max_intents,
            };
            let summary =
                run_scripted(handle, intents, limits, &repository, &config.session_id).await?;
            println!(
                "Self-play finished: {} applied, {} rejected, turn {}, {:?}.",
                summary.applied, summary.rejected, summary.final_turn, summary.stop
            );
            Ok(())
        }
        None => run_interactive(handle, &repository, &config.session_id).await,
    }
}

/// Builds the manager for a new or resumed session.
pub fn open_session(command: &Command, config: &ClientConfig) -> Result<GameStateManager> {
    let rules = ConfigLoader::load_or_default(command.common().rules.as_deref())?;

    match command {
        Command::New { scenario, seed, .. } => {
            let scenario = ScenarioLoader::load(scenario)?;
            let seed = seed.or(scenario.seed()).unwrap_or_else(clock_seed);
            tracing::info!(session = %config.session_id, seed, "starting new session");
            Ok(GameStateManager::new_game(&scenario, rules, seed)?)
        }
        Command::Resume { scenario, save, .. } => {
            let scenario = ScenarioLoader::load(scenario)?;
            let artifact = FileSaveRepository::read_path(save)
                .with_context(|| format!("Failed to read save {}", save.display()))?;
            let state = restore_state(scenario.world(), artifact)
                .with_context(|| format!("Save {} does not fit this scenario", save.display()))?;
            tracing::info!(session = %config.session_id, turn = state.turn, "resuming session");
            Ok(GameStateManager::new(
                Arc::new(scenario.into_world()),
                rules,
                state,
            )?)
        }
    }
}

fn clock_seed() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_else(|| now.timestamp() as u64)
}

/// Reads a self-play script: a JSON array of intents when the file ends in
/// `.json`, otherwise one command per line with `#` comments.
pub fn load_script(path: &Path) -> Result<Vec<Intent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        return serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()));
    }

    let mut intents = Vec::new();
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let intent = KeywordNarrator::parse(line, &[])
            .with_context(|| format!("{}:{}: bad command", path.display(), number + 1))?;
        intents.push(intent);
    }
    Ok(intents)
}

/// Plays `intents` without a human and saves the result to `slot`.
pub async fn run_scripted(
    handle: SessionHandle,
    intents: Vec<Intent>,
    limits: SelfPlayConfig,
    repository: &FileSaveRepository,
    slot: &str,
) -> Result<SelfPlaySummary> {
    let mut reports = handle.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match reports.recv().await {
                Ok(report) => println!("{}\n", KeywordNarrator::describe(&report)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "report printer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let provider = ScriptedIntentProvider::new(intents);
    let summary = run_self_play(&handle, &provider, limits).await?;
    handle.save(repository, slot).await?;

    drop(handle);
    printer.await.context("report printer panicked")?;
    Ok(summary)
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run_interactive(
    handle: SessionHandle,
    repository: &FileSaveRepository,
    default_slot: &str,
) -> Result<()> {
    println!("{}", describe_view(&handle.view().await?));
    if handle.status().await == SessionStatus::Over {
        println!("This adventure has already ended. You may still save or quit.");
    }
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

        match word.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "look" => println!("{}", describe_view(&handle.view().await?)),
            "save" => {
                let slot = match rest.trim() {
                    "" => default_slot,
                    slot => slot,
                };
                match handle.save(repository, slot).await {
                    Ok(_) => println!("Saved to {}.", repository.slot_path(slot).display()),
                    Err(error) => println!("Could not save: {error}"),
                }
            }
            _ => match handle.submit_text(line).await {
                Ok(report) => {
                    if let Some(prose) = handle.narrate(&report).await? {
                        println!("{prose}");
                    }
                }
                Err(RuntimeError::SessionOver) => {
                    println!("The adventure is over. You may still save or quit.");
                }
                Err(error) if error.is_recoverable() => println!("{error}"),
                Err(error) => return Err(error.into()),
            },
        }
    }

    tracing::info!("player left the session");
    Ok(())
}
