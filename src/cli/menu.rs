// src/cli/menu.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use console::Term;
use inquire::list_option::ListOption;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, InquireError, MultiSelect, Select, Text};

use crate::cli::handlers::{apply_classes, reveal_on_terminal};
use crate::core::policy::{MAX_LENGTH, MIN_LENGTH};
use crate::engine::Engine;
use crate::models::{CharClass, ClassSet};
use crate::utils::{format_policy, format_strength_meter};

const TOGGLE: &str = "🔤  Choose character classes";
const LENGTH: &str = "📏  Set password length";
const GENERATE: &str = "🔐  Generate password";
const EXIT: &str = "❌  Exit";

/// Outcome of a skippable prompt.
#[derive(Debug, PartialEq, Eq)]
enum Answer<T> {
    Value(T),
    Skipped,
    /// Ctrl+C while the prompt was open
    Quit,
}

fn answer<T>(result: Result<Option<T>, InquireError>) -> Result<Answer<T>> {
    match result {
        Ok(Some(value)) => Ok(Answer::Value(value)),
        Ok(None) => Ok(Answer::Skipped),
        Err(InquireError::OperationInterrupted) | Err(InquireError::OperationCanceled) => {
            Ok(Answer::Quit)
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn run_cli_menu(mut engine: Engine, should_exit: Arc<AtomicBool>) -> Result<()> {
    println!("╔══════════════════════════════════════╗");
    println!("║          🔐 PASSWORD GENERATOR        ║");
    println!("╚══════════════════════════════════════╝");

    let term = Term::stdout();
    let mut last_password: Option<String> = None;

    while !should_exit.load(Ordering::SeqCst) {
        println!();
        println!("{}", format_policy(&engine.policy()));
        println!("STRENGTH {}", format_strength_meter(engine.current_strength()));

        let options = vec![TOGGLE, LENGTH, GENERATE, EXIT];
        // prompts block, keep them off the async workers
        let selection = answer(
            tokio::task::spawn_blocking(move || {
                Select::new("Choose an option:", options)
                    .with_help_message("Use arrow keys to navigate, Enter to select. Esc to exit.")
                    .prompt_skippable()
            })
            .await?,
        )?;

        if should_exit.load(Ordering::SeqCst) {
            break;
        }

        let selection = match selection {
            Answer::Value(selection) => selection,
            Answer::Skipped | Answer::Quit => break,
        };

        match selection {
            TOGGLE => {
                if choose_classes(&mut engine).await? == Answer::Quit {
                    break;
                }
            }
            LENGTH => {
                let current = engine.policy().length().to_string();
                let input = answer(
                    tokio::task::spawn_blocking(move || {
                        Text::new("Character length:")
                            .with_default(&current)
                            .with_help_message(&format!("{}-{}, out of range values are clamped", MIN_LENGTH, MAX_LENGTH))
                            .prompt_skippable()
                    })
                    .await?,
                )?;
                match input {
                    Answer::Value(text) => match text.trim().parse::<usize>() {
                        Ok(length) => engine.set_length(length),
                        Err(_) => println!("❌ Invalid number"),
                    },
                    Answer::Skipped => {}
                    Answer::Quit => break,
                }
            }
            GENERATE => {
                match reveal_on_terminal(&mut engine, &term, &should_exit).await? {
                    Some(password) => last_password = Some(password),
                    None => println!("❌ Generation cancelled"),
                }
            }
            EXIT => break,
            other => log::warn!("Unhandled menu entry {}", other),
        }
    }

    if let Some(password) = last_password {
        let show = answer(
            tokio::task::spawn_blocking(|| {
                Confirm::new("Print the last password again to copy it?")
                    .with_default(false)
                    .prompt_skippable()
            })
            .await?,
        )?;
        if show == Answer::Value(true) {
            println!("{}", password);
        }
    }

    println!("👋 Goodbye!");
    Ok(())
}

async fn choose_classes(engine: &mut Engine) -> Result<Answer<()>> {
    let policy = engine.policy();
    let defaults: Vec<usize> = CharClass::ALL
        .iter()
        .enumerate()
        .filter(|(_, class)| policy.is_enabled(**class))
        .map(|(i, _)| i)
        .collect();

    let chosen = answer(tokio::task::spawn_blocking(move || {
        let labels: Vec<&'static str> = CharClass::ALL.iter().map(|c| c.description()).collect();
        MultiSelect::new("Character classes:", labels)
            .with_default(&defaults)
            .with_validator(
                |selected: &[ListOption<&&'static str>]| -> Result<Validation, CustomUserError> {
                    if selected.is_empty() {
                        Ok(Validation::Invalid(
                            "At least one character class must stay enabled".into(),
                        ))
                    } else {
                        Ok(Validation::Valid)
                    }
                },
            )
            .prompt_skippable()
    })
    .await?)?;

    match chosen {
        Answer::Value(chosen) => {
            let classes: ClassSet = CharClass::ALL
                .into_iter()
                .filter(|class| chosen.contains(&class.description()))
                .collect();
            apply_classes(engine, classes)?;
            Ok(Answer::Value(()))
        }
        Answer::Skipped => Ok(Answer::Skipped),
        Answer::Quit => Ok(Answer::Quit),
    }
}
