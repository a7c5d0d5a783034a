// src/cli/handlers.rs
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use console::Term;

use crate::engine::Engine;
use crate::generators::strength;
use crate::models::{CharClass, ClassSet, StrengthTier};
use crate::reveal::RevealEvent;
use crate::utils::format_strength_meter;

/// Replaces the engine's class selection with `classes`.
pub fn apply_classes(engine: &mut Engine, classes: ClassSet) -> Result<()> {
    // enable first so the last-class guard never trips mid-way
    for class in classes.iter() {
        engine.set_class_enabled(class, true)?;
    }
    for class in CharClass::ALL.into_iter().filter(|c| !classes.contains(*c)) {
        engine.set_class_enabled(class, false)?;
    }
    Ok(())
}

/// Starts a generation and animates it on `term`. Returns the password, or
/// `None` when the reveal was interrupted.
pub async fn reveal_on_terminal(
    engine: &mut Engine,
    term: &Term,
    should_exit: &AtomicBool,
) -> Result<Option<String>> {
    engine.request_generation()?;

    let mut write_error = None;
    let password = engine
        .animate(should_exit, |event| {
            let text = match event {
                RevealEvent::Frame(frame) => frame,
                RevealEvent::Completed(value) => value,
            };
            let result = term
                .clear_line()
                .and_then(|_| term.write_str(&format!("🔐 {}", text)));
            if let Err(e) = result {
                write_error.get_or_insert(e);
            }
        })
        .await;
    term.write_line("").context("failed to write to terminal")?;

    if let Some(e) = write_error {
        return Err(e).context("failed to draw reveal frame");
    }
    if password.is_none() {
        log::info!("Reveal interrupted");
    }
    Ok(password)
}

pub async fn handle_generate(
    engine: &mut Engine,
    length: Option<usize>,
    classes: Option<ClassSet>,
    no_reveal: bool,
    json: bool,
    should_exit: &AtomicBool,
) -> Result<()> {
    if let Some(length) = length {
        engine.set_length(length);
    }
    if let Some(classes) = classes {
        apply_classes(engine, classes)?;
    }

    if json {
        let report = engine.generate_report()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if no_reveal {
        println!("{}", engine.generate()?);
    } else {
        let term = Term::stdout();
        if reveal_on_terminal(engine, &term, should_exit).await?.is_none() {
            println!("❌ Generation cancelled");
            return Ok(());
        }
    }

    println!("Strength: {}", format_strength_meter(engine.current_strength()));
    Ok(())
}

pub fn handle_strength(classes: ClassSet, json: bool) -> Result<StrengthTier> {
    let tier = strength::classify(classes);
    if json {
        println!("{}", serde_json::json!({ "classes": classes, "strength": tier }));
    } else {
        println!("{}", format_strength_meter(tier));
    }
    Ok(tier)
}
