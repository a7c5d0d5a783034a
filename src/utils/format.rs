// src/utils/format.rs
use console::{style, Color, StyledObject};

use crate::core::policy::{PolicyState, MAX_LENGTH};
use crate::models::{CharClass, StrengthTier};

// Terminal colour closest to each tier's meter colour
fn tier_color(tier: StrengthTier) -> Color {
    match tier {
        StrengthTier::Unrated => Color::Color256(236),
        StrengthTier::TooWeak => Color::Red,
        StrengthTier::Weak => Color::Color256(209),
        StrengthTier::Medium => Color::Yellow,
        StrengthTier::Strong => Color::Green,
    }
}

/// Four bar strength meter followed by the tier label.
pub fn format_strength_meter(tier: StrengthTier) -> String {
    let bars: Vec<String> = (0..4)
        .map(|index| {
            let bar: StyledObject<&str> = style("▮");
            if index < tier.lit_bars() {
                bar.fg(tier_color(tier)).to_string()
            } else {
                bar.fg(tier_color(StrengthTier::Unrated)).to_string()
            }
        })
        .collect();

    format!("{} {}", bars.join(""), style(tier.label()).bold())
}

/// One line summary of the policy: length slider and class checkboxes.
pub fn format_policy(policy: &PolicyState) -> String {
    let filled = policy.length_fraction() * MAX_LENGTH as f64;
    let slider: String = (0..MAX_LENGTH)
        .map(|i| if (i as f64) < filled { '━' } else { '─' })
        .collect();

    let boxes: Vec<String> = CharClass::ALL
        .iter()
        .map(|class| {
            let mark = if policy.is_enabled(*class) { "[x]" } else { "[ ]" };
            format!("{} {}", mark, class)
        })
        .collect();

    format!("Length {:>2} {}  {}", policy.length(), slider, boxes.join("  "))
}
