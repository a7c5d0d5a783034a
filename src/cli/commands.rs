// src/cli/commands.rs
use clap::{Args, Subcommand};

use crate::models::{CharClass, ClassSet};

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Generate a password
    Generate {
        /// Password length (clamped to 1..=20)
        #[arg(long, short)]
        length: Option<usize>,

        #[command(flatten)]
        classes: ClassArgs,

        /// Print the password at once instead of animating it
        #[arg(long)]
        no_reveal: bool,

        /// Print a JSON report instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Show the strength tier of a class selection
    Strength {
        #[command(flatten)]
        classes: ClassArgs,

        /// Print JSON instead of the meter
        #[arg(long)]
        json: bool,
    },
}

/// Character class switches shared by several commands.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ClassArgs {
    /// Include uppercase letters
    #[arg(long, short = 'u')]
    pub upper: bool,

    /// Include lowercase letters
    #[arg(long, short = 'w')]
    pub lower: bool,

    /// Include numbers
    #[arg(long, short = 'd')]
    pub digits: bool,

    /// Include symbols
    #[arg(long, short = 's')]
    pub symbols: bool,
}

impl ClassArgs {
    /// The selected classes, or `None` when no switch was given.
    pub fn selection(&self) -> Option<ClassSet> {
        let set: ClassSet = [
            (self.upper, CharClass::Upper),
            (self.lower, CharClass::Lower),
            (self.digits, CharClass::Digit),
            (self.symbols, CharClass::Symbol),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, class)| class)
        .collect();

        if set.is_empty() {
            None
        } else {
            Some(set)
        }
    }
}
