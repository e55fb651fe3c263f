use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::engine::constants::DEFAULT_DATA_FILE;
use crate::models::Theme;

/// Portion ledger: weigh foods, derive portions from each other, undo mistakes.
#[derive(Parser, Debug)]
#[command(name = "portion_ledger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the data JSON file.
    #[arg(short, long, global = true, env = "PORTION_LEDGER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts.
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every food card.
    List,

    /// Show one food card and the foods it could derive from.
    Show { food: String },

    /// Add an empty food.
    New {
        /// Name to give instead of the placeholder.
        name: Option<String>,
    },

    /// Rename a food.
    Rename { food: String, name: String },

    /// Delete a food. Foods derived from it keep their last weight.
    Delete { food: String },

    /// Delete every food and dish preset.
    Clear,

    /// Add grams to a food.
    Add {
        food: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Subtract grams, or a dish preset's tare, from a food.
    Sub {
        food: String,
        #[arg(allow_hyphen_values = true, required_unless_present = "dish")]
        amount: Option<String>,

        /// Subtract the weight of this dish preset.
        #[arg(long, conflicts_with = "amount")]
        dish: Option<String>,
    },

    /// Derive a food's weight from another: target = source × multiplier.
    Calc {
        target: String,
        source: String,
        #[arg(allow_hyphen_values = true)]
        multiplier: String,
    },

    /// Undo the last operation on a food.
    Undo { food: String },

    /// Feed a swipe on a food card; a quick leftward swipe undoes.
    Swipe {
        food: String,

        /// Horizontal travel in pixels (negative = leftward).
        #[arg(long, allow_hyphen_values = true)]
        dx: f64,

        /// Duration of the swipe in milliseconds.
        #[arg(long, default_value = "200")]
        ms: u64,
    },

    /// Show a food's operation history.
    History {
        food: String,

        /// Also write the history to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show which foods derive from which.
    Tree,

    /// Show totals.
    Stats,

    /// Manage dish (tare) presets.
    Dish {
        #[command(subcommand)]
        command: DishCommand,
    },

    /// Show or set the color theme.
    Theme { theme: Option<Theme> },

    /// Write all data as JSON to a file, or stdout.
    Export { path: Option<PathBuf> },

    /// Replace all data with an exported JSON file.
    Import { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum DishCommand {
    /// List presets with their indices.
    List,

    /// Add a preset.
    Add { name: String, weight: String },

    /// Change the preset at an index.
    Edit {
        index: usize,
        name: String,
        weight: String,
    },

    /// Remove the preset at an index.
    Delete { index: usize },

    /// Add the built-in presets that are missing.
    Defaults,

    /// Reorder presets.
    Sort {
        #[arg(long, value_enum, default_value_t = SortKey::Weight)]
        by: SortKey,

        /// Largest / last name first.
        #[arg(long)]
        desc: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Weight,
    Name,
}

impl Default for Command {
    fn default() -> Self {
        Command::List
    }
}
