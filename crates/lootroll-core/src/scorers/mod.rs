//! Upgrade scorers.
//!
//! Each scorer compares a candidate item with the character's current gear
//! using the `item_level * quality` proxy score. Degenerate margins are not
//! errors: every scorer defines its own fallback.

mod cross_armor;
mod token;
mod usage;

pub use cross_armor::{canonical_armor, cross_armor_upgrade};
pub use token::token_likely_upgrade;
pub use usage::{classify_usage, consumable_vote};
