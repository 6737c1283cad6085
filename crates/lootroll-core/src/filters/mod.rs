//! Eligibility filters.
//!
//! Pure predicates over an item and the acting character. Each answers one
//! question the vote policy asks before it looks at usage tiers:
//!
//! | Filter | Question |
//! |--------|----------|
//! | [`class_eligible`] | May this class use the weapon or shield subtype? |
//! | [`stats_aligned_with_spec`] | Do the item's stats fit the spec's role? |
//! | [`is_lockbox`] | Is this a lockbox-style container? |
//! | [`already_held_unique`] | Is a unique copy already owned? |
//! | [`can_use_token`] | Does the token's class mask admit this class? |

mod class_eligibility;
mod lockbox;
pub mod patterns;
mod stat_alignment;
mod uniqueness;

pub use class_eligibility::{can_use_token, class_eligible};
pub use lockbox::is_lockbox;
pub use patterns::HyperlinkParser;
pub use stat_alignment::stats_aligned_with_spec;
pub use uniqueness::already_held_unique;
