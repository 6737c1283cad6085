//! # lootroll-core
//!
//! Deterministic NEED/GREED/PASS decisions for automated group-loot
//! participants.
//!
//! Given a pending roll, the acting character's class and spec, its
//! inventory and a configuration, this crate answers:
//! - Which vote does the character cast?
//! - Which rule decided it?
//! - What reaches the group ledger?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same snapshot and configuration always produce the same vote
//! 2. **One write per call**: Every action sends at most one ledger vote or dice roll
//! 3. **Traceable**: Every vote carries the [`DecisionReason`] that produced it
//! 4. **No globals**: Configuration is passed by reference into every decision
//!
//! ## Example
//!
//! ```rust,ignore
//! use lootroll_core::{Action, ActionContext, ActionOutcome, LootRollConfig};
//!
//! let config = LootRollConfig::from_yaml_file("lootroll.yaml")?;
//! let ctx = ActionContext { config: &config, /* collaborators */ };
//!
//! match Action::LootRoll.execute(&ctx)? {
//!     ActionOutcome::Voted(report) => println!("{} on {}", report.submitted, report.item_name),
//!     ActionOutcome::NoAction(reason) => println!("idle: {:?}", reason),
//!     ActionOutcome::Rolled { .. } => unreachable!(),
//! }
//! ```

pub mod actions;
pub mod config;
pub mod filters;
pub mod memory;
pub mod policy;
pub mod ports;
pub mod scorers;
pub mod spec;
pub mod types;

// Re-export main types at crate root
pub use actions::{
    Action, ActionContext, ActionError, ActionOutcome, MasterLootPayload, NoActionReason,
    PayloadError, RollReport,
};
pub use config::{ConfigError, LootRollConfig};
pub use policy::{apply_restriction_level, DecisionReason, VoteDecision, VotePolicy};
pub use ports::{
    ControllerChannel, DiceRoller, GroupLedger, Inventory, ItemLinkParser, ItemTemplates,
    ItemUsageEvaluator, LedgerError, LootAllowance,
};
pub use spec::{Archetype, ClassDefaultSpecs, SpecContext, SpecResolver};
pub use types::{
    CharacterClass, ItemDescriptor, ItemQuality, LootMethod, ObjectGuid, RandomEnchant,
    RollRecord, RollVoteState, UsageTier, Vote,
};
