//! Collaborator contracts.
//!
//! Everything the decision core consumes but does not own: item templates,
//! the group roll ledger, the item-usage evaluator, the inventory, the
//! controller's chat channel and the server's dice. Every query is
//! synchronous and non-blocking; implementations that record state use
//! interior mutability so the core only ever holds shared references.

use thiserror::Error;

use crate::types::{
    InventoryType, ItemDescriptor, LootMethod, ObjectGuid, RollRecord, UsageTier, Vote,
};

/// Item template lookup.
pub trait ItemTemplates {
    fn resolve(&self, item_id: u32) -> Option<ItemDescriptor>;
}

/// Reasons the ledger refused a vote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("no open roll for {0}")]
    UnknownRoll(ObjectGuid),

    #[error("participant {participant} already voted on roll {roll}")]
    AlreadyVoted {
        participant: ObjectGuid,
        roll: ObjectGuid,
    },
}

/// The group's shared roll ledger.
///
/// Owned elsewhere and possibly written by other participants concurrently.
/// The core reads a snapshot with [`GroupLedger::open_rolls`] and sends at
/// most one [`GroupLedger::submit_vote`] message per invocation.
pub trait GroupLedger {
    /// Currently open rolls in ledger order.
    fn open_rolls(&self) -> Vec<RollRecord>;

    fn loot_method(&self) -> LootMethod;

    fn submit_vote(
        &self,
        participant: ObjectGuid,
        roll: ObjectGuid,
        vote: Vote,
    ) -> Result<(), LedgerError>;
}

/// External usefulness classification of an item for the current gear set.
pub trait ItemUsageEvaluator {
    /// `random_property` is the signed key from
    /// [`RandomEnchant::usage_key`](crate::types::RandomEnchant::usage_key).
    fn evaluate(&self, item_id: u32, random_property: i32) -> UsageTier;
}

/// Snapshot queries over the acting character's items.
pub trait Inventory {
    /// Copies owned; equipped copies only counted when `include_equipped`.
    fn count_owned(&self, item_id: u32, include_equipped: bool) -> u32;

    fn average_item_level(&self) -> f32;

    fn equipped_item_in_slot(&self, slot: InventoryType) -> Option<ItemDescriptor>;
}

/// Whether the character's loot strategy would keep a non-equipment item.
pub trait LootAllowance {
    fn is_loot_allowed(&self, item_id: u32) -> bool;
}

/// Chat channel to an attached controlling player.
pub trait ControllerChannel {
    fn tell(&self, message: &str);
}

/// Requests a plain numeric roll from the server.
pub trait DiceRoller {
    fn random_roll(&self, participant: ObjectGuid, min: u32, max: u32);
}

/// Extracts item ids from chat text containing item links.
pub trait ItemLinkParser {
    fn parse_items(&self, text: &str) -> Vec<u32>;
}
