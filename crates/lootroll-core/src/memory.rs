//! In-memory collaborators.
//!
//! Plain implementations of every port, used by the CLI's scenario runner and
//! by tests. [`InMemoryLedger`] is safe to share between several
//! participants' decision loops.

use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::ports::{
    ControllerChannel, DiceRoller, GroupLedger, Inventory, ItemTemplates, ItemUsageEvaluator,
    LedgerError, LootAllowance,
};
use crate::types::{
    InventoryType, ItemDescriptor, LootMethod, ObjectGuid, RollRecord, RollVoteState, UsageTier,
    Vote,
};

/// Item templates keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<u32, ItemDescriptor>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ItemDescriptor) -> Self {
        self.insert(item);
        self
    }

    pub fn insert(&mut self, item: ItemDescriptor) {
        self.items.insert(item.item_id, item);
    }
}

impl FromIterator<ItemDescriptor> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemDescriptor>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

impl ItemTemplates for ItemCatalog {
    fn resolve(&self, item_id: u32) -> Option<ItemDescriptor> {
        self.items.get(&item_id).cloned()
    }
}

/// A vote accepted by the [`InMemoryLedger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub participant: ObjectGuid,
    pub roll: ObjectGuid,
    pub vote: Vote,
}

#[derive(Debug, Default)]
struct LedgerState {
    rolls: Vec<RollRecord>,
    submissions: Vec<Submission>,
}

/// Group roll ledger held in memory.
///
/// Accepts exactly one vote per participant per roll and keeps every
/// accepted submission in arrival order.
#[derive(Debug)]
pub struct InMemoryLedger {
    loot_method: LootMethod,
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(loot_method: LootMethod) -> Self {
        Self {
            loot_method,
            state: RwLock::new(LedgerState::default()),
        }
    }

    pub fn with_roll(self, roll: RollRecord) -> Self {
        self.open_roll(roll);
        self
    }

    /// Append a roll to the end of the ledger.
    pub fn open_roll(&self, roll: RollRecord) {
        self.state.write().rolls.push(roll);
    }

    /// Drop a roll, as the server does when it times out or is awarded.
    pub fn close_roll(&self, roll: ObjectGuid) -> Option<RollRecord> {
        let mut state = self.state.write();
        let index = state.rolls.iter().position(|r| r.item_guid == roll)?;
        Some(state.rolls.remove(index))
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.state.read().submissions.clone()
    }

    pub fn roll(&self, roll: ObjectGuid) -> Option<RollRecord> {
        self.state
            .read()
            .rolls
            .iter()
            .find(|r| r.item_guid == roll)
            .cloned()
    }
}

impl GroupLedger for InMemoryLedger {
    fn open_rolls(&self) -> Vec<RollRecord> {
        self.state.read().rolls.clone()
    }

    fn loot_method(&self) -> LootMethod {
        self.loot_method
    }

    fn submit_vote(
        &self,
        participant: ObjectGuid,
        roll: ObjectGuid,
        vote: Vote,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let record = state
            .rolls
            .iter_mut()
            .find(|r| r.item_guid == roll)
            .ok_or(LedgerError::UnknownRoll(roll))?;

        if !record.is_pending_for(participant) {
            return Err(LedgerError::AlreadyVoted { participant, roll });
        }

        record.votes.insert(participant, RollVoteState::Cast(vote));
        state.submissions.push(Submission {
            participant,
            roll,
            vote,
        });

        tracing::debug!(%participant, %roll, %vote, "ledger recorded vote");
        Ok(())
    }
}

/// Usage tiers keyed by item id and signed random property.
///
/// Lookups fall back from `(item, property)` to `(item, 0)` and then to
/// [`UsageTier::None`].
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    tiers: HashMap<(u32, i32), UsageTier>,
}

impl UsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item_id: u32, tier: UsageTier) -> Self {
        self.set(item_id, 0, tier);
        self
    }

    pub fn with_property(mut self, item_id: u32, random_property: i32, tier: UsageTier) -> Self {
        self.set(item_id, random_property, tier);
        self
    }

    pub fn set(&mut self, item_id: u32, random_property: i32, tier: UsageTier) {
        self.tiers.insert((item_id, random_property), tier);
    }
}

impl ItemUsageEvaluator for UsageTable {
    fn evaluate(&self, item_id: u32, random_property: i32) -> UsageTier {
        self.tiers
            .get(&(item_id, random_property))
            .or_else(|| self.tiers.get(&(item_id, 0)))
            .copied()
            .unwrap_or_default()
    }
}

/// Frozen view of a character's bags and equipment.
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    average_item_level: f32,
    bagged: BTreeMap<u32, u32>,
    equipped: BTreeMap<InventoryType, ItemDescriptor>,
}

impl InventorySnapshot {
    pub fn new(average_item_level: f32) -> Self {
        Self {
            average_item_level,
            ..Default::default()
        }
    }

    /// Equip `item` in its template's inventory slot, replacing any previous one.
    pub fn with_equipped(mut self, item: ItemDescriptor) -> Self {
        self.equipped.insert(item.inventory_type, item);
        self
    }

    pub fn with_bagged(mut self, item_id: u32, count: u32) -> Self {
        *self.bagged.entry(item_id).or_insert(0) += count;
        self
    }
}

impl Inventory for InventorySnapshot {
    fn count_owned(&self, item_id: u32, include_equipped: bool) -> u32 {
        let bagged = self.bagged.get(&item_id).copied().unwrap_or(0);
        if !include_equipped {
            return bagged;
        }

        let equipped = self
            .equipped
            .values()
            .filter(|item| item.item_id == item_id)
            .count() as u32;
        bagged + equipped
    }

    fn average_item_level(&self) -> f32 {
        self.average_item_level
    }

    fn equipped_item_in_slot(&self, slot: InventoryType) -> Option<ItemDescriptor> {
        self.equipped.get(&slot).cloned()
    }
}

/// Loot strategy stand-in: everything, or an explicit set of item ids.
#[derive(Debug, Clone, Default)]
pub enum LootAllowList {
    #[default]
    All,
    Only(BTreeSet<u32>),
}

impl LootAllowList {
    pub fn only(items: impl IntoIterator<Item = u32>) -> Self {
        LootAllowList::Only(items.into_iter().collect())
    }
}

impl LootAllowance for LootAllowList {
    fn is_loot_allowed(&self, item_id: u32) -> bool {
        match self {
            LootAllowList::All => true,
            LootAllowList::Only(items) => items.contains(&item_id),
        }
    }
}

/// Controller channel that keeps every message it is told.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    messages: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl ControllerChannel for RecordingChannel {
    fn tell(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// A dice roll request seen by [`RecordingDice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRequest {
    pub participant: ObjectGuid,
    pub min: u32,
    pub max: u32,
}

/// Dice roller that records requests instead of rolling.
#[derive(Debug, Default)]
pub struct RecordingDice {
    requests: Mutex<Vec<DiceRequest>>,
}

impl RecordingDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<DiceRequest> {
        self.requests.lock().clone()
    }
}

impl DiceRoller for RecordingDice {
    fn random_roll(&self, participant: ObjectGuid, min: u32, max: u32) {
        self.requests.lock().push(DiceRequest {
            participant,
            min,
            max,
        });
    }
}
