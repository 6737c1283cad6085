//! Roll actions selected by the participant's scheduler.
//!
//! | Action            | Trigger                         | Effect                    |
//! |-------------------|---------------------------------|---------------------------|
//! | `LootRoll`        | open rolls on the group ledger  | one ledger vote           |
//! | `MasterLootRoll`  | single-item start-roll payload  | one ledger vote           |
//! | `Roll`            | chat item link (or none)        | one 0-100 dice roll       |
//!
//! Every execution performs at most one outward write.

mod loot_roll;
mod manual_roll;
mod master_loot;

pub use master_loot::{MasterLootPayload, PayloadError, MASTER_LOOT_PAYLOAD_LEN};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LootRollConfig;
use crate::policy::{DecisionReason, VotePolicy};
use crate::ports::{
    ControllerChannel, DiceRoller, GroupLedger, Inventory, ItemLinkParser, ItemTemplates,
    ItemUsageEvaluator, LedgerError, LootAllowance,
};
use crate::spec::{SpecContext, SpecResolver};
use crate::types::{CharacterClass, ObjectGuid, Vote};

/// Errors that abort an action without a vote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Malformed master-loot payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    #[error("Ledger rejected vote: {0}")]
    Ledger(#[from] LedgerError),
}

/// Why an action finished without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "item_id", rename_all = "snake_case")]
pub enum NoActionReason {
    NotInGroup,
    NothingPending,
    ControllerAttached,
    UnknownItem(u32),
    NoItemInLink,
    NotAnUpgrade(u32),
}

/// A vote that reached the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollReport {
    /// Ledger key the vote was submitted against.
    pub roll: ObjectGuid,

    pub item_id: u32,

    pub item_name: String,

    /// Vote produced by the policy and restriction level.
    pub computed: Vote,

    /// Vote actually sent; PASS under master loot and free-for-all.
    pub submitted: Vote,

    pub reason: DecisionReason,

    pub submitted_at: DateTime<Utc>,
}

/// Result of executing an [`Action`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Voted(RollReport),
    Rolled { min: u32, max: u32 },
    NoAction(NoActionReason),
}

impl ActionOutcome {
    pub fn is_no_action(&self) -> bool {
        matches!(self, ActionOutcome::NoAction(_))
    }
}

/// Everything an action may consult for one acting participant.
///
/// `ledger` is `None` when the participant is not in a group and
/// `controller` is `None` when no controlling player is attached.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    pub participant: ObjectGuid,
    pub class: CharacterClass,
    pub config: &'a LootRollConfig,
    pub templates: &'a dyn ItemTemplates,
    pub ledger: Option<&'a dyn GroupLedger>,
    pub usage: &'a dyn ItemUsageEvaluator,
    pub inventory: &'a dyn Inventory,
    pub loot_allowance: &'a dyn LootAllowance,
    pub spec_resolver: &'a dyn SpecResolver,
    pub controller: Option<&'a dyn ControllerChannel>,
    pub dice: &'a dyn DiceRoller,
    pub link_parser: &'a dyn ItemLinkParser,
}

impl<'a> ActionContext<'a> {
    pub fn policy(&self) -> VotePolicy<'a> {
        VotePolicy::new(self.config, self.usage, self.inventory, self.loot_allowance)
    }

    pub fn spec_context(&self) -> SpecContext {
        self.spec_resolver.resolve(self.class)
    }

    fn announce(&self, message: &str) {
        if !self.config.announce_to_master {
            return;
        }
        if let Some(controller) = self.controller {
            controller.tell(message);
        }
    }
}

/// The closed set of roll actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Vote on the first open roll this participant has not voted on.
    LootRoll,

    /// Vote on the item announced by a master-loot start-roll broadcast.
    MasterLootRoll { payload: Vec<u8> },

    /// Plain dice roll, conditional on the linked item being an upgrade.
    Roll { link: Option<String> },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::LootRoll => "loot roll",
            Action::MasterLootRoll { .. } => "master loot roll",
            Action::Roll { .. } => "roll",
        }
    }

    /// Cheap precondition check for the scheduler.
    pub fn is_useful(&self, ctx: &ActionContext<'_>) -> bool {
        match self {
            Action::LootRoll => loot_roll::is_useful(ctx),
            Action::MasterLootRoll { .. } => master_loot::is_useful(ctx),
            Action::Roll { .. } => true,
        }
    }

    pub fn execute(&self, ctx: &ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
        match self {
            Action::LootRoll => loot_roll::execute(ctx),
            Action::MasterLootRoll { payload } => master_loot::execute(ctx, payload),
            Action::Roll { link } => Ok(manual_roll::execute(ctx, link.as_deref())),
        }
    }
}
