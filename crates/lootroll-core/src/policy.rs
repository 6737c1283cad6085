//! Vote policy: combines filters and scorers into one vote.
//!
//! Rules are evaluated in strict precedence order and the first one that
//! fires decides:
//! 1. Unknown item → PASS
//! 2. Epic junk token → NEED if eligible and an upgrade, else GREED
//! 3. Lockbox → GREED
//! 4. Weapon or armor → class, binding, spec-stat and uniqueness gates,
//!    then the usage tier and cross-armor check
//! 5. Anything else the loot strategy allows → usage tier mapping
//! 6. Otherwise → PASS
//!
//! The result is then post-processed by the configured restriction level.
//! Evaluation is a pure function of the item, the spec context, the
//! configuration and the collaborators' current snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::LootRollConfig;
use crate::filters::{
    already_held_unique, can_use_token, class_eligible, is_lockbox, stats_aligned_with_spec,
};
use crate::ports::{Inventory, ItemUsageEvaluator, LootAllowance};
use crate::scorers::{classify_usage, consumable_vote, cross_armor_upgrade, token_likely_upgrade};
use crate::spec::SpecContext;
use crate::types::{
    Bonding, ItemClass, ItemDescriptor, ItemQuality, RandomEnchant, UsageTier, Vote,
    MISC_SUBCLASS_JUNK,
};

/// Which rule produced a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", content = "usage", rename_all = "snake_case")]
pub enum DecisionReason {
    UnknownItem,
    TokenUpgrade,
    TokenNotUpgrade,
    TokenNotEligible,
    Lockbox,
    ClassRestricted,
    BindOnEquip,
    BindOnUse,
    StatsMisaligned,
    AlreadyHeldUnique,
    EquipUpgrade(UsageTier),
    CrossArmorShortfall(UsageTier),
    OtherUse(UsageTier),
    Consumable(UsageTier),
    NoUse,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::UnknownItem => write!(f, "item template not found"),
            DecisionReason::TokenUpgrade => write!(f, "token is a likely upgrade"),
            DecisionReason::TokenNotUpgrade => write!(f, "token is not a likely upgrade"),
            DecisionReason::TokenNotEligible => write!(f, "token is for another class"),
            DecisionReason::Lockbox => write!(f, "lockbox"),
            DecisionReason::ClassRestricted => write!(f, "class cannot use this item type"),
            DecisionReason::BindOnEquip => write!(f, "bind-on-equip need not allowed"),
            DecisionReason::BindOnUse => write!(f, "bind-on-use need not allowed"),
            DecisionReason::StatsMisaligned => write!(f, "stats do not fit the spec"),
            DecisionReason::AlreadyHeldUnique => write!(f, "unique item already held"),
            DecisionReason::EquipUpgrade(tier) => write!(f, "equipment upgrade ({:?})", tier),
            DecisionReason::CrossArmorShortfall(tier) => {
                write!(f, "off-type armor below margin ({:?})", tier)
            }
            DecisionReason::OtherUse(tier) => write!(f, "equipment with other use ({:?})", tier),
            DecisionReason::Consumable(tier) => write!(f, "usable item ({:?})", tier),
            DecisionReason::NoUse => write!(f, "no use for item"),
        }
    }
}

/// A vote together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDecision {
    pub vote: Vote,

    pub reason: DecisionReason,

    /// Policy vote before the restriction level changed it, if it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_from: Option<Vote>,
}

impl VoteDecision {
    fn new(vote: Vote, reason: DecisionReason) -> Self {
        Self {
            vote,
            reason,
            restricted_from: None,
        }
    }
}

/// Apply the global restriction level to a policy vote.
///
/// Level 0 passes on everything. Level 1 turns NEED into GREED (or PASS when
/// a unique copy is already held) and GREED into PASS. Level 2 and above
/// leave the vote alone. `already_held_unique` is only consulted for a NEED
/// at level 1.
pub fn apply_restriction_level(
    vote: Vote,
    level: u32,
    already_held_unique: impl FnOnce() -> bool,
) -> Vote {
    match (level, vote) {
        (0, _) => Vote::Pass,
        (1, Vote::Need) => {
            if already_held_unique() {
                Vote::Pass
            } else {
                Vote::Greed
            }
        }
        (1, Vote::Greed) => Vote::Pass,
        (_, vote) => vote,
    }
}

/// The smart roll policy, bound to its configuration and collaborators.
pub struct VotePolicy<'a> {
    config: &'a LootRollConfig,
    usage: &'a dyn ItemUsageEvaluator,
    inventory: &'a dyn Inventory,
    loot_allowance: &'a dyn LootAllowance,
}

impl<'a> VotePolicy<'a> {
    pub fn new(
        config: &'a LootRollConfig,
        usage: &'a dyn ItemUsageEvaluator,
        inventory: &'a dyn Inventory,
        loot_allowance: &'a dyn LootAllowance,
    ) -> Self {
        Self {
            config,
            usage,
            inventory,
            loot_allowance,
        }
    }

    /// The policy vote for an item, without the restriction level.
    pub fn calculate_smart_roll_vote(
        &self,
        item: Option<&ItemDescriptor>,
        ctx: &SpecContext,
        enchant: RandomEnchant,
    ) -> Vote {
        self.decide(item, ctx, enchant).vote
    }

    /// The policy decision for an item, without the restriction level.
    pub fn decide(
        &self,
        item: Option<&ItemDescriptor>,
        ctx: &SpecContext,
        enchant: RandomEnchant,
    ) -> VoteDecision {
        let decision = match item {
            Some(item) => self.evaluate(item, ctx, enchant),
            None => VoteDecision::new(Vote::Pass, DecisionReason::UnknownItem),
        };

        tracing::debug!(
            item_id = item.map(|i| i.item_id),
            class = %ctx.class,
            spec = %ctx.spec,
            vote = %decision.vote,
            reason = ?decision.reason,
            "smart roll decision"
        );
        decision
    }

    /// The policy decision followed by restriction-level post-processing.
    pub fn decide_restricted(
        &self,
        item: &ItemDescriptor,
        ctx: &SpecContext,
        enchant: RandomEnchant,
    ) -> VoteDecision {
        let decision = self.decide(Some(item), ctx, enchant);
        let level = self.config.restriction_level();
        let vote = apply_restriction_level(decision.vote, level, || {
            already_held_unique(item, self.inventory)
        });

        if vote == decision.vote {
            return decision;
        }

        tracing::debug!(
            item_id = item.item_id,
            level,
            from = %decision.vote,
            to = %vote,
            "restriction level changed vote"
        );
        VoteDecision {
            vote,
            reason: decision.reason,
            restricted_from: Some(decision.vote),
        }
    }

    fn evaluate(
        &self,
        item: &ItemDescriptor,
        ctx: &SpecContext,
        enchant: RandomEnchant,
    ) -> VoteDecision {
        if is_token(item) {
            return self.evaluate_token(item, ctx);
        }

        if is_lockbox(item) {
            return VoteDecision::new(Vote::Greed, DecisionReason::Lockbox);
        }

        if item.class.is_equipment() {
            return self.evaluate_equipment(item, ctx, enchant);
        }

        if self.loot_allowance.is_loot_allowed(item.item_id) {
            let tier = classify_usage(self.usage, item, enchant);
            if let Some(vote) = consumable_vote(tier) {
                return VoteDecision::new(vote, DecisionReason::Consumable(tier));
            }
        }

        VoteDecision::new(Vote::Pass, DecisionReason::NoUse)
    }

    fn evaluate_token(&self, item: &ItemDescriptor, ctx: &SpecContext) -> VoteDecision {
        if !can_use_token(item, ctx.class) {
            return VoteDecision::new(Vote::Greed, DecisionReason::TokenNotEligible);
        }

        let average = self.inventory.average_item_level();
        if token_likely_upgrade(item, average, self.config.token_ilevel_margin) {
            VoteDecision::new(Vote::Need, DecisionReason::TokenUpgrade)
        } else {
            VoteDecision::new(Vote::Greed, DecisionReason::TokenNotUpgrade)
        }
    }

    fn evaluate_equipment(
        &self,
        item: &ItemDescriptor,
        ctx: &SpecContext,
        enchant: RandomEnchant,
    ) -> VoteDecision {
        let config = self.config;

        if !class_eligible(ctx, item) {
            return VoteDecision::new(Vote::Greed, DecisionReason::ClassRestricted);
        }

        if item.bonding == Bonding::BindOnEquip && !config.allow_boe_need_if_upgrade {
            return VoteDecision::new(Vote::Greed, DecisionReason::BindOnEquip);
        }

        if item.bonding == Bonding::BindOnUse && !config.allow_bou_need_if_upgrade {
            return VoteDecision::new(Vote::Greed, DecisionReason::BindOnUse);
        }

        if config.smart_need_by_spec && !stats_aligned_with_spec(ctx, item) {
            return VoteDecision::new(Vote::Greed, DecisionReason::StatsMisaligned);
        }

        if already_held_unique(item, self.inventory) {
            return VoteDecision::new(Vote::Pass, DecisionReason::AlreadyHeldUnique);
        }

        let tier = classify_usage(self.usage, item, enchant);
        if tier.is_equip_opportunity() {
            let current = self.inventory.equipped_item_in_slot(item.inventory_type);
            if cross_armor_upgrade(ctx, item, current.as_ref(), config.cross_armor_extra_margin) {
                VoteDecision::new(Vote::Need, DecisionReason::EquipUpgrade(tier))
            } else {
                VoteDecision::new(Vote::Greed, DecisionReason::CrossArmorShortfall(tier))
            }
        } else if tier != UsageTier::None {
            VoteDecision::new(Vote::Greed, DecisionReason::OtherUse(tier))
        } else {
            VoteDecision::new(Vote::Pass, DecisionReason::NoUse)
        }
    }
}

/// Class-restricted epic junk: tier tokens.
fn is_token(item: &ItemDescriptor) -> bool {
    item.class == ItemClass::Misc
        && item.subclass == MISC_SUBCLASS_JUNK
        && item.quality == ItemQuality::Epic
}
