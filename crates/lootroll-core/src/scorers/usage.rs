use crate::ports::ItemUsageEvaluator;
use crate::types::{ItemDescriptor, RandomEnchant, UsageTier, Vote};

/// Ask the external evaluator how useful this item instance is.
pub fn classify_usage(
    evaluator: &dyn ItemUsageEvaluator,
    item: &ItemDescriptor,
    enchant: RandomEnchant,
) -> UsageTier {
    evaluator.evaluate(item.item_id, enchant.usage_key())
}

/// Vote for a non-equipment item the loot strategy allows.
///
/// `None` means the tier gives no reason to roll.
pub fn consumable_vote(tier: UsageTier) -> Option<Vote> {
    match tier {
        UsageTier::Equip | UsageTier::Replace | UsageTier::GuildTask | UsageTier::BadEquip => {
            Some(Vote::Need)
        }
        UsageTier::Skill
        | UsageTier::Use
        | UsageTier::Disenchant
        | UsageTier::Ah
        | UsageTier::Vendor => Some(Vote::Greed),
        UsageTier::None => None,
    }
}
