//! Plain 0-100 dice roll on a linked item.
//!
//! Social rolls outside group loot. The smart vote policy is not consulted.

use super::{ActionContext, ActionOutcome, NoActionReason};
use crate::scorers::classify_usage;
use crate::types::RandomEnchant;

const ROLL_MIN: u32 = 0;
const ROLL_MAX: u32 = 100;

pub(super) fn execute(ctx: &ActionContext<'_>, link: Option<&str>) -> ActionOutcome {
    let link = match link.map(str::trim) {
        Some(link) if !link.is_empty() => link,
        _ => return roll(ctx),
    };

    let item_id = match ctx.link_parser.parse_items(link).first() {
        Some(&item_id) => item_id,
        None => return ActionOutcome::NoAction(NoActionReason::NoItemInLink),
    };

    let item = match ctx.templates.resolve(item_id) {
        Some(item) => item,
        None => return ActionOutcome::NoAction(NoActionReason::UnknownItem(item_id)),
    };

    if item.class.is_equipment() {
        let tier = classify_usage(ctx.usage, &item, RandomEnchant::None);
        if tier.is_equip_opportunity() {
            return roll(ctx);
        }
        tracing::debug!(item_id, usage = ?tier, "linked item is not an upgrade");
    }

    ActionOutcome::NoAction(NoActionReason::NotAnUpgrade(item_id))
}

fn roll(ctx: &ActionContext<'_>) -> ActionOutcome {
    ctx.dice.random_roll(ctx.participant, ROLL_MIN, ROLL_MAX);
    tracing::info!(participant = %ctx.participant, min = ROLL_MIN, max = ROLL_MAX, "random roll");
    ActionOutcome::Rolled {
        min: ROLL_MIN,
        max: ROLL_MAX,
    }
}
