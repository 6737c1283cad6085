//! Stat-to-spec alignment.
//!
//! Only "notable" stats take part: the caster set (spell power, intellect,
//! spirit, mana regeneration) and the melee set (strength, attack power,
//! armor penetration, expertise). Stamina, agility and everything else are
//! ignored. An item with no notable stats is neutral.

use crate::spec::{Archetype, SpecContext};
use crate::types::{ItemDescriptor, StatType};

fn is_caster_stat(stat: StatType) -> bool {
    matches!(
        stat,
        StatType::SpellPower | StatType::Intellect | StatType::Spirit | StatType::ManaRegeneration
    )
}

fn is_melee_stat(stat: StatType) -> bool {
    matches!(
        stat,
        StatType::Strength
            | StatType::AttackPower
            | StatType::ArmorPenetrationRating
            | StatType::ExpertiseRating
    )
}

/// Whether the item's notable stats suit the character's role.
///
/// Physical specs reject items whose notable stats are all caster stats.
/// Caster specs reject items whose notable stats are all melee stats, unless
/// attack power is the only melee stat present.
pub fn stats_aligned_with_spec(ctx: &SpecContext, item: &ItemDescriptor) -> bool {
    let notable: Vec<StatType> = item
        .stats
        .iter()
        .map(|s| s.stat)
        .filter(|&s| is_caster_stat(s) || is_melee_stat(s))
        .collect();

    if notable.is_empty() {
        return true;
    }

    match ctx.archetype() {
        Archetype::Physical => !notable.iter().all(|&s| is_caster_stat(s)),
        Archetype::Caster => {
            let all_melee = notable.iter().all(|&s| is_melee_stat(s));
            let beyond_attack_power = notable.iter().any(|&s| s != StatType::AttackPower);
            !(all_melee && beyond_attack_power)
        }
        Archetype::Unclassified => true,
    }
}
