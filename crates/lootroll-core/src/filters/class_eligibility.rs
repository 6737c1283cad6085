//! Weapon, shield and token class restrictions.

use crate::spec::SpecContext;
use crate::types::{
    ArmorSubclass, CharacterClass, ItemClass, ItemDescriptor, WeaponSubclass,
};

use CharacterClass::*;

/// Whether the character's class may use a weapon or shield subtype.
///
/// Non-weapon, non-shield armor and every other item class pass; relics are
/// restricted by the template's own class mask instead.
pub fn class_eligible(ctx: &SpecContext, item: &ItemDescriptor) -> bool {
    let class = ctx.class;
    match item.class {
        ItemClass::Weapon => match item.weapon_subclass() {
            Some(subclass) => weapon_allowed(class, subclass),
            None => true,
        },
        ItemClass::Armor => match item.armor_subclass() {
            Some(ArmorSubclass::Shield) => matches!(class, Warrior | Paladin | Shaman),
            _ => true,
        },
        _ => true,
    }
}

fn weapon_allowed(class: CharacterClass, subclass: WeaponSubclass) -> bool {
    match subclass {
        WeaponSubclass::Axe | WeaponSubclass::Axe2 => {
            matches!(class, Warrior | Hunter | Shaman | DeathKnight)
        }
        WeaponSubclass::Bow | WeaponSubclass::Gun | WeaponSubclass::Crossbow => class == Hunter,
        WeaponSubclass::Dagger => matches!(class, Rogue | Hunter | Mage | Warlock | Priest),
        WeaponSubclass::Fist => matches!(class, Rogue | Hunter | Shaman | Warrior),
        WeaponSubclass::Mace | WeaponSubclass::Mace2 => {
            matches!(class, Warrior | Paladin | Shaman | Priest | DeathKnight)
        }
        WeaponSubclass::Polearm => matches!(class, Warrior | Paladin | Hunter | DeathKnight),
        WeaponSubclass::Sword | WeaponSubclass::Sword2 => {
            matches!(class, Warrior | Paladin | Rogue | Hunter | DeathKnight)
        }
        WeaponSubclass::Staff => matches!(class, Mage | Warlock | Priest | Druid),
        WeaponSubclass::Thrown => matches!(class, Rogue | Hunter),
        WeaponSubclass::Wand => matches!(class, Mage | Warlock | Priest),
        WeaponSubclass::Obsolete
        | WeaponSubclass::Exotic
        | WeaponSubclass::Exotic2
        | WeaponSubclass::Misc
        | WeaponSubclass::Spear
        | WeaponSubclass::FishingPole => true,
    }
}

/// Whether a class-restricted token lists this class in its allowable mask.
pub fn can_use_token(item: &ItemDescriptor, class: CharacterClass) -> bool {
    item.allows_class(class)
}
