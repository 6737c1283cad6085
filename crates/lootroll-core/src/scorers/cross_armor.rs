use crate::spec::SpecContext;
use crate::types::{ArmorSubclass, CharacterClass, ItemClass, ItemDescriptor};

/// The armor type a class is built to wear.
pub fn canonical_armor(class: CharacterClass) -> ArmorSubclass {
    match class {
        CharacterClass::Warrior | CharacterClass::Paladin | CharacterClass::DeathKnight => {
            ArmorSubclass::Plate
        }
        CharacterClass::Hunter | CharacterClass::Shaman => ArmorSubclass::Mail,
        CharacterClass::Rogue | CharacterClass::Druid => ArmorSubclass::Leather,
        CharacterClass::Mage | CharacterClass::Warlock | CharacterClass::Priest => {
            ArmorSubclass::Cloth
        }
    }
}

/// Whether an equip opportunity may become a NEED.
///
/// Non-armor items and armor of the class's own type always qualify. Any
/// other armor subclass, jewelry and shields included, qualifies only when
/// an item is equipped in the same slot and the candidate's score reaches
/// the equipped score times `margin`. With no equipped item or a
/// non-positive margin it never does.
pub fn cross_armor_upgrade(
    ctx: &SpecContext,
    item: &ItemDescriptor,
    current: Option<&ItemDescriptor>,
    margin: f32,
) -> bool {
    if item.class != ItemClass::Armor {
        return true;
    }

    if item.subclass == canonical_armor(ctx.class).id() {
        return true;
    }

    if margin <= 0.0 {
        return false;
    }

    match current {
        Some(current) => item.score() >= current.score() * margin,
        None => false,
    }
}
