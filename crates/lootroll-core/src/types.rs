//! Core types for loot roll evaluation.
//!
//! Item templates, character context, group rolls and votes. Numeric ids
//! follow the game's own item template and class tables so descriptors can
//! be built straight from a template row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque 64-bit world identity (participants, item instances, creatures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectGuid(pub u64);

impl ObjectGuid {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

/// Playable character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Paladin,
    Hunter,
    Rogue,
    Priest,
    DeathKnight,
    Shaman,
    Mage,
    Warlock,
    Druid,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 10] = [
        CharacterClass::Warrior,
        CharacterClass::Paladin,
        CharacterClass::Hunter,
        CharacterClass::Rogue,
        CharacterClass::Priest,
        CharacterClass::DeathKnight,
        CharacterClass::Shaman,
        CharacterClass::Mage,
        CharacterClass::Warlock,
        CharacterClass::Druid,
    ];

    /// Game class id (druid is 11; id 10 is unused).
    pub fn id(self) -> u8 {
        match self {
            CharacterClass::Warrior => 1,
            CharacterClass::Paladin => 2,
            CharacterClass::Hunter => 3,
            CharacterClass::Rogue => 4,
            CharacterClass::Priest => 5,
            CharacterClass::DeathKnight => 6,
            CharacterClass::Shaman => 7,
            CharacterClass::Mage => 8,
            CharacterClass::Warlock => 9,
            CharacterClass::Druid => 11,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Bit of this class in an item's allowable-class mask.
    pub fn class_mask(self) -> u32 {
        1 << (self.id() - 1)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Warrior => "warrior",
            CharacterClass::Paladin => "paladin",
            CharacterClass::Hunter => "hunter",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Priest => "priest",
            CharacterClass::DeathKnight => "death knight",
            CharacterClass::Shaman => "shaman",
            CharacterClass::Mage => "mage",
            CharacterClass::Warlock => "warlock",
            CharacterClass::Druid => "druid",
        };
        f.write_str(name)
    }
}

/// Top-level item class from the item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Consumable,
    Container,
    Weapon,
    Gem,
    Armor,
    Reagent,
    Projectile,
    TradeGoods,
    Generic,
    Recipe,
    Money,
    Quiver,
    Quest,
    Key,
    Permanent,
    Misc,
    Glyph,
}

impl ItemClass {
    pub fn is_equipment(self) -> bool {
        matches!(self, ItemClass::Weapon | ItemClass::Armor)
    }
}

/// Subclass id of a generic bag or box.
pub const CONTAINER_SUBCLASS_GENERIC: u32 = 0;

/// Subclass id of misc junk (tier tokens live here).
pub const MISC_SUBCLASS_JUNK: u32 = 0;

/// Weapon subclasses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponSubclass {
    Axe,
    Axe2,
    Bow,
    Gun,
    Mace,
    Mace2,
    Polearm,
    Sword,
    Sword2,
    Obsolete,
    Staff,
    Exotic,
    Exotic2,
    Fist,
    Misc,
    Dagger,
    Thrown,
    Spear,
    Crossbow,
    Wand,
    FishingPole,
}

impl WeaponSubclass {
    const ORDER: [WeaponSubclass; 21] = [
        WeaponSubclass::Axe,
        WeaponSubclass::Axe2,
        WeaponSubclass::Bow,
        WeaponSubclass::Gun,
        WeaponSubclass::Mace,
        WeaponSubclass::Mace2,
        WeaponSubclass::Polearm,
        WeaponSubclass::Sword,
        WeaponSubclass::Sword2,
        WeaponSubclass::Obsolete,
        WeaponSubclass::Staff,
        WeaponSubclass::Exotic,
        WeaponSubclass::Exotic2,
        WeaponSubclass::Fist,
        WeaponSubclass::Misc,
        WeaponSubclass::Dagger,
        WeaponSubclass::Thrown,
        WeaponSubclass::Spear,
        WeaponSubclass::Crossbow,
        WeaponSubclass::Wand,
        WeaponSubclass::FishingPole,
    ];

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ORDER.get(id as usize).copied()
    }

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Armor subclasses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorSubclass {
    Misc,
    Cloth,
    Leather,
    Mail,
    Plate,
    Buckler,
    Shield,
    Libram,
    Idol,
    Totem,
    Sigil,
}

impl ArmorSubclass {
    const ORDER: [ArmorSubclass; 11] = [
        ArmorSubclass::Misc,
        ArmorSubclass::Cloth,
        ArmorSubclass::Leather,
        ArmorSubclass::Mail,
        ArmorSubclass::Plate,
        ArmorSubclass::Buckler,
        ArmorSubclass::Shield,
        ArmorSubclass::Libram,
        ArmorSubclass::Idol,
        ArmorSubclass::Totem,
        ArmorSubclass::Sigil,
    ];

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ORDER.get(id as usize).copied()
    }

    pub fn id(self) -> u32 {
        self as u32
    }
}

/// Item quality; its ordinal doubles as the quality factor of item scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemQuality {
    Poor,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Artifact,
    Heirloom,
}

impl ItemQuality {
    pub fn ordinal(self) -> u32 {
        self as u32
    }
}

/// Binding policy of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bonding {
    #[default]
    None,
    BindOnPickup,
    BindOnEquip,
    BindOnUse,
    Quest,
}

/// Item stat modifier type.
///
/// Only the modifiers the stat filters reason about are named; every other
/// modifier id is carried as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatType {
    Agility,
    Strength,
    Intellect,
    Spirit,
    Stamina,
    ExpertiseRating,
    AttackPower,
    ManaRegeneration,
    ArmorPenetrationRating,
    SpellPower,
    Other(u32),
}

impl StatType {
    pub fn from_id(id: u32) -> Self {
        match id {
            3 => StatType::Agility,
            4 => StatType::Strength,
            5 => StatType::Intellect,
            6 => StatType::Spirit,
            7 => StatType::Stamina,
            37 => StatType::ExpertiseRating,
            38 => StatType::AttackPower,
            43 => StatType::ManaRegeneration,
            44 => StatType::ArmorPenetrationRating,
            45 => StatType::SpellPower,
            other => StatType::Other(other),
        }
    }
}

/// One stat line on an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemStat {
    pub stat: StatType,
    pub value: i32,
}

/// Equipment slot type from the item template (head, chest, legs, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryType(pub u8);

/// Read-only description of an item template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub item_id: u32,

    pub name: String,

    pub class: ItemClass,

    /// Raw subclass id; interpret with [`ItemDescriptor::weapon_subclass`]
    /// or [`ItemDescriptor::armor_subclass`].
    #[serde(default)]
    pub subclass: u32,

    pub quality: ItemQuality,

    #[serde(default)]
    pub bonding: Bonding,

    #[serde(default)]
    pub stats: Vec<ItemStat>,

    #[serde(default)]
    pub item_level: u32,

    /// Bitmask of classes allowed to use the item; -1 allows every class.
    #[serde(default = "all_classes")]
    pub allowable_class: i32,

    #[serde(default)]
    pub unique_equippable: bool,

    #[serde(default)]
    pub inventory_type: InventoryType,
}

fn all_classes() -> i32 {
    -1
}

impl ItemDescriptor {
    pub fn weapon_subclass(&self) -> Option<WeaponSubclass> {
        match self.class {
            ItemClass::Weapon => WeaponSubclass::from_id(self.subclass),
            _ => None,
        }
    }

    pub fn armor_subclass(&self) -> Option<ArmorSubclass> {
        match self.class {
            ItemClass::Armor => ArmorSubclass::from_id(self.subclass),
            _ => None,
        }
    }

    /// Whether the allowable-class mask admits `class`.
    pub fn allows_class(&self, class: CharacterClass) -> bool {
        (self.allowable_class as u32) & class.class_mask() != 0
    }

    /// Score proxy used by the upgrade scorers: item level times quality ordinal.
    pub fn score(&self) -> f32 {
        self.item_level as f32 * self.quality.ordinal() as f32
    }
}

/// The three ledger votes.
///
/// Ordering is for reporting only: PASS < GREED < NEED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vote {
    Pass,
    Greed,
    Need,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Need => write!(f, "NEED"),
            Vote::Greed => write!(f, "GREED"),
            Vote::Pass => write!(f, "PASS"),
        }
    }
}

/// A participant's slot in a roll's vote map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollVoteState {
    #[default]
    NotEmittedYet,
    Cast(Vote),
}

/// Coarse usefulness classification returned by the item-usage evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageTier {
    #[default]
    None,
    Equip,
    Replace,
    BadEquip,
    Skill,
    Use,
    Disenchant,
    Ah,
    Vendor,
    GuildTask,
}

impl UsageTier {
    /// EQUIP, REPLACE or BAD_EQUIP.
    pub fn is_equip_opportunity(self) -> bool {
        matches!(self, UsageTier::Equip | UsageTier::Replace | UsageTier::BadEquip)
    }
}

/// Group loot distribution method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootMethod {
    FreeForAll,
    RoundRobin,
    MasterLoot,
    #[default]
    GroupLoot,
    NeedBeforeGreed,
}

impl LootMethod {
    /// Whether bots should withhold need/greed and always pass.
    pub fn suppresses_rolls(self) -> bool {
        matches!(self, LootMethod::MasterLoot | LootMethod::FreeForAll)
    }
}

/// Random enchantment attached to a dropped item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomEnchant {
    #[default]
    None,
    Property(u32),
    Suffix(u32),
}

impl RandomEnchant {
    /// Prefer the property id; fall back to the suffix when it is zero.
    pub fn from_parts(property_id: u32, suffix_id: u32) -> Self {
        if property_id != 0 {
            RandomEnchant::Property(property_id)
        } else if suffix_id != 0 {
            RandomEnchant::Suffix(suffix_id)
        } else {
            RandomEnchant::None
        }
    }

    /// Signed key understood by the usage evaluator: suffixes are negated.
    pub fn usage_key(self) -> i32 {
        match self {
            RandomEnchant::None => 0,
            RandomEnchant::Property(id) => id as i32,
            RandomEnchant::Suffix(id) => -(id as i32),
        }
    }
}

/// A pending group roll, owned by the group ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollRecord {
    /// Item instance identity; the key votes are submitted against.
    pub item_guid: ObjectGuid,

    pub item_slot: u32,

    pub item_id: u32,

    #[serde(default)]
    pub random_enchant: RandomEnchant,

    #[serde(default)]
    pub votes: BTreeMap<ObjectGuid, RollVoteState>,
}

impl RollRecord {
    pub fn new(item_guid: ObjectGuid, item_slot: u32, item_id: u32) -> Self {
        Self {
            item_guid,
            item_slot,
            item_id,
            random_enchant: RandomEnchant::None,
            votes: BTreeMap::new(),
        }
    }

    /// A participant missing from the vote map counts as not yet emitted.
    pub fn vote_of(&self, participant: ObjectGuid) -> RollVoteState {
        self.votes.get(&participant).copied().unwrap_or_default()
    }

    pub fn is_pending_for(&self, participant: ObjectGuid) -> bool {
        self.vote_of(participant) == RollVoteState::NotEmittedYet
    }
}
