//! Specialization context for the acting character.
//!
//! The shipped [`ClassDefaultSpecs`] strategy assigns each class a fixed
//! default specialization label; it does not inspect talents. Callers must
//! not treat the label as the character's live spec. A real introspection
//! source can be swapped in through [`SpecResolver`] without touching the
//! vote policy.

use serde::{Deserialize, Serialize};

use crate::types::CharacterClass;

/// Class plus specialization label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecContext {
    pub class: CharacterClass,
    pub spec: String,
}

/// Coarse role of a spec for stat alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Physical,
    Caster,
    /// Neither list matched (unknown label on a hybrid class).
    Unclassified,
}

impl SpecContext {
    pub fn new(class: CharacterClass, spec: impl Into<String>) -> Self {
        Self {
            class,
            spec: spec.into(),
        }
    }

    pub fn archetype(&self) -> Archetype {
        let spec = self.spec.as_str();
        match self.class {
            CharacterClass::Warrior
            | CharacterClass::Rogue
            | CharacterClass::Hunter
            | CharacterClass::DeathKnight => Archetype::Physical,
            CharacterClass::Mage | CharacterClass::Warlock | CharacterClass::Priest => {
                Archetype::Caster
            }
            CharacterClass::Druid => match spec {
                "feral" | "bear" => Archetype::Physical,
                "balance" | "resto" => Archetype::Caster,
                _ => Archetype::Unclassified,
            },
            CharacterClass::Paladin => match spec {
                "ret" | "prot" => Archetype::Physical,
                "holy" => Archetype::Caster,
                _ => Archetype::Unclassified,
            },
            CharacterClass::Shaman => match spec {
                "enh" => Archetype::Physical,
                "ele" | "resto" => Archetype::Caster,
                _ => Archetype::Unclassified,
            },
        }
    }
}

/// Strategy deriving a [`SpecContext`] for a character.
pub trait SpecResolver {
    fn resolve(&self, class: CharacterClass) -> SpecContext;
}

/// Static per-class default specialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDefaultSpecs;

impl ClassDefaultSpecs {
    pub fn default_label(class: CharacterClass) -> &'static str {
        match class {
            CharacterClass::Warrior => "arms",
            CharacterClass::Paladin => "ret",
            CharacterClass::Hunter => "beast",
            CharacterClass::Rogue => "combat",
            CharacterClass::Priest => "shadow",
            CharacterClass::DeathKnight => "unholy",
            CharacterClass::Shaman => "enh",
            CharacterClass::Mage => "fire",
            CharacterClass::Warlock => "destro",
            CharacterClass::Druid => "feral",
        }
    }
}

impl SpecResolver for ClassDefaultSpecs {
    fn resolve(&self, class: CharacterClass) -> SpecContext {
        SpecContext::new(class, Self::default_label(class))
    }
}
