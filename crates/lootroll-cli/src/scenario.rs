//! Scenario documents: one character, its gear and the group's open rolls.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use lootroll_core::filters::HyperlinkParser;
use lootroll_core::memory::{
    InMemoryLedger, InventorySnapshot, ItemCatalog, LootAllowList, RecordingChannel,
    RecordingDice, UsageTable,
};
use lootroll_core::{
    ActionContext, CharacterClass, ClassDefaultSpecs, ControllerChannel, GroupLedger,
    ItemDescriptor, LootMethod, LootRollConfig, ObjectGuid, RollRecord, SpecContext,
    SpecResolver, UsageTier,
};

#[derive(Debug, Deserialize)]
pub struct UsageEntry {
    pub item_id: u32,

    /// Signed random property key; suffixes are negative.
    #[serde(default)]
    pub random_property: i32,

    pub tier: UsageTier,
}

#[derive(Debug, Deserialize)]
pub struct BaggedEntry {
    pub item_id: u32,

    #[serde(default = "one")]
    pub count: u32,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InventoryDoc {
    pub average_item_level: f32,
    pub equipped: Vec<ItemDescriptor>,
    pub bagged: Vec<BaggedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub participant: ObjectGuid,

    pub class: CharacterClass,

    /// Overrides the class default spec label.
    #[serde(default)]
    pub spec: Option<String>,

    #[serde(default)]
    pub loot_method: LootMethod,

    /// `false` runs the character as if it were not in a group.
    #[serde(default = "in_group")]
    pub in_group: bool,

    #[serde(default)]
    pub controller_attached: bool,

    #[serde(default)]
    pub items: Vec<ItemDescriptor>,

    #[serde(default)]
    pub usage: Vec<UsageEntry>,

    #[serde(default)]
    pub inventory: InventoryDoc,

    /// Non-equipment items the loot strategy keeps; absent means all.
    #[serde(default)]
    pub allowed_items: Option<Vec<u32>>,

    #[serde(default)]
    pub rolls: Vec<RollRecord>,
}

fn in_group() -> bool {
    true
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        let scenario: Scenario = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse scenario {}", path.display()))?,
            _ => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse scenario {}", path.display()))?,
        };
        Ok(scenario)
    }
}

/// Spec resolver honouring a scenario's spec override.
pub struct ScenarioSpecs {
    label: Option<String>,
}

impl SpecResolver for ScenarioSpecs {
    fn resolve(&self, class: CharacterClass) -> SpecContext {
        match &self.label {
            Some(label) => SpecContext::new(class, label.clone()),
            None => ClassDefaultSpecs.resolve(class),
        }
    }
}

/// In-memory collaborators built from a [`Scenario`].
pub struct World {
    pub participant: ObjectGuid,
    pub class: CharacterClass,
    pub in_group: bool,
    pub controller_attached: bool,
    pub config: LootRollConfig,
    pub catalog: ItemCatalog,
    pub ledger: InMemoryLedger,
    pub usage: UsageTable,
    pub inventory: InventorySnapshot,
    pub allow: LootAllowList,
    pub specs: ScenarioSpecs,
    pub channel: RecordingChannel,
    pub dice: RecordingDice,
    pub links: HyperlinkParser,
}

impl World {
    pub fn build(scenario: Scenario, config: LootRollConfig) -> Self {
        let mut usage = UsageTable::new();
        for entry in &scenario.usage {
            usage.set(entry.item_id, entry.random_property, entry.tier);
        }

        let mut inventory = InventorySnapshot::new(scenario.inventory.average_item_level);
        for item in scenario.inventory.equipped {
            inventory = inventory.with_equipped(item);
        }
        for entry in &scenario.inventory.bagged {
            inventory = inventory.with_bagged(entry.item_id, entry.count);
        }

        let allow = match scenario.allowed_items {
            Some(items) => LootAllowList::only(items),
            None => LootAllowList::All,
        };

        let ledger = InMemoryLedger::new(scenario.loot_method);
        for roll in scenario.rolls {
            ledger.open_roll(roll);
        }

        Self {
            participant: scenario.participant,
            class: scenario.class,
            in_group: scenario.in_group,
            controller_attached: scenario.controller_attached,
            config,
            catalog: scenario.items.into_iter().collect(),
            ledger,
            usage,
            inventory,
            allow,
            specs: ScenarioSpecs {
                label: scenario.spec,
            },
            channel: RecordingChannel::new(),
            dice: RecordingDice::new(),
            links: HyperlinkParser,
        }
    }

    pub fn context(&self) -> ActionContext<'_> {
        ActionContext {
            participant: self.participant,
            class: self.class,
            config: &self.config,
            templates: &self.catalog,
            ledger: self.in_group.then_some(&self.ledger as &dyn GroupLedger),
            usage: &self.usage,
            inventory: &self.inventory,
            loot_allowance: &self.allow,
            spec_resolver: &self.specs,
            controller: self
                .controller_attached
                .then_some(&self.channel as &dyn ControllerChannel),
            dice: &self.dice,
            link_parser: &self.links,
        }
    }
}
