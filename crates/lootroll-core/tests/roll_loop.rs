//! End-to-end tests driving the actions through the in-memory collaborators.

use lootroll_core::filters::HyperlinkParser;
use lootroll_core::memory::{
    InMemoryLedger, InventorySnapshot, ItemCatalog, LootAllowList, RecordingChannel,
    RecordingDice, UsageTable,
};
use lootroll_core::types::{ArmorSubclass, Bonding, InventoryType, ItemClass, MISC_SUBCLASS_JUNK};
use lootroll_core::{
    Action, ActionContext, ActionOutcome, CharacterClass, ClassDefaultSpecs, ControllerChannel,
    DecisionReason, GroupLedger, ItemDescriptor, ItemQuality, LootMethod, LootRollConfig,
    MasterLootPayload, NoActionReason, ObjectGuid, RollRecord, RollVoteState, UsageTier, Vote,
};

const PRIEST: ObjectGuid = ObjectGuid(0x0000_0000_0000_0101);
const MAGE: ObjectGuid = ObjectGuid(0x0000_0000_0000_0102);

fn armor(item_id: u32, name: &str, subclass: ArmorSubclass, item_level: u32) -> ItemDescriptor {
    ItemDescriptor {
        item_id,
        name: name.to_string(),
        class: ItemClass::Armor,
        subclass: subclass.id(),
        quality: ItemQuality::Epic,
        bonding: Bonding::BindOnPickup,
        stats: vec![],
        item_level,
        allowable_class: -1,
        unique_equippable: false,
        inventory_type: InventoryType(5),
    }
}

fn token(item_id: u32, item_level: u32, classes: &[CharacterClass]) -> ItemDescriptor {
    let mask = classes.iter().fold(0u32, |mask, class| mask | class.class_mask());
    ItemDescriptor {
        item_id,
        name: "Chestguard of the Lost Protector".to_string(),
        class: ItemClass::Misc,
        subclass: MISC_SUBCLASS_JUNK,
        quality: ItemQuality::Epic,
        bonding: Bonding::BindOnPickup,
        stats: vec![],
        item_level,
        allowable_class: mask as i32,
        unique_equippable: false,
        inventory_type: InventoryType(0),
    }
}

/// Per-participant collaborators; the ledger and templates are shared.
struct Member {
    guid: ObjectGuid,
    class: CharacterClass,
    config: LootRollConfig,
    usage: UsageTable,
    inventory: InventorySnapshot,
    allow: LootAllowList,
    channel: RecordingChannel,
    dice: RecordingDice,
}

impl Member {
    fn new(guid: ObjectGuid, class: CharacterClass, inventory: InventorySnapshot) -> Self {
        Self {
            guid,
            class,
            config: LootRollConfig::default(),
            usage: UsageTable::new(),
            inventory,
            allow: LootAllowList::All,
            channel: RecordingChannel::new(),
            dice: RecordingDice::new(),
        }
    }

    fn context<'a>(
        &'a self,
        catalog: &'a ItemCatalog,
        ledger: &'a InMemoryLedger,
        controller: bool,
    ) -> ActionContext<'a> {
        ActionContext {
            participant: self.guid,
            class: self.class,
            config: &self.config,
            templates: catalog,
            ledger: Some(ledger as &dyn GroupLedger),
            usage: &self.usage,
            inventory: &self.inventory,
            loot_allowance: &self.allow,
            spec_resolver: &ClassDefaultSpecs,
            controller: controller.then_some(&self.channel as &dyn ControllerChannel),
            dice: &self.dice,
            link_parser: &HyperlinkParser,
        }
    }
}

fn drain(ctx: &ActionContext<'_>) -> Vec<ActionOutcome> {
    let mut outcomes = Vec::new();
    loop {
        let outcome = Action::LootRoll.execute(ctx).unwrap();
        if outcome.is_no_action() {
            return outcomes;
        }
        outcomes.push(outcome);
    }
}

#[test]
fn test_two_participants_share_ledger() {
    let catalog = ItemCatalog::new()
        .with_item(armor(100, "Leather Tunic", ArmorSubclass::Leather, 50))
        .with_item(armor(101, "Silk Robe", ArmorSubclass::Cloth, 60));
    let ledger = InMemoryLedger::new(LootMethod::GroupLoot)
        .with_roll(RollRecord::new(ObjectGuid(10), 0, 100))
        .with_roll(RollRecord::new(ObjectGuid(11), 1, 101));

    // Equipped leather scoring 50 * 3 = 150 against a candidate at 50 * 4 = 200.
    let mut current = armor(1, "Old Tunic", ArmorSubclass::Leather, 50);
    current.quality = ItemQuality::Rare;
    let mut priest = Member::new(
        PRIEST,
        CharacterClass::Priest,
        InventorySnapshot::new(55.0).with_equipped(current),
    );
    priest.usage = UsageTable::new()
        .with(100, UsageTier::Replace)
        .with(101, UsageTier::Replace);

    let mut mage = Member::new(MAGE, CharacterClass::Mage, InventorySnapshot::new(55.0));
    mage.usage = UsageTable::new()
        .with(100, UsageTier::Replace)
        .with(101, UsageTier::Disenchant);

    let priest_votes = drain(&priest.context(&catalog, &ledger, false));
    let mage_votes = drain(&mage.context(&catalog, &ledger, false));
    assert_eq!(priest_votes.len(), 2);
    assert_eq!(mage_votes.len(), 2);

    let tunic = ledger.roll(ObjectGuid(10)).unwrap();
    assert_eq!(tunic.vote_of(PRIEST), RollVoteState::Cast(Vote::Need));
    // No leather equipped: the off-type piece cannot clear the margin.
    assert_eq!(tunic.vote_of(MAGE), RollVoteState::Cast(Vote::Greed));

    let robe = ledger.roll(ObjectGuid(11)).unwrap();
    assert_eq!(robe.vote_of(PRIEST), RollVoteState::Cast(Vote::Need));
    assert_eq!(robe.vote_of(MAGE), RollVoteState::Cast(Vote::Greed));

    let order: Vec<_> = ledger
        .submissions()
        .iter()
        .map(|s| (s.participant, s.roll))
        .collect();
    assert_eq!(
        order,
        vec![
            (PRIEST, ObjectGuid(10)),
            (PRIEST, ObjectGuid(11)),
            (MAGE, ObjectGuid(10)),
            (MAGE, ObjectGuid(11)),
        ]
    );
}

#[test]
fn test_token_need_and_greed_by_class() {
    let catalog = ItemCatalog::new().with_item(token(
        40626,
        260,
        &[CharacterClass::Priest, CharacterClass::Mage],
    ));
    let ledger = InMemoryLedger::new(LootMethod::NeedBeforeGreed)
        .with_roll(RollRecord::new(ObjectGuid(20), 0, 40626));

    let mut priest = Member::new(PRIEST, CharacterClass::Priest, InventorySnapshot::new(250.0));
    priest.config.token_ilevel_margin = 0.02;
    let warrior = Member::new(
        ObjectGuid(0x103),
        CharacterClass::Warrior,
        InventorySnapshot::new(200.0),
    );

    match Action::LootRoll.execute(&priest.context(&catalog, &ledger, false)).unwrap() {
        ActionOutcome::Voted(report) => {
            assert_eq!(report.submitted, Vote::Need);
            assert_eq!(report.reason, DecisionReason::TokenUpgrade);
        }
        other => panic!("expected a vote, got {:?}", other),
    }
    match Action::LootRoll.execute(&warrior.context(&catalog, &ledger, false)).unwrap() {
        ActionOutcome::Voted(report) => {
            assert_eq!(report.submitted, Vote::Greed);
            assert_eq!(report.reason, DecisionReason::TokenNotEligible);
        }
        other => panic!("expected a vote, got {:?}", other),
    }
}

#[test]
fn test_unknown_template_blocks_until_resolvable() {
    let mut catalog = ItemCatalog::new()
        .with_item(armor(101, "Silk Robe", ArmorSubclass::Cloth, 60));
    let ledger = InMemoryLedger::new(LootMethod::GroupLoot)
        .with_roll(RollRecord::new(ObjectGuid(10), 0, 300))
        .with_roll(RollRecord::new(ObjectGuid(11), 1, 101));
    let priest = Member::new(PRIEST, CharacterClass::Priest, InventorySnapshot::new(55.0));

    assert!(Action::LootRoll.is_useful(&priest.context(&catalog, &ledger, false)));
    assert_eq!(
        Action::LootRoll
            .execute(&priest.context(&catalog, &ledger, false))
            .unwrap(),
        ActionOutcome::NoAction(NoActionReason::UnknownItem(300))
    );
    assert!(ledger.submissions().is_empty());

    catalog.insert(armor(300, "Mystery Vest", ArmorSubclass::Cloth, 40));
    let votes = drain(&priest.context(&catalog, &ledger, false));
    assert_eq!(votes.len(), 2);
}

#[test]
fn test_roll_closed_by_timeout_is_not_voted() {
    let catalog = ItemCatalog::new()
        .with_item(armor(101, "Silk Robe", ArmorSubclass::Cloth, 60));
    let ledger = InMemoryLedger::new(LootMethod::GroupLoot)
        .with_roll(RollRecord::new(ObjectGuid(10), 0, 101))
        .with_roll(RollRecord::new(ObjectGuid(11), 1, 101));
    let priest = Member::new(PRIEST, CharacterClass::Priest, InventorySnapshot::new(55.0));

    ledger.close_roll(ObjectGuid(10));
    let votes = drain(&priest.context(&catalog, &ledger, false));
    assert_eq!(votes.len(), 1);
    assert_eq!(ledger.submissions()[0].roll, ObjectGuid(11));
}

#[test]
fn test_announcement_reaches_controller() {
    let catalog = ItemCatalog::new()
        .with_item(armor(101, "Silk Robe", ArmorSubclass::Cloth, 60));
    let ledger = InMemoryLedger::new(LootMethod::MasterLoot)
        .with_roll(RollRecord::new(ObjectGuid(11), 1, 101));
    let mut priest = Member::new(PRIEST, CharacterClass::Priest, InventorySnapshot::new(55.0));
    priest.config.announce_to_master = true;
    priest.usage = UsageTable::new().with(101, UsageTier::Equip);

    drain(&priest.context(&catalog, &ledger, true));
    assert_eq!(priest.channel.messages(), vec!["Rolling NEED on Silk Robe"]);
    assert_eq!(ledger.submissions()[0].vote, Vote::Pass);
}

#[test]
fn test_master_loot_broadcast_then_manual_roll() {
    let catalog = ItemCatalog::new()
        .with_item(armor(101, "Silk Robe", ArmorSubclass::Cloth, 60));
    let creature = ObjectGuid(0xF130_0039_8C00_0077);
    let ledger =
        InMemoryLedger::new(LootMethod::MasterLoot).with_roll(RollRecord::new(creature, 0, 101));
    let mut priest = Member::new(PRIEST, CharacterClass::Priest, InventorySnapshot::new(55.0));
    priest.usage = UsageTable::new()
        .with(101, UsageTier::Vendor)
        .with_property(101, -41, UsageTier::Replace);

    let payload = MasterLootPayload {
        creature,
        map_id: 603,
        item_slot: 0,
        item_id: 101,
        random_suffix: 41,
        random_property_id: 0,
        count: 1,
        timeout: 60_000,
    };
    let action = Action::MasterLootRoll {
        payload: payload.encode(),
    };
    let ctx = priest.context(&catalog, &ledger, false);
    assert!(action.is_useful(&ctx));
    match action.execute(&ctx).unwrap() {
        ActionOutcome::Voted(report) => assert_eq!(report.submitted, Vote::Need),
        other => panic!("expected a vote, got {:?}", other),
    }
    assert_eq!(
        ledger.roll(creature).unwrap().vote_of(PRIEST),
        RollVoteState::Cast(Vote::Need)
    );
    assert!(ledger.open_rolls().iter().all(|r| !r.is_pending_for(PRIEST)));

    // The manual roll ignores the random suffix and sees only the base tier.
    let link = format!("|cffa335ee|Hitem:{}:0:0:0|h[Silk Robe]|h|r", 101);
    let roll = Action::Roll { link: Some(link) };
    assert_eq!(
        roll.execute(&ctx).unwrap(),
        ActionOutcome::NoAction(NoActionReason::NotAnUpgrade(101))
    );
    assert!(priest.dice.requests().is_empty());
}
