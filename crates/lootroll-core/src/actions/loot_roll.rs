//! Group ledger scan: one vote per invocation.

use chrono::Utc;

use super::{ActionContext, ActionError, ActionOutcome, NoActionReason, RollReport};
use crate::types::Vote;

pub(super) fn is_useful(ctx: &ActionContext<'_>) -> bool {
    match ctx.ledger {
        Some(ledger) => ledger
            .open_rolls()
            .iter()
            .any(|roll| roll.is_pending_for(ctx.participant)),
        None => false,
    }
}

pub(super) fn execute(ctx: &ActionContext<'_>) -> Result<ActionOutcome, ActionError> {
    let ledger = match ctx.ledger {
        Some(ledger) => ledger,
        None => return Ok(ActionOutcome::NoAction(NoActionReason::NotInGroup)),
    };

    let rolls = ledger.open_rolls();
    let pending = rolls
        .iter()
        .enumerate()
        .find(|(_, roll)| roll.is_pending_for(ctx.participant));
    let roll = match pending {
        Some((skipped, roll)) => {
            if skipped > 0 {
                tracing::debug!(
                    participant = %ctx.participant,
                    skipped,
                    "skipped rolls already voted on"
                );
            }
            roll
        }
        None => return Ok(ActionOutcome::NoAction(NoActionReason::NothingPending)),
    };

    let item = match ctx.templates.resolve(roll.item_id) {
        Some(item) => item,
        None => {
            tracing::debug!(
                roll = %roll.item_guid,
                item_id = roll.item_id,
                "item template not found, leaving roll for later"
            );
            return Ok(ActionOutcome::NoAction(NoActionReason::UnknownItem(
                roll.item_id,
            )));
        }
    };

    let spec = ctx.spec_context();
    let decision = ctx
        .policy()
        .decide_restricted(&item, &spec, roll.random_enchant);

    let loot_method = ledger.loot_method();
    let submitted = if loot_method.suppresses_rolls() {
        Vote::Pass
    } else {
        decision.vote
    };

    if let Err(err) = ledger.submit_vote(ctx.participant, roll.item_guid, submitted) {
        tracing::warn!(
            roll = %roll.item_guid,
            item_id = item.item_id,
            vote = %submitted,
            error = %err,
            "ledger rejected vote"
        );
        return Err(err.into());
    }

    tracing::info!(
        participant = %ctx.participant,
        roll = %roll.item_guid,
        item_id = item.item_id,
        vote = %submitted,
        computed = %decision.vote,
        loot_method = ?loot_method,
        reason = ?decision.reason,
        "submitted roll vote"
    );

    ctx.announce(&format!("Rolling {} on {}", decision.vote, item.name));

    Ok(ActionOutcome::Voted(RollReport {
        roll: roll.item_guid,
        item_id: item.item_id,
        item_name: item.name,
        computed: decision.vote,
        submitted,
        reason: decision.reason,
        submitted_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{robe, World, ME};
    use super::super::Action;
    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::ports::{GroupLedger, LedgerError};
    use crate::types::{LootMethod, ObjectGuid, RollRecord, RollVoteState, UsageTier};

    fn world_with_rolls(method: LootMethod) -> World {
        let mut world = World::new(method);
        world.catalog.insert(robe(100));
        world.catalog.insert(robe(101));
        world.usage = world
            .usage
            .with(100, UsageTier::Replace)
            .with(101, UsageTier::Vendor);
        world.ledger.open_roll(RollRecord::new(ObjectGuid(10), 0, 100));
        world.ledger.open_roll(RollRecord::new(ObjectGuid(11), 1, 101));
        world
    }

    #[test]
    fn test_one_vote_per_invocation_in_ledger_order() {
        let world = world_with_rolls(LootMethod::GroupLoot);
        let ctx = world.context(true, false);

        let outcome = Action::LootRoll.execute(&ctx).unwrap();
        match outcome {
            ActionOutcome::Voted(report) => {
                assert_eq!(report.roll, ObjectGuid(10));
                assert_eq!(report.submitted, Vote::Need);
            }
            other => panic!("expected a vote, got {:?}", other),
        }
        assert_eq!(world.ledger.submissions().len(), 1);

        let outcome = Action::LootRoll.execute(&ctx).unwrap();
        match outcome {
            ActionOutcome::Voted(report) => {
                assert_eq!(report.roll, ObjectGuid(11));
                assert_eq!(report.submitted, Vote::Greed);
            }
            other => panic!("expected a vote, got {:?}", other),
        }

        assert!(!Action::LootRoll.is_useful(&ctx));
        assert_eq!(
            Action::LootRoll.execute(&ctx).unwrap(),
            ActionOutcome::NoAction(NoActionReason::NothingPending)
        );
        assert_eq!(world.ledger.submissions().len(), 2);
    }

    #[test]
    fn test_rolls_voted_elsewhere_are_skipped() {
        let mut world = world_with_rolls(LootMethod::GroupLoot);
        let mut voted = RollRecord::new(ObjectGuid(9), 0, 100);
        voted.votes.insert(ME, RollVoteState::Cast(Vote::Greed));
        world.ledger = InMemoryLedger::new(LootMethod::GroupLoot)
            .with_roll(voted)
            .with_roll(RollRecord::new(ObjectGuid(11), 1, 101));
        let ctx = world.context(true, false);

        let outcome = Action::LootRoll.execute(&ctx).unwrap();
        assert!(matches!(outcome, ActionOutcome::Voted(ref r) if r.roll == ObjectGuid(11)));
        assert_eq!(world.ledger.submissions().len(), 1);
    }

    #[test]
    fn test_suppressed_methods_submit_pass() {
        for method in [LootMethod::MasterLoot, LootMethod::FreeForAll] {
            let world = world_with_rolls(method);
            let ctx = world.context(true, false);

            let outcome = Action::LootRoll.execute(&ctx).unwrap();
            match outcome {
                ActionOutcome::Voted(report) => {
                    assert_eq!(report.computed, Vote::Need);
                    assert_eq!(report.submitted, Vote::Pass);
                }
                other => panic!("expected a vote, got {:?}", other),
            }
            assert_eq!(world.ledger.submissions()[0].vote, Vote::Pass);
        }
    }

    #[test]
    fn test_unknown_item_leaves_roll_pending() {
        let world = World::new(LootMethod::GroupLoot);
        world.ledger.open_roll(RollRecord::new(ObjectGuid(10), 0, 999));
        let ctx = world.context(true, false);

        assert_eq!(
            Action::LootRoll.execute(&ctx).unwrap(),
            ActionOutcome::NoAction(NoActionReason::UnknownItem(999))
        );
        assert!(world.ledger.submissions().is_empty());
        assert!(world.ledger.open_rolls()[0].is_pending_for(ME));
    }

    #[test]
    fn test_not_in_group() {
        let world = world_with_rolls(LootMethod::GroupLoot);
        let ctx = world.context(false, false);

        assert!(!Action::LootRoll.is_useful(&ctx));
        assert_eq!(
            Action::LootRoll.execute(&ctx).unwrap(),
            ActionOutcome::NoAction(NoActionReason::NotInGroup)
        );
    }

    #[test]
    fn test_restriction_level_applies_before_submission() {
        let mut world = world_with_rolls(LootMethod::GroupLoot);
        world.config.loot_roll_level = Some(0);
        let ctx = world.context(true, false);

        Action::LootRoll.execute(&ctx).unwrap();
        assert_eq!(world.ledger.submissions()[0].vote, Vote::Pass);
    }

    #[test]
    fn test_announcement_needs_flag_and_controller() {
        let mut world = world_with_rolls(LootMethod::GroupLoot);
        Action::LootRoll.execute(&world.context(true, true)).unwrap();
        assert!(world.channel.messages().is_empty());

        world.config.announce_to_master = true;
        Action::LootRoll.execute(&world.context(true, false)).unwrap();
        assert!(world.channel.messages().is_empty());

        world.ledger.open_roll(RollRecord::new(ObjectGuid(12), 2, 100));
        Action::LootRoll.execute(&world.context(true, true)).unwrap();
        assert_eq!(world.channel.messages(), vec!["Rolling NEED on Robe 100"]);
    }

    struct RejectingLedger;

    impl GroupLedger for RejectingLedger {
        fn open_rolls(&self) -> Vec<RollRecord> {
            vec![RollRecord::new(ObjectGuid(10), 0, 100)]
        }

        fn loot_method(&self) -> LootMethod {
            LootMethod::GroupLoot
        }

        fn submit_vote(
            &self,
            _participant: ObjectGuid,
            roll: ObjectGuid,
            _vote: Vote,
        ) -> Result<(), LedgerError> {
            Err(LedgerError::UnknownRoll(roll))
        }
    }

    #[test]
    fn test_ledger_rejection_is_reported() {
        let world = world_with_rolls(LootMethod::GroupLoot);
        let ledger = RejectingLedger;
        let ctx = ActionContext {
            ledger: Some(&ledger),
            ..world.context(true, false)
        };

        assert_eq!(
            Action::LootRoll.execute(&ctx),
            Err(ActionError::Ledger(LedgerError::UnknownRoll(ObjectGuid(10))))
        );
    }
}
