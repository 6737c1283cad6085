//! Master-loot start-roll broadcast.
//!
//! Payload layout, little-endian, in order: creature guid (u64), map id,
//! item slot, item id, random suffix, random property id, stack count and
//! timeout (u32 each). Bytes past the timeout are ignored.

use chrono::Utc;
use thiserror::Error;

use super::{ActionContext, ActionError, ActionOutcome, NoActionReason, RollReport};
use crate::types::{ObjectGuid, RandomEnchant};

/// Bytes needed to decode a [`MasterLootPayload`].
pub const MASTER_LOOT_PAYLOAD_LEN: usize = 8 + 7 * 4;

/// Errors from decoding a start-roll payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// A decoded start-roll broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MasterLootPayload {
    pub creature: ObjectGuid,
    pub map_id: u32,
    pub item_slot: u32,
    pub item_id: u32,
    pub random_suffix: u32,
    pub random_property_id: u32,
    pub count: u32,
    pub timeout: u32,
}

impl MasterLootPayload {
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        if bytes.len() < MASTER_LOOT_PAYLOAD_LEN {
            return Err(PayloadError::Truncated {
                expected: MASTER_LOOT_PAYLOAD_LEN,
                actual: bytes.len(),
            });
        }

        let mut guid = [0u8; 8];
        guid.copy_from_slice(&bytes[..8]);
        let field = |index: usize| {
            let start = 8 + index * 4;
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes[start..start + 4]);
            u32::from_le_bytes(buf)
        };

        Ok(Self {
            creature: ObjectGuid(u64::from_le_bytes(guid)),
            map_id: field(0),
            item_slot: field(1),
            item_id: field(2),
            random_suffix: field(3),
            random_property_id: field(4),
            count: field(5),
            timeout: field(6),
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MASTER_LOOT_PAYLOAD_LEN);
        out.extend_from_slice(&self.creature.raw().to_le_bytes());
        for value in [
            self.map_id,
            self.item_slot,
            self.item_id,
            self.random_suffix,
            self.random_property_id,
            self.count,
            self.timeout,
        ] {
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// The property id when set, otherwise the suffix, the same way open
    /// rolls on the ledger carry their enchant.
    pub fn random_enchant(&self) -> RandomEnchant {
        RandomEnchant::from_parts(self.random_property_id, self.random_suffix)
    }
}

pub(super) fn is_useful(ctx: &ActionContext<'_>) -> bool {
    ctx.ledger.is_some() && ctx.controller.is_none()
}

pub(super) fn execute(
    ctx: &ActionContext<'_>,
    payload: &[u8],
) -> Result<ActionOutcome, ActionError> {
    let ledger = match ctx.ledger {
        Some(ledger) => ledger,
        None => return Ok(ActionOutcome::NoAction(NoActionReason::NotInGroup)),
    };
    if ctx.controller.is_some() {
        return Ok(ActionOutcome::NoAction(NoActionReason::ControllerAttached));
    }

    let payload = match MasterLootPayload::decode(payload) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "malformed master-loot payload");
            return Err(err.into());
        }
    };

    let item = match ctx.templates.resolve(payload.item_id) {
        Some(item) => item,
        None => {
            tracing::debug!(item_id = payload.item_id, "item template not found");
            return Ok(ActionOutcome::NoAction(NoActionReason::UnknownItem(
                payload.item_id,
            )));
        }
    };

    let spec = ctx.spec_context();
    let decision = ctx
        .policy()
        .decide(Some(&item), &spec, payload.random_enchant());

    if let Err(err) = ledger.submit_vote(ctx.participant, payload.creature, decision.vote) {
        tracing::warn!(
            creature = %payload.creature,
            item_id = item.item_id,
            vote = %decision.vote,
            error = %err,
            "ledger rejected master-loot vote"
        );
        return Err(err.into());
    }

    tracing::info!(
        participant = %ctx.participant,
        creature = %payload.creature,
        map_id = payload.map_id,
        item_id = item.item_id,
        vote = %decision.vote,
        reason = ?decision.reason,
        "submitted master-loot vote"
    );

    Ok(ActionOutcome::Voted(RollReport {
        roll: payload.creature,
        item_id: item.item_id,
        item_name: item.name,
        computed: decision.vote,
        submitted: decision.vote,
        reason: decision.reason,
        submitted_at: Utc::now(),
    }))
}
