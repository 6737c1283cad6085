use crate::types::ItemDescriptor;

/// Whether a tier token's item level clears the character's average gear
/// level by the configured margin.
///
/// A margin of zero or less treats every token as an upgrade.
pub fn token_likely_upgrade(
    token: &ItemDescriptor,
    current_average_item_level: f32,
    margin: f32,
) -> bool {
    if margin <= 0.0 {
        return true;
    }

    token.item_level as f32 >= current_average_item_level * (1.0 + margin)
}
