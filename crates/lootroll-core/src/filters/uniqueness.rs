use crate::ports::Inventory;
use crate::types::ItemDescriptor;

/// A unique-equippable item of which a copy is equipped, or more than one
/// copy sits in the bags.
pub fn already_held_unique(item: &ItemDescriptor, inventory: &dyn Inventory) -> bool {
    if !item.unique_equippable {
        return false;
    }

    let total = inventory.count_owned(item.item_id, true);
    let bagged = inventory.count_owned(item.item_id, false);
    let equipped = total > bagged;

    equipped || bagged > 1
}
