use crate::types::{ItemClass, ItemDescriptor, CONTAINER_SUBCLASS_GENERIC};

use super::patterns::has_lockbox_keyword;

/// A generic container whose name mentions a lockbox, strongbox or chest.
pub fn is_lockbox(item: &ItemDescriptor) -> bool {
    item.class == ItemClass::Container
        && item.subclass == CONTAINER_SUBCLASS_GENERIC
        && has_lockbox_keyword(&item.name)
}
