use serde::{Deserialize, Serialize};

use super::item::{FungibleId, Item, NonFungibleId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item: Item,
    pub count: u32,
}

/// Ordered multiset of items owned by an avatar.
///
/// Non-fungible items occupy one entry each (count 1). Materials are merged
/// into a single entry per [`FungibleId`]. Entries keep insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `count` units of a material, or one non-fungible instance.
    ///
    /// Non-fungible items ignore `count` and are always stored singly.
    pub fn add_item(&mut self, item: Item, count: u32) {
        match &item {
            Item::Material(material) => {
                let fungible_id = material.fungible_id;
                if let Some(entry) = self.material_entry_mut(&fungible_id) {
                    entry.count = entry.count.saturating_add(count);
                } else {
                    self.entries.push(InventoryEntry { item, count });
                }
            }
            Item::Costume(_) | Item::Equipment(_) => {
                self.entries.push(InventoryEntry { item, count: 1 });
            }
        }
    }

    pub fn find_non_fungible(&self, id: &NonFungibleId) -> Option<&Item> {
        self.entries
            .iter()
            .map(|entry| &entry.item)
            .find(|item| item.non_fungible_id().as_ref() == Some(id))
    }

    pub fn remove_non_fungible(&mut self, id: &NonFungibleId) -> Option<Item> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.item.non_fungible_id().as_ref() == Some(id))?;
        Some(self.entries.remove(position).item)
    }

    pub fn material_count(&self, fungible_id: &FungibleId) -> u32 {
        self.entries
            .iter()
            .find(|entry| matches!(&entry.item, Item::Material(m) if &m.fungible_id == fungible_id))
            .map_or(0, |entry| entry.count)
    }

    /// Removes `count` units of a material. Returns false (and changes nothing)
    /// when fewer are held.
    pub fn remove_material(&mut self, fungible_id: &FungibleId, count: u32) -> bool {
        let Some(position) = self.entries.iter().position(
            |entry| matches!(&entry.item, Item::Material(m) if &m.fungible_id == fungible_id),
        ) else {
            return false;
        };

        let entry = &mut self.entries[position];
        match entry.count.checked_sub(count) {
            Some(0) => {
                self.entries.remove(position);
                true
            }
            Some(remaining) => {
                entry.count = remaining;
                true
            }
            None => false,
        }
    }

    fn material_entry_mut(&mut self, fungible_id: &FungibleId) -> Option<&mut InventoryEntry> {
        self.entries
            .iter_mut()
            .find(|entry| matches!(&entry.item, Item::Material(m) if &m.fungible_id == fungible_id))
    }
}
