//! Items and stacked inventory storage.

use super::status::StatusEffectKind;

/// What an item does when used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Restores HP when consumed.
    Potion { heal: u32 },
    /// Applies a protective status effect to the user.
    Ward {
        effect: StatusEffectKind,
        duration: u8,
    },
}

/// An item definition. Stored both as loot templates on enemies and, with a
/// quantity, as inventory stacks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
    /// Maximum quantity a single stack may hold.
    pub stack_limit: u32,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ItemKind,
        stack_limit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            stack_limit: stack_limit.max(1),
        }
    }
}

/// One stack of identical items.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

/// Ordered list of item stacks.
///
/// Adding an item fills the first stack of the same name that is under its
/// limit; when every matching stack is full a new stack of quantity 1 is
/// pushed at the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn empty() -> Self {
        Self { stacks: Vec::new() }
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Total quantity held across all stacks of `name`.
    pub fn count(&self, name: &str) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.item.name == name)
            .map(|s| s.quantity)
            .sum()
    }

    /// Adds one item, stacking per the fill-then-push rule.
    pub fn add(&mut self, item: Item) {
        if let Some(stack) = self
            .stacks
            .iter_mut()
            .find(|s| s.item.name == item.name && s.quantity < s.item.stack_limit)
        {
            stack.quantity += 1;
            return;
        }

        self.stacks.push(ItemStack { item, quantity: 1 });
    }

    /// Adds `quantity` copies of an item one at a time so the stacking rule
    /// applies uniformly.
    pub fn add_many(&mut self, item: Item, quantity: u32) {
        for _ in 0..quantity {
            self.add(item.clone());
        }
    }

    /// Removes one item by name from the first matching stack, dropping the
    /// stack when it empties. Returns the item definition if found.
    pub fn consume(&mut self, name: &str) -> Option<Item> {
        let index = self.stacks.iter().position(|s| s.item.name == name)?;
        let stack = &mut self.stacks[index];
        stack.quantity -= 1;
        let item = stack.item.clone();
        if stack.quantity == 0 {
            self.stacks.remove(index);
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion() -> Item {
        Item::new("Minor Potion", "Restores a little health.", ItemKind::Potion { heal: 20 }, 5)
    }

    #[test]
    fn stacking_fills_then_pushes() {
        let mut inv = Inventory::empty();
        inv.add_many(potion(), 12);

        // ceil(12 / 5) stacks, last holding 12 mod 5
        assert_eq!(inv.stacks().len(), 3);
        assert_eq!(inv.stacks()[0].quantity, 5);
        assert_eq!(inv.stacks()[1].quantity, 5);
        assert_eq!(inv.stacks()[2].quantity, 2);
        assert_eq!(inv.count("Minor Potion"), 12);
    }

    #[test]
    fn exact_multiple_fills_last_stack() {
        let mut inv = Inventory::empty();
        inv.add_many(potion(), 10);
        assert_eq!(inv.stacks().len(), 2);
        assert_eq!(inv.stacks()[1].quantity, 5);
    }

    #[test]
    fn consume_drops_empty_stacks() {
        let mut inv = Inventory::empty();
        inv.add(potion());
        assert!(inv.consume("Minor Potion").is_some());
        assert!(inv.is_empty());
        assert!(inv.consume("Minor Potion").is_none());
    }

    #[test]
    fn different_names_never_share_stacks() {
        let mut inv = Inventory::empty();
        inv.add(potion());
        inv.add(Item::new(
            "Stonehide Ward",
            "Hardens the skin.",
            ItemKind::Ward {
                effect: StatusEffectKind::EarthArmor,
                duration: 3,
            },
            5,
        ));
        assert_eq!(inv.stacks().len(), 2);
    }
}
