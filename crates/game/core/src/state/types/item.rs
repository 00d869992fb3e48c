//! Item-related state types.
//!
//! Items form a closed sum type ([`Item`]) over costumes, equipment and
//! materials. The fields every item shares live in [`ItemBase`]; behaviour
//! that differs per kind is dispatched with `match`.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::env::RandomSource;
use crate::state::codec::block_index;

/// Ordinal item-quality tier.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Grade {
    Normal,
    Rare,
    Epic,
    Unique,
    Legendary,
    Divinity,
}

impl Grade {
    /// Next grade up, saturating at [`Grade::Divinity`].
    pub const fn next(self) -> Grade {
        match self {
            Grade::Normal => Grade::Rare,
            Grade::Rare => Grade::Epic,
            Grade::Epic => Grade::Unique,
            Grade::Unique => Grade::Legendary,
            Grade::Legendary | Grade::Divinity => Grade::Divinity,
        }
    }
}

/// Coarse item category derived from the subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ItemType {
    Costume,
    Equipment,
    Material,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum ItemSubType {
    // equipment
    Weapon,
    Armor,
    Belt,
    Necklace,
    Ring,
    Aura,
    Grimoire,
    // costumes
    FullCostume,
    HairCostume,
    EarCostume,
    EyeCostume,
    TailCostume,
    Title,
    // materials
    EquipmentMaterial,
    MonsterPart,
    NormalMaterial,
    Hourglass,
    ApStone,
}

impl ItemSubType {
    pub const fn item_type(self) -> ItemType {
        use ItemSubType::*;
        match self {
            Weapon | Armor | Belt | Necklace | Ring | Aura | Grimoire => ItemType::Equipment,
            FullCostume | HairCostume | EarCostume | EyeCostume | TailCostume | Title => {
                ItemType::Costume
            }
            EquipmentMaterial | MonsterPart | NormalMaterial | Hourglass | ApStone => {
                ItemType::Material
            }
        }
    }
}

/// Unique identity of a non-fungible item instance.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NonFungibleId(pub [u8; 16]);

impl NonFungibleId {
    /// Draws a fresh id from the action's random stream (four words).
    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        for chunk in bytes.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rng.next_u32().to_le_bytes());
        }
        Self(bytes)
    }
}

impl fmt::Display for NonFungibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for NonFungibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NonFungibleId({})", hex::encode(self.0))
    }
}

/// Grouping key shared by every unit of one material.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FungibleId(pub [u8; 32]);

impl FungibleId {
    pub fn of_material(item_id: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"material");
        hasher.update(item_id.to_le_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Debug for FungibleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FungibleId({})", hex::encode(&self.0[..8]))
    }
}

/// Fields every item kind shares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBase {
    /// Row id in the item table.
    pub id: u32,
    pub grade: Grade,
    pub item_sub_type: ItemSubType,
}

impl ItemBase {
    pub const fn new(id: u32, grade: Grade, item_sub_type: ItemSubType) -> Self {
        Self {
            id,
            grade,
            item_sub_type,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum StatType {
    Hp,
    Atk,
    Def,
    Cri,
    Hit,
    Spd,
}

/// Option unlocked on an equipment instance when it was crafted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOption {
    Stat { stat: StatType, value: u32 },
    Skill { skill_id: u32, power: u32, chance: u32 },
}

/// Recipe an equipment instance was produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub recipe_id: u32,
    pub sub_recipe_id: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costume {
    pub base: ItemBase,
    pub non_fungible_id: NonFungibleId,
    #[serde(with = "block_index")]
    pub required_block_index: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub base: ItemBase,
    pub non_fungible_id: NonFungibleId,
    #[serde(with = "block_index")]
    pub required_block_index: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ItemOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub base: ItemBase,
    pub fungible_id: FungibleId,
}

impl Material {
    pub fn new(base: ItemBase) -> Self {
        Self {
            fungible_id: FungibleId::of_material(base.id),
            base,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Item {
    Costume(Costume),
    Equipment(Equipment),
    Material(Material),
}

impl Item {
    pub fn base(&self) -> &ItemBase {
        match self {
            Item::Costume(costume) => &costume.base,
            Item::Equipment(equipment) => &equipment.base,
            Item::Material(material) => &material.base,
        }
    }

    pub fn grade(&self) -> Grade {
        self.base().grade
    }

    pub fn item_sub_type(&self) -> ItemSubType {
        self.base().item_sub_type
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Item::Costume(_) => ItemType::Costume,
            Item::Equipment(_) => ItemType::Equipment,
            Item::Material(_) => ItemType::Material,
        }
    }

    pub fn non_fungible_id(&self) -> Option<NonFungibleId> {
        match self {
            Item::Costume(costume) => Some(costume.non_fungible_id),
            Item::Equipment(equipment) => Some(equipment.non_fungible_id),
            Item::Material(_) => None,
        }
    }

    /// Block before which the item may not be consumed; materials are never locked.
    pub fn required_block_index(&self) -> Option<u64> {
        match self {
            Item::Costume(costume) => Some(costume.required_block_index),
            Item::Equipment(equipment) => Some(equipment.required_block_index),
            Item::Material(_) => None,
        }
    }

    pub fn is_unlocked_at(&self, block_index: u64) -> bool {
        self.required_block_index()
            .is_none_or(|required| required <= block_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn grade_promotion_saturates() {
        let promoted: Vec<Grade> = Grade::iter().map(Grade::next).collect();
        assert_eq!(
            promoted,
            vec![
                Grade::Rare,
                Grade::Epic,
                Grade::Unique,
                Grade::Legendary,
                Grade::Divinity,
                Grade::Divinity,
            ]
        );
        assert!(Grade::Normal < Grade::Divinity);
    }

    #[test]
    fn subtype_parses_from_display_name() {
        for sub_type in ItemSubType::iter() {
            let parsed: ItemSubType = sub_type.to_string().parse().unwrap();
            assert_eq!(parsed, sub_type);
        }
    }

    #[test]
    fn lock_gate_uses_required_block_index() {
        let equipment = Item::Equipment(Equipment {
            base: ItemBase::new(10_100_000, Grade::Rare, ItemSubType::Aura),
            non_fungible_id: NonFungibleId([1; 16]),
            required_block_index: 100,
            options: Vec::new(),
            recipe: None,
        });
        assert!(!equipment.is_unlocked_at(50));
        assert!(equipment.is_unlocked_at(100));

        let material = Item::Material(Material::new(ItemBase::new(
            303_000,
            Grade::Normal,
            ItemSubType::EquipmentMaterial,
        )));
        assert!(material.is_unlocked_at(0));
    }

    #[test]
    fn equipment_without_options_omits_optional_fields() {
        let equipment = Equipment {
            base: ItemBase::new(1, Grade::Normal, ItemSubType::Weapon),
            non_fungible_id: NonFungibleId([0; 16]),
            required_block_index: 0,
            options: Vec::new(),
            recipe: None,
        };
        let json = serde_json::to_string(&equipment).unwrap();
        assert!(!json.contains("options"));
        assert!(!json.contains("recipe"));
    }
}
