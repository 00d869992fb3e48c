//! Shared fixtures for game-core integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use game_core::env::{
    ArenaRow, ItemRow, OptionRow, RecipeRow, SubRecipeOption, SubRecipeRow, SynthesizeEntry,
    SynthesizeRow,
};
use game_core::repository::AvatarRepository;
use game_core::state::{Equipment, Inventory, ItemBase, StatType};
use game_core::{
    ActionInput, ActionOutput, Address, CreateAvatarAction, Currency, GameConfig, GameEngine,
    GameEnv, Grade, Item, ItemSubType, NonFungibleId, PayloadCodec, RandomSource,
    TablesSnapshot, WorldState,
};

pub const MINTER: Address = Address::new([0xaa; 20]);
pub const ALICE: Address = Address::new([0x01; 20]);
pub const BOB: Address = Address::new([0x02; 20]);

pub const GAS_LIMIT: u64 = 1_000;

// ===== item ids =====
pub const RARE_AURA: u32 = 18_000_001;
pub const EPIC_AURA: u32 = 18_000_002;
pub const RARE_WEAPON: u32 = 10_100_001;
pub const EPIC_WEAPON: u32 = 10_200_001;
pub const RARE_COSTUME: u32 = 40_100_001;

pub fn gold() -> Currency {
    Currency::new("GOLD", 2).with_minter(MINTER)
}

/// Synthesis tables without any epic aura.
pub fn base_tables(aura_rate: u32) -> TablesSnapshot {
    TablesSnapshot::new()
        .with_currency(gold())
        .with_synthesize_row(
            SynthesizeRow::new(Grade::Rare)
                .with_entry(ItemSubType::Aura, SynthesizeEntry::new(2, aura_rate))
                .with_entry(ItemSubType::Weapon, SynthesizeEntry::new(2, 10_000))
                .with_entry(ItemSubType::FullCostume, SynthesizeEntry::new(2, 5_000)),
        )
        .with_items([
            ItemRow::new(RARE_AURA, Grade::Rare, ItemSubType::Aura),
            ItemRow::new(RARE_WEAPON, Grade::Rare, ItemSubType::Weapon),
            ItemRow::new(EPIC_WEAPON, Grade::Epic, ItemSubType::Weapon),
            ItemRow::new(RARE_COSTUME, Grade::Rare, ItemSubType::FullCostume),
            ItemRow::new(40_200_001, Grade::Epic, ItemSubType::FullCostume),
        ])
        .with_recipe(RecipeRow {
            id: 1,
            result_equipment_id: EPIC_WEAPON,
            sub_recipe_ids: vec![11],
        })
        .with_sub_recipe(SubRecipeRow {
            id: 11,
            options: vec![
                SubRecipeOption {
                    option_id: 101,
                    ratio: 10_000,
                },
                SubRecipeOption {
                    option_id: 102,
                    ratio: 0,
                },
            ],
        })
        .with_option(OptionRow::Stat {
            id: 101,
            stat: StatType::Atk,
            min: 10,
            max: 20,
        })
        .with_option(OptionRow::Skill {
            id: 102,
            skill_id: 7,
            power_min: 1,
            power_max: 5,
            chance_min: 1,
            chance_max: 3,
        })
        .with_arena_round(ArenaRow {
            championship_id: 1,
            round: 1,
            start_block: 10,
            end_block: 100,
            entrance_fee: 500,
            ticker: "GOLD".to_owned(),
        })
}

/// Synthesis tables including an epic aura.
pub fn tables(aura_rate: u32) -> TablesSnapshot {
    base_tables(aura_rate).with_item(ItemRow::new(EPIC_AURA, Grade::Epic, ItemSubType::Aura))
}

pub fn input(signer: Address, block_index: u64, random_seed: u64) -> ActionInput {
    ActionInput {
        signer,
        block_index,
        random_seed,
        gas_limit: GAS_LIMIT,
    }
}

pub fn engine<'a>(tables: &'a TablesSnapshot, config: &'a GameConfig) -> GameEngine<'a> {
    GameEngine::new(GameEnv::new(tables, config))
}

/// Applies `action` and panics with the failure if it is rejected.
pub fn apply<A: PayloadCodec>(
    engine: &GameEngine<'_>,
    state: &WorldState,
    action: &A,
    input: ActionInput,
) -> ActionOutput {
    engine
        .execute(state, &action.to_plain(), &input)
        .unwrap_or_else(|error| panic!("{} rejected: {error}", A::TYPE_ID))
}

/// Creates an avatar for `agent` in slot 0 and returns its address.
pub fn with_avatar(engine: &GameEngine<'_>, state: WorldState, agent: Address) -> (WorldState, Address) {
    let output = apply(
        engine,
        &state,
        &CreateAvatarAction::new(0, "hero"),
        input(agent, 1, 0),
    );
    let avatar = game_core::repository::keys::avatar_address(&agent, 0);
    (output.state, avatar)
}

/// Deterministic id for the `n`-th fixture item.
pub fn fixture_id(n: u8) -> NonFungibleId {
    let mut bytes = [0u8; 16];
    bytes[0] = 0xf0;
    bytes[15] = n;
    NonFungibleId(bytes)
}

pub fn equipment(n: u8, id: u32, grade: Grade, sub_type: ItemSubType, required: u64) -> Item {
    Item::Equipment(Equipment {
        base: ItemBase::new(id, grade, sub_type),
        non_fungible_id: fixture_id(n),
        required_block_index: required,
        options: Vec::new(),
        recipe: None,
    })
}

/// `count` unlocked rare auras with ids `fixture_id(0..count)`.
pub fn rare_auras(count: u8) -> Vec<Item> {
    (0..count)
        .map(|n| equipment(n, RARE_AURA, Grade::Rare, ItemSubType::Aura, 0))
        .collect()
}

pub fn ids(items: &[Item]) -> Vec<NonFungibleId> {
    items.iter().filter_map(Item::non_fungible_id).collect()
}

/// Writes `items` straight into the avatar's inventory.
pub fn stock(state: &mut WorldState, avatar: Address, items: &[Item]) {
    let mut repository = AvatarRepository::new(&mut *state);
    let mut inventory = repository.inventory(&avatar).unwrap_or_else(|_| Inventory::new());
    for item in items {
        inventory.add_item(item.clone(), 1);
    }
    repository
        .set_inventory(&avatar, &inventory)
        .expect("inventory should encode");
}

pub fn inventory(state: &WorldState, avatar: Address) -> Inventory {
    AvatarRepository::new(state)
        .inventory(&avatar)
        .expect("inventory should decode")
}

/// Replays a fixed script: `next` returns scripted values verbatim and
/// `next_u32` returns them as raw words. Falls back to zero when exhausted.
#[derive(Debug, Default)]
pub struct Scripted {
    values: VecDeque<u32>,
    pub draws: usize,
}

impl Scripted {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            draws: 0,
        }
    }

    fn pop(&mut self) -> u32 {
        self.draws += 1;
        self.values.pop_front().unwrap_or(0)
    }
}

impl RandomSource for Scripted {
    fn next_u32(&mut self) -> u32 {
        self.pop()
    }

    fn next(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.pop() % bound
    }
}
