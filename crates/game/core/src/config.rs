/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Gas charged for every action before any state is loaded.
    pub base_action_cost: u64,
    /// Additional gas charged per material consumed by synthesis.
    pub synthesis_material_cost: u64,
    /// Additional gas charged per recipient of a mint.
    pub mint_recipient_cost: u64,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Denominator of every probability in the tables (`10000` = 100%).
    pub const SUCCESS_RATE_SCALE: u32 = 10_000;
    /// Weight assumed for candidates missing from the synthesize weight table.
    pub const DEFAULT_SYNTHESIS_WEIGHT: u32 = 10_000;
    /// Avatar slots per agent (`0..MAX_AVATAR_SLOTS`).
    pub const MAX_AVATAR_SLOTS: u8 = 3;
    pub const MIN_AVATAR_NAME_LEN: usize = 2;
    pub const MAX_AVATAR_NAME_LEN: usize = 20;
    /// Upper bound on materials consumed in one synthesis action.
    pub const MAX_SYNTHESIS_MATERIALS: usize = 100;
    pub const ARENA_INITIAL_SCORE: i32 = 1000;
    pub const ARENA_INITIAL_TICKETS: u32 = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_ACTION_COST: u64 = 1;
    pub const DEFAULT_SYNTHESIS_MATERIAL_COST: u64 = 1;
    pub const DEFAULT_MINT_RECIPIENT_COST: u64 = 1;

    pub fn new() -> Self {
        Self {
            base_action_cost: Self::DEFAULT_BASE_ACTION_COST,
            synthesis_material_cost: Self::DEFAULT_SYNTHESIS_MATERIAL_COST,
            mint_recipient_cost: Self::DEFAULT_MINT_RECIPIENT_COST,
        }
    }

    pub fn with_base_action_cost(mut self, cost: u64) -> Self {
        self.base_action_cost = cost;
        self
    }

    pub fn with_synthesis_material_cost(mut self, cost: u64) -> Self {
        self.synthesis_material_cost = cost;
        self
    }

    pub fn with_mint_recipient_cost(mut self, cost: u64) -> Self {
        self.mint_recipient_cost = cost;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
