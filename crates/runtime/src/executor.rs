//! Sequential block execution.
//!
//! Transactions are applied strictly in block order, each against the snapshot
//! left by the previous one. A rejected action leaves the snapshot as it was
//! and produces a rejected receipt; it never aborts the block.

use game_core::{
    ActionEvaluation, ActionFailure, ActionInput, ActionResult, Address, GameEngine, GameEnv,
    WorldState, compute_seed,
};

use crate::block::Block;
use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::utils::hash::root_hex;

/// Seed context for action execution; other contexts may derive from the same block seed.
const ACTION_SEED_CONTEXT: u32 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceiptStatus {
    Applied(ActionResult),
    Rejected(ActionFailure),
}

/// Outcome of one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub tx_index: u64,
    pub signer: Address,
    pub type_id: String,
    pub random_seed: u64,
    /// Zero for rejected actions.
    pub gas_used: u64,
    pub status: ReceiptStatus,
}

impl Receipt {
    pub fn is_applied(&self) -> bool {
        matches!(self.status, ReceiptStatus::Applied(_))
    }
}

/// Result of applying a whole block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockOutcome {
    pub block_index: u64,
    pub state: WorldState,
    pub receipts: Vec<Receipt>,
    pub state_root: [u8; 32],
    pub actions_root: [u8; 32],
}

/// Applies blocks against a snapshot with one set of tables and config.
pub struct BlockExecutor<'a> {
    engine: GameEngine<'a>,
    config: &'a RuntimeConfig,
}

impl<'a> BlockExecutor<'a> {
    pub fn new(env: GameEnv<'a>, config: &'a RuntimeConfig) -> Self {
        Self {
            engine: GameEngine::new(env),
            config,
        }
    }

    /// Seed for the transaction at `tx_index` signed by `signer`.
    pub fn action_seed(block: &Block, tx_index: u64, signer: &Address) -> u64 {
        compute_seed(block.seed, tx_index, signer.low_word(), ACTION_SEED_CONTEXT)
    }

    pub fn execute_block(&self, state: &WorldState, block: &Block) -> Result<BlockOutcome> {
        let span = tracing::info_span!("block", index = block.index);
        let _enter = span.enter();

        let count = block.transactions.len();
        if count > self.config.max_actions_per_block {
            return Err(RuntimeError::BlockTooLarge {
                index: block.index,
                count,
                max: self.config.max_actions_per_block,
            });
        }
        let actions_root = block.actions_root()?;

        let mut current = state.clone();
        let mut receipts = Vec::with_capacity(count);
        for (tx_index, transaction) in (0u64..).zip(&block.transactions) {
            let input = ActionInput {
                signer: transaction.signer,
                block_index: block.index,
                random_seed: Self::action_seed(block, tx_index, &transaction.signer),
                gas_limit: transaction.gas_limit.unwrap_or(self.config.gas_limit),
            };
            let type_id = transaction.action.type_id.clone();

            let (gas_used, status) =
                match self.engine.evaluate(&current, &transaction.action, &input) {
                    ActionEvaluation::Applied(output) => {
                        tracing::debug!(
                            tx_index,
                            signer = %transaction.signer,
                            action = %type_id,
                            gas_used = output.gas_used,
                            "action applied"
                        );
                        current = output.state;
                        (output.gas_used, ReceiptStatus::Applied(output.result))
                    }
                    ActionEvaluation::Rejected { failure, .. } => {
                        if failure.severity.is_internal() {
                            tracing::error!(
                                tx_index,
                                signer = %transaction.signer,
                                action = %type_id,
                                code = failure.code,
                                "action hit an internal inconsistency: {}",
                                failure.message
                            );
                        } else {
                            tracing::warn!(
                                tx_index,
                                signer = %transaction.signer,
                                action = %type_id,
                                code = failure.code,
                                "action rejected: {}",
                                failure.message
                            );
                        }
                        (0, ReceiptStatus::Rejected(failure))
                    }
                };

            receipts.push(Receipt {
                tx_index,
                signer: transaction.signer,
                type_id,
                random_seed: input.random_seed,
                gas_used,
                status,
            });
        }

        let state_root = current.state_root();
        tracing::info!(
            applied = receipts.iter().filter(|receipt| receipt.is_applied()).count(),
            rejected = receipts.iter().filter(|receipt| !receipt.is_applied()).count(),
            state_root = %root_hex(&state_root),
            actions_root = %root_hex(&actions_root),
            "block executed"
        );

        Ok(BlockOutcome {
            block_index: block.index,
            state: current,
            receipts,
            state_root,
            actions_root,
        })
    }
}
