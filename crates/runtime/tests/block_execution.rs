//! Block application through the runtime: ordering, seeds, receipts and storage.

use game_core::{
    ActionResult, Address, CreateAvatarAction, Currency, ErrorKind, GameConfig,
    MintAssetsAction, PayloadCodec, TablesSnapshot, TransferAssetAction, WorldState,
};
use runtime::{
    Block, BlockExecutor, InMemoryStateRepo, ReceiptStatus, Runtime, RuntimeConfig, RuntimeError,
    StateRepository, Transaction,
};

const MINTER: Address = Address::new([0xaa; 20]);
const ALICE: Address = Address::new([0x01; 20]);
const BOB: Address = Address::new([0x02; 20]);

fn gold() -> Currency {
    Currency::new("GOLD", 2).with_minter(MINTER)
}

fn runtime_with(config: RuntimeConfig) -> Runtime<InMemoryStateRepo> {
    runtime::logging::init();
    Runtime::builder(InMemoryStateRepo::new())
        .config(config)
        .tables(TablesSnapshot::new().with_currency(gold()))
        .build()
        .unwrap()
}

fn mint(recipients: Vec<(Address, u128)>) -> Transaction {
    Transaction::new(MINTER, MintAssetsAction::new("GOLD", recipients).to_plain())
}

fn transfer(from: Address, to: Address, amount: u128) -> Transaction {
    let action = TransferAssetAction {
        recipient: to,
        ticker: "GOLD".to_owned(),
        amount,
    };
    Transaction::new(from, action.to_plain())
}

#[test]
fn rejected_transaction_does_not_abort_block() {
    let runtime = runtime_with(RuntimeConfig::default());
    let block = runtime
        .propose(vec![
            mint(vec![(ALICE, 1_000)]),
            transfer(ALICE, BOB, 5_000),
            transfer(ALICE, BOB, 400),
        ])
        .unwrap();
    assert_eq!(block.index, 1);

    let outcome = runtime.apply_block(&block).unwrap();
    let statuses: Vec<bool> = outcome.receipts.iter().map(|r| r.is_applied()).collect();
    assert_eq!(statuses, vec![true, false, true]);

    let ReceiptStatus::Rejected(failure) = &outcome.receipts[1].status else {
        panic!("overdraft should be rejected");
    };
    assert_eq!(failure.kind, ErrorKind::InsufficientFunds);
    assert_eq!(outcome.receipts[1].gas_used, 0);
    assert!(outcome.receipts[2].gas_used > 0);

    let gold = gold();
    assert_eq!(outcome.state.balance(&ALICE, &gold).amount, 600);
    assert_eq!(outcome.state.balance(&BOB, &gold).amount, 400);
    assert_eq!(outcome.state_root, outcome.state.state_root());
}

#[test]
fn same_block_yields_same_root() {
    let config = RuntimeConfig::default().with_genesis_seed(42);
    let first = runtime_with(config.clone());
    let second = runtime_with(config);

    let transactions = vec![
        mint(vec![(ALICE, 10), (BOB, 20)]),
        Transaction::new(ALICE, CreateAvatarAction::new(0, "alice").to_plain()),
    ];
    let block = first.propose(transactions.clone()).unwrap();
    assert_eq!(second.propose(transactions).unwrap(), block);

    let a = first.apply_block(&block).unwrap();
    let b = second.apply_block(&block).unwrap();
    assert_eq!(a.state_root, b.state_root);
    assert_eq!(a.actions_root, b.actions_root);
    assert_eq!(a.receipts, b.receipts);
}

#[test]
fn action_seeds_differ_per_transaction() {
    let block = Block::new(3, 99)
        .with_transaction(mint(vec![(ALICE, 1)]))
        .with_transaction(mint(vec![(ALICE, 1)]));

    let first = BlockExecutor::action_seed(&block, 0, &MINTER);
    let second = BlockExecutor::action_seed(&block, 1, &MINTER);
    let other_signer = BlockExecutor::action_seed(&block, 0, &ALICE);
    assert_ne!(first, second);
    assert_ne!(first, other_signer);

    let runtime = runtime_with(RuntimeConfig::default());
    assert_ne!(runtime.block_seed(1), runtime.block_seed(2));
}

#[test]
fn oversized_block_is_refused() {
    let runtime = runtime_with(RuntimeConfig::default().with_max_actions_per_block(1));
    let block = runtime
        .propose(vec![mint(vec![(ALICE, 1)]), mint(vec![(BOB, 1)])])
        .unwrap();

    assert!(matches!(
        runtime.apply_block(&block),
        Err(RuntimeError::BlockTooLarge { count: 2, max: 1, .. })
    ));
    assert_eq!(runtime.tip().unwrap(), 0);
}

#[test]
fn blocks_apply_in_index_order() {
    let runtime = runtime_with(RuntimeConfig::default());
    let skipped = Block::new(2, runtime.block_seed(2)).with_transaction(mint(vec![(ALICE, 1)]));

    assert!(matches!(
        runtime.apply_block(&skipped),
        Err(RuntimeError::BlockOutOfOrder {
            expected: 1,
            found: 2
        })
    ));

    let first = runtime.propose(vec![mint(vec![(ALICE, 1)])]).unwrap();
    runtime.apply_block(&first).unwrap();
    assert!(matches!(
        runtime.apply_block(&first),
        Err(RuntimeError::BlockOutOfOrder {
            expected: 2,
            found: 1
        })
    ));
    runtime.apply_block(&skipped).unwrap();
    assert_eq!(runtime.tip().unwrap(), 2);
}

#[test]
fn snapshots_are_kept_per_block() {
    let genesis = WorldState::new();
    let runtime = runtime_with(RuntimeConfig::default());

    let block = runtime.propose(vec![mint(vec![(ALICE, 50)])]).unwrap();
    let outcome = runtime.apply_block(&block).unwrap();

    assert_eq!(runtime.repository().list_indices().unwrap(), vec![0, 1]);
    assert_eq!(runtime.state_at(0).unwrap(), genesis);
    assert_eq!(runtime.state_at(1).unwrap(), outcome.state);
    assert!(matches!(
        runtime.state_at(5),
        Err(RuntimeError::MissingState { block_index: 5 })
    ));
}

#[test]
fn transaction_gas_limit_overrides_default() {
    let runtime = runtime_with(
        RuntimeConfig::default()
            .with_game_config(GameConfig::default().with_mint_recipient_cost(5)),
    );
    let block = runtime
        .propose(vec![
            mint(vec![(ALICE, 1), (BOB, 1)]).with_gas_limit(3),
            mint(vec![(ALICE, 1), (BOB, 1)]),
        ])
        .unwrap();

    let outcome = runtime.apply_block(&block).unwrap();
    let ReceiptStatus::Rejected(failure) = &outcome.receipts[0].status else {
        panic!("low gas limit should reject");
    };
    assert_eq!(failure.kind, ErrorKind::CostExhausted);
    assert_eq!(
        outcome.receipts[1].status,
        ReceiptStatus::Applied(ActionResult::Minted { total: 2 })
    );
    assert_eq!(outcome.receipts[1].gas_used, 11);
}
