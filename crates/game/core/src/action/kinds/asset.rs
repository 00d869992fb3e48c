//! Fungible asset actions.

use crate::action::payload::{Payload, PayloadCodec, PayloadError, Value, element};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::config::GameConfig;
use crate::env::SheetOracle;
use crate::state::{Currency, FungibleAssetValue, WorldState};

fn currency<'s>(sheets: &'s dyn SheetOracle, ticker: &str) -> Result<&'s Currency, ActionError> {
    sheets
        .currency(ticker)
        .ok_or_else(|| ActionError::UnknownCurrency {
            ticker: ticker.to_owned(),
        })
}

/// Amounts travel as decimal text so the full `u128` range is expressible.
fn positive_amount(field: &str, value: &Value) -> Result<u128, PayloadError> {
    let text = element::text(field, value)?;
    let amount: u128 = text
        .parse()
        .map_err(|_| PayloadError::out_of_range(field, format!("`{text}` is not an amount")))?;
    if amount == 0 {
        return Err(PayloadError::out_of_range(field, "amount must be positive"));
    }
    Ok(amount)
}

/// Moves `amount` of `ticker` from the signer to `recipient`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferAssetAction {
    pub recipient: Address,
    pub ticker: String,
    pub amount: u128,
}

impl PayloadCodec for TransferAssetAction {
    const TYPE_ID: &'static str = "transfer_asset";

    fn to_payload(&self) -> Payload {
        Payload::new()
            .with("recipient", self.recipient)
            .with("ticker", self.ticker.as_str())
            .with("amount", self.amount.to_string())
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let amount_value = payload
            .get("amount")
            .ok_or_else(|| PayloadError::MissingField {
                field: "amount".to_owned(),
            })?;
        Ok(Self {
            recipient: payload.address("recipient")?,
            ticker: payload.text("ticker")?.to_owned(),
            amount: positive_amount("amount", amount_value)?,
        })
    }
}

impl ActionTransition for TransferAssetAction {
    type Error = ActionError;
    type Result = ();

    fn pre_validate(&self, _state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        currency(ctx.env.sheets(), &self.ticker).map(drop)
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let currency = currency(ctx.env.sheets(), &self.ticker)?.clone();
        state.transfer(
            ctx.signer,
            self.recipient,
            &FungibleAssetValue::new(currency, self.amount),
        )?;
        Ok(())
    }

    fn post_validate(
        &self,
        before: &WorldState,
        after: &WorldState,
        ctx: &ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let currency = currency(ctx.env.sheets(), &self.ticker)?;
        let moved = if ctx.signer == self.recipient {
            0
        } else {
            self.amount
        };

        let sender_before = before.balance(&ctx.signer, currency).amount;
        let sender_after = after.balance(&ctx.signer, currency).amount;
        let conserved = before.total_supply(currency) == after.total_supply(currency)
            && before.circulating(currency) == after.circulating(currency)
            && sender_before.checked_sub(moved) == Some(sender_after);
        if !conserved {
            return Err(ActionError::ConservationViolated {
                ticker: self.ticker.clone(),
            });
        }
        Ok(())
    }
}

/// Mints `ticker` to each recipient. Only a minter of the currency may sign it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintAssetsAction {
    pub ticker: String,
    /// Sorted by recipient.
    recipients: Vec<(Address, u128)>,
}

impl MintAssetsAction {
    pub fn new(ticker: impl Into<String>, mut recipients: Vec<(Address, u128)>) -> Self {
        recipients.sort();
        Self {
            ticker: ticker.into(),
            recipients,
        }
    }

    pub fn recipients(&self) -> &[(Address, u128)] {
        &self.recipients
    }

    /// Sum of all amounts, saturating; a saturated total can never be minted.
    pub fn total(&self) -> u128 {
        self.recipients
            .iter()
            .fold(0u128, |total, (_, amount)| total.saturating_add(*amount))
    }
}

impl PayloadCodec for MintAssetsAction {
    const TYPE_ID: &'static str = "mint_assets";

    fn to_payload(&self) -> Payload {
        let recipients = self
            .recipients
            .iter()
            .map(|(address, amount)| {
                Value::List(vec![
                    Value::Address(*address),
                    Value::Text(amount.to_string()),
                ])
            })
            .collect::<Vec<_>>();
        Payload::new()
            .with("ticker", self.ticker.as_str())
            .with("recipients", recipients)
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let ticker = payload.text("ticker")?;
        let values = payload.list("recipients")?;
        if values.is_empty() {
            return Err(PayloadError::out_of_range("recipients", "no recipients"));
        }

        let mut recipients = Vec::with_capacity(values.len());
        for value in values {
            let (address, amount) = element::pair("recipients", value)?;
            recipients.push((
                element::address("recipients", address)?,
                positive_amount("recipients", amount)?,
            ));
        }
        Ok(Self::new(ticker, recipients))
    }
}

impl ActionTransition for MintAssetsAction {
    type Error = ActionError;
    type Result = u128;

    fn cost(&self, config: &GameConfig) -> u64 {
        config.base_action_cost + config.mint_recipient_cost * self.recipients.len() as u64
    }

    fn pre_validate(&self, _state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        currency(ctx.env.sheets(), &self.ticker).map(drop)
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let currency = currency(ctx.env.sheets(), &self.ticker)?.clone();
        for (recipient, amount) in &self.recipients {
            state.mint(
                ctx.signer,
                *recipient,
                &FungibleAssetValue::new(currency.clone(), *amount),
            )?;
        }
        Ok(self.total())
    }

    fn post_validate(
        &self,
        before: &WorldState,
        after: &WorldState,
        ctx: &ActionContext<'_>,
    ) -> Result<(), Self::Error> {
        let currency = currency(ctx.env.sheets(), &self.ticker)?;
        let expected = before.total_supply(currency).checked_add(self.total());
        if expected != Some(after.total_supply(currency))
            || after.circulating(currency) != after.total_supply(currency)
        {
            return Err(ActionError::ConservationViolated {
                ticker: self.ticker.clone(),
            });
        }
        Ok(())
    }
}
