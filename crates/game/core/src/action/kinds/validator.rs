//! Validator set updates.
//!
//! The host reports the full current validator set once per block as a system
//! action. Activation changes are derived only by diffing that report against
//! the previously stored set:
//!
//! - present now, absent before: `Inactive -> Active`
//! - absent now, present before: `Active -> Inactive`
//! - present in both: power refreshed, status untouched
//!
//! A transition that finds the delegatee already in the target state means the
//! stored records disagree with the stored set, which is an internal
//! inconsistency rather than a user error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::action::payload::{Payload, PayloadCodec, PayloadError, Value, element};
use crate::action::{ActionContext, ActionError, ActionTransition};
use crate::address::Address;
use crate::repository::ValidatorRepository;
use crate::state::{Validator, ValidatorDelegatee, ValidatorSet, WorldState};

/// Powers travel as decimal text so the full `u64` range is expressible.
fn power(field: &str, value: &Value) -> Result<u64, PayloadError> {
    let text = element::text(field, value)?;
    text.parse()
        .map_err(|_| PayloadError::out_of_range(field, format!("`{text}` is not a power")))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateValidatorsAction {
    set: ValidatorSet,
}

impl UpdateValidatorsAction {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            set: ValidatorSet::new(validators),
        }
    }

    pub fn validators(&self) -> &[Validator] {
        &self.set.validators
    }
}

/// Activation changes applied by one update, each sorted by address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetChange {
    pub activated: Vec<Address>,
    pub deactivated: Vec<Address>,
}

impl PayloadCodec for UpdateValidatorsAction {
    const TYPE_ID: &'static str = "update_validators";

    fn to_payload(&self) -> Payload {
        let validators = self
            .set
            .validators
            .iter()
            .map(|validator| {
                Value::List(vec![
                    Value::Address(validator.address),
                    Value::Text(validator.power.to_string()),
                ])
            })
            .collect::<Vec<_>>();
        Payload::new().with("validators", validators)
    }

    fn from_payload(payload: &Payload) -> Result<Self, PayloadError> {
        let values = payload.list("validators")?;
        let mut seen = BTreeSet::new();
        let mut validators = Vec::with_capacity(values.len());
        for value in values {
            let (address, amount) = element::pair("validators", value)?;
            let address = element::address("validators", address)?;
            if !seen.insert(address) {
                return Err(PayloadError::out_of_range(
                    "validators",
                    format!("{address} listed twice"),
                ));
            }
            validators.push(Validator::new(address, power("validators", amount)?));
        }
        Ok(Self::new(validators))
    }
}

impl ActionTransition for UpdateValidatorsAction {
    type Error = ActionError;
    type Result = ValidatorSetChange;

    fn pre_validate(&self, _state: &WorldState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        if ctx.signer != Address::SYSTEM {
            return Err(ActionError::SystemOnly { signer: ctx.signer });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut WorldState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let mut repository = ValidatorRepository::new(state);
        let previous = repository.validator_set()?.addresses();
        let current = self.set.addresses();
        let mut change = ValidatorSetChange::default();

        for validator in &self.set.validators {
            let mut delegatee = repository
                .delegatee(&validator.address)?
                .unwrap_or_else(|| ValidatorDelegatee::new(validator.address));

            if previous.contains(&validator.address) {
                delegatee.power = validator.power;
            } else {
                if !delegatee.activate(validator.power, ctx.block_index) {
                    return Err(ActionError::ActivationOutOfOrder {
                        validator: validator.address,
                    });
                }
                change.activated.push(validator.address);
            }
            repository.set_delegatee(&delegatee)?;
        }

        for removed in previous.difference(&current) {
            let mut delegatee =
                repository
                    .delegatee(removed)?
                    .ok_or(ActionError::ActivationOutOfOrder {
                        validator: *removed,
                    })?;
            if !delegatee.deactivate(ctx.block_index) {
                return Err(ActionError::ActivationOutOfOrder {
                    validator: *removed,
                });
            }
            repository.set_delegatee(&delegatee)?;
            change.deactivated.push(*removed);
        }

        repository.set_validator_set(&self.set)?;
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_canonicalizes_and_rejects_duplicates() {
        let a = Address::new([2; 20]);
        let b = Address::new([1; 20]);
        let entry = |address: Address, power: &str| {
            Value::List(vec![Value::Address(address), Value::Text(power.to_owned())])
        };

        let payload = Payload::new().with("validators", vec![entry(a, "5"), entry(b, "7")]);
        let action = UpdateValidatorsAction::from_payload(&payload).unwrap();
        assert_eq!(action.validators()[0], Validator::new(b, 7));

        let duplicated = Payload::new().with("validators", vec![entry(a, "5"), entry(a, "6")]);
        assert!(UpdateValidatorsAction::from_payload(&duplicated).is_err());

        let negative = Payload::new().with("validators", vec![entry(a, "-1")]);
        assert!(UpdateValidatorsAction::from_payload(&negative).is_err());

        let integer = Payload::new().with(
            "validators",
            vec![Value::List(vec![Value::Address(a), Value::Integer(5)])],
        );
        assert!(UpdateValidatorsAction::from_payload(&integer).is_err());
    }

    #[test]
    fn full_power_range_survives_encoding() {
        let action = UpdateValidatorsAction::new(vec![
            Validator::new(Address::new([1; 20]), u64::MAX),
            Validator::new(Address::new([2; 20]), 0),
        ]);
        let decoded = UpdateValidatorsAction::from_payload(&action.to_payload()).unwrap();
        assert_eq!(decoded, action);
        assert_eq!(decoded.validators()[0].power, u64::MAX);
    }
}
