//! Recipient and device token resolution.

use homeroom_core::{Guardian, RecipientCriterion, dedup_tokens};
use homeroom_storage::{DeviceStore, DirectoryStore};

use crate::NotificationError;

/// Maps recipient criteria to guardians and guardians to device tokens.
#[derive(Debug)]
pub struct TokenResolver<'a, S> {
    store: &'a S,
}

impl<'a, S> TokenResolver<'a, S>
where
    S: DirectoryStore + DeviceStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Guardians addressed by `criterion`; empty means nobody to notify.
    pub fn guardians(
        &self,
        criterion: &RecipientCriterion,
    ) -> Result<Vec<Guardian>, NotificationError> {
        self.store
            .guardians_matching(criterion)
            .map_err(NotificationError::resolution)
    }

    /// Distinct, non-empty device tokens of the accounts behind `guardians`.
    ///
    /// Storage is not consulted when no guardian is linked to an account.
    pub fn tokens(&self, guardians: &[Guardian]) -> Result<Vec<String>, NotificationError> {
        let mut owner_ids: Vec<i32> = guardians.iter().filter_map(|g| g.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tokens = self
            .store
            .tokens_for_owners(&owner_ids)
            .map_err(NotificationError::resolution)?;

        Ok(dedup_tokens(tokens.into_iter().map(Some)))
    }
}
