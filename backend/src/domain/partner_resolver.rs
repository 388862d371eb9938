//! Caller and partner lookup.
//!
//! The partner link is read from the querying user's own row only. Reverse
//! links are never searched; a link pointing at a missing user is treated as
//! no partner.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{StatsError, StatsResult};
use crate::domain::models::User;
use crate::storage::{Connection, UserStorage};

#[derive(Clone)]
pub struct PartnerResolver<C: Connection> {
    user_repository: C::UserRepository,
}

impl<C: Connection> PartnerResolver<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
        }
    }

    /// Load the calling user; an unknown or blank identity is unauthorized
    pub async fn authenticate(&self, caller_id: &str) -> StatsResult<User> {
        let caller_id = caller_id.trim();
        if caller_id.is_empty() {
            return Err(StatsError::Unauthorized);
        }

        match self.user_repository.get_user(caller_id).await? {
            Some(user) => Ok(user),
            None => {
                warn!("Rejecting request from unknown user {}", caller_id);
                Err(StatsError::Unauthorized)
            }
        }
    }

    /// Partner of an already-loaded user, if the stored link resolves
    pub async fn partner_of(&self, user: &User) -> StatsResult<Option<User>> {
        let Some(partner_id) = user.partner_id.as_deref() else {
            return Ok(None);
        };

        if partner_id == user.id {
            warn!("User {} is linked to itself; ignoring link", user.id);
            return Ok(None);
        }

        match self.user_repository.get_user(partner_id).await? {
            Some(partner) => Ok(Some(partner)),
            None => {
                warn!(
                    "User {} is linked to missing partner {}; treating as unlinked",
                    user.id, partner_id
                );
                Ok(None)
            }
        }
    }

    /// Partner identifier for `user_id`, or `None` when unlinked
    pub async fn resolve_partner(&self, user_id: &str) -> StatsResult<Option<String>> {
        let user = self
            .user_repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| StatsError::OwnerNotFound(user_id.to_string()))?;

        let partner = self.partner_of(&user).await?;
        info!(
            "Resolved partner for {}: {}",
            user_id,
            partner.as_ref().map(|p| p.id.as_str()).unwrap_or("none")
        );
        Ok(partner.map(|p| p.id))
    }
}
