//! Mapping concept
//!
//! Users opt in to sharing a city and state; nearby users are those sharing
//! both, compared case-insensitively.

use serde_json::Map;

use super::Outcome;
use crate::database::{DocCollection, Document, Filter, ReadOptions};
use crate::models::{Location, UserId};
use crate::utils::errors::{KinshipError, Result};
use crate::utils::helpers::{normalize_name, same_place};

#[derive(Debug, Clone)]
pub struct MappingConcept {
    locations: DocCollection<Location>,
}

fn place(city: &str, state: &str) -> Result<(String, String)> {
    let (city, state) = (normalize_name(city), normalize_name(state));
    if city.is_empty() || state.is_empty() {
        return Err(KinshipError::InvalidInput("City and state are required".to_string()));
    }
    Ok((city, state))
}

impl MappingConcept {
    pub fn new(locations: DocCollection<Location>) -> Self {
        Self { locations }
    }

    pub async fn opt_in(&self, user: UserId, city: &str, state: &str) -> Result<Outcome<Document<Location>>> {
        let (city, state) = place(city, state)?;
        let location = self
            .locations
            .create_one_unless(&Filter::field("user", user), &Location { user, city, state })
            .await?
            .ok_or_else(|| KinshipError::AlreadyExists(format!("Location for user {}", user)))?;
        Ok(Outcome::new("Opted in to location sharing!", location))
    }

    pub async fn get_location(&self, user: UserId) -> Result<Document<Location>> {
        self.locations
            .read_one(&Filter::field("user", user))
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Location for user {}", user)))
    }

    pub async fn update_location(&self, user: UserId, city: &str, state: &str) -> Result<Outcome<Document<Location>>> {
        let (city, state) = place(city, state)?;
        let mut patch = Map::new();
        patch.insert("city".to_string(), city.into());
        patch.insert("state".to_string(), state.into());

        let location = self
            .locations
            .partial_update_one(&Filter::field("user", user), patch)
            .await?
            .ok_or_else(|| KinshipError::NotFound(format!("Location for user {}", user)))?;
        Ok(Outcome::new("Location updated!", location))
    }

    pub async fn opt_out(&self, user: UserId) -> Result<Outcome<()>> {
        if !self.locations.delete_one(&Filter::field("user", user)).await? {
            return Err(KinshipError::NotFound(format!("Location for user {}", user)));
        }
        Ok(Outcome::new("Opted out of location sharing!", ()))
    }

    /// Users opted in at the given place
    pub async fn find_nearby(&self, city: &str, state: &str) -> Result<Vec<UserId>> {
        let (city, state) = place(city, state)?;
        let locations = self
            .locations
            .read_many(&Filter::all(), &ReadOptions::default())
            .await?;
        Ok(locations
            .into_iter()
            .filter(|loc| same_place(&loc.body.city, &city) && same_place(&loc.body.state, &state))
            .map(|loc| loc.body.user)
            .collect())
    }
}
