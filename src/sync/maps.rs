//! Location sharing recipes

use super::{App, LocationView};
use crate::concepts::{Outcome, Session};
use crate::utils::errors::Result;

impl App {
    pub async fn opt_in_location(&self, session: &Session, city: &str, state: &str) -> Result<Outcome<LocationView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let created = self.concepts.mapping.opt_in(user, city, state).await?;
        Ok(Outcome::new(created.msg, self.responses.location(created.value).await?))
    }

    pub async fn get_location(&self, session: &Session) -> Result<LocationView> {
        let user = self.concepts.sessioning.get_user(session)?;
        let location = self.concepts.mapping.get_location(user).await?;
        self.responses.location(location).await
    }

    pub async fn update_location(&self, session: &Session, city: &str, state: &str) -> Result<Outcome<LocationView>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let updated = self.concepts.mapping.update_location(user, city, state).await?;
        Ok(Outcome::new(updated.msg, self.responses.location(updated.value).await?))
    }

    pub async fn opt_out_location(&self, session: &Session) -> Result<Outcome<()>> {
        let user = self.concepts.sessioning.get_user(session)?;
        self.concepts.mapping.opt_out(user).await
    }

    /// Usernames of other users opted in at the given place. Without a place
    /// the session user's own opted-in location is used.
    pub async fn find_nearby(&self, session: &Session, place: Option<(&str, &str)>) -> Result<Vec<String>> {
        let user = self.concepts.sessioning.get_user(session)?;
        let nearby = match place {
            Some((city, state)) => self.concepts.mapping.find_nearby(city, state).await?,
            None => {
                let own = self.concepts.mapping.get_location(user).await?;
                self.concepts
                    .mapping
                    .find_nearby(&own.body.city, &own.body.state)
                    .await?
            }
        };

        let others: Vec<_> = nearby.into_iter().filter(|id| *id != user).collect();
        self.responses.usernames(&others).await
    }
}
