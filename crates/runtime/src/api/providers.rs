//! Asynchronous abstraction for sourcing narrative content.
//!
//! Runtime users plug in a [`ContentProvider`] (an LLM bridge, a scripted
//! campaign, a test fixture); [`FallbackContent`] wraps it so every failed
//! call degrades to the deterministic built-ins from saga-content instead
//! of stalling the session.

use async_trait::async_trait;

use saga_core::engine::{ExplorePayload, ScenePayload};
use saga_core::state::{Enemy, GameAction, Location, Player, SocialEncounter};

use super::errors::{Result, SessionError};

/// Trait for generating narrative content from the current game situation.
///
/// Every method may fail; the session core never observes those failures
/// because [`FallbackContent`] substitutes a deterministic payload.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Scene text and local actions for a location.
    async fn scene(&self, player: &Player, location: &Location) -> Result<ScenePayload>;

    /// Enemies for a fresh encounter.
    async fn encounter(&self, player: &Player) -> Result<Vec<Enemy>>;

    /// A social encounter with choices.
    async fn social(&self, player: &Player) -> Result<SocialEncounter>;

    /// The outcome of poking around.
    async fn explore(&self, player: &Player, action: &GameAction) -> Result<ExplorePayload>;
}

/// A provider that always fails. Useful in tests and for running fully
/// offline: every call lands on the built-in content.
pub struct OfflineContent;

#[async_trait]
impl ContentProvider for OfflineContent {
    async fn scene(&self, _player: &Player, _location: &Location) -> Result<ScenePayload> {
        Err(SessionError::Content("offline".into()))
    }

    async fn encounter(&self, _player: &Player) -> Result<Vec<Enemy>> {
        Err(SessionError::Content("offline".into()))
    }

    async fn social(&self, _player: &Player) -> Result<SocialEncounter> {
        Err(SessionError::Content("offline".into()))
    }

    async fn explore(&self, _player: &Player, _action: &GameAction) -> Result<ExplorePayload> {
        Err(SessionError::Content("offline".into()))
    }
}

/// Wraps a provider with the deterministic fallbacks.
///
/// Each call returns `(payload, degraded)`: `degraded` is set only when an
/// actual generator failed and its result was substituted. A session built
/// without a provider plays entirely from the built-ins and is not
/// considered degraded.
pub struct FallbackContent {
    inner: Option<Box<dyn ContentProvider>>,
}

impl FallbackContent {
    pub fn new(inner: Box<dyn ContentProvider>) -> Self {
        Self { inner: Some(inner) }
    }

    /// Built-ins only; no generator.
    pub fn builtin() -> Self {
        Self { inner: None }
    }

    pub async fn scene(&self, player: &Player, location: &Location) -> (ScenePayload, bool) {
        match &self.inner {
            None => (saga_content::fallback::scene(location), false),
            Some(provider) => match provider.scene(player, location).await {
                Ok(payload) => (payload, false),
                Err(error) => {
                    tracing::warn!(%error, "scene generation failed, using fallback");
                    (saga_content::fallback::scene(location), true)
                }
            },
        }
    }

    pub async fn encounter(&self, player: &Player) -> (Vec<Enemy>, bool) {
        match &self.inner {
            None => (saga_content::fallback::encounter(), false),
            Some(provider) => match provider.encounter(player).await {
                Ok(enemies) if !enemies.is_empty() => (enemies, false),
                Ok(_) => {
                    tracing::warn!("generator returned an empty encounter, using fallback");
                    (saga_content::fallback::encounter(), true)
                }
                Err(error) => {
                    tracing::warn!(%error, "encounter generation failed, using fallback");
                    (saga_content::fallback::encounter(), true)
                }
            },
        }
    }

    pub async fn social(&self, player: &Player) -> (SocialEncounter, bool) {
        match &self.inner {
            None => (saga_content::fallback::social(), false),
            Some(provider) => match provider.social(player).await {
                Ok(encounter) => (encounter, false),
                Err(error) => {
                    tracing::warn!(%error, "social generation failed, using fallback");
                    (saga_content::fallback::social(), true)
                }
            },
        }
    }

    pub async fn explore(&self, player: &Player, action: &GameAction) -> (ExplorePayload, bool) {
        match &self.inner {
            None => (saga_content::fallback::explore(action), false),
            Some(provider) => match provider.explore(player, action).await {
                Ok(payload) => (payload, false),
                Err(error) => {
                    tracing::warn!(%error, "explore generation failed, using fallback");
                    (saga_content::fallback::explore(action), true)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saga_core::state::{ClassKind, World};

    #[tokio::test]
    async fn failed_generator_degrades_to_fallback() {
        let content = FallbackContent::new(Box::new(OfflineContent));
        let player = Player::create("Brakka", ClassKind::Warrior);
        let mut world = World::new();
        let id = world.add_location("Crossroads", "Paths meet.");

        let (payload, degraded) = content.scene(&player, world.location(id).unwrap()).await;
        assert!(degraded);
        assert!(!payload.actions.is_empty());

        let (enemies, degraded) = content.encounter(&player).await;
        assert!(degraded);
        assert_eq!(enemies.len(), 1);
    }

    #[tokio::test]
    async fn builtin_content_is_not_degraded() {
        let content = FallbackContent::builtin();
        let player = Player::create("Brakka", ClassKind::Warrior);

        let (_, degraded) = content.social(&player).await;
        assert!(!degraded);
    }
}
