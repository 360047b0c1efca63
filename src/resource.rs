//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use ratbox::domain;

#[derive(Resource)]
pub struct EpisodeRes(domain::Episode<domain::Scenario>);

impl Deref for EpisodeRes {
    type Target = domain::Episode<domain::Scenario>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for EpisodeRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::Episode<domain::Scenario>> for EpisodeRes {
    fn from(value: domain::Episode<domain::Scenario>) -> Self {
        Self(value)
    }
}

/// Action requested by the controller, consumed by the next simulation step.
#[derive(Resource, Default)]
pub struct ActionRes(Option<Vec<f64>>);

impl Deref for ActionRes {
    type Target = Option<Vec<f64>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ActionRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Outcome of the most recent step since the last reset.
#[derive(Resource, Default)]
pub struct LastStepRes(Option<domain::Step>);

impl Deref for LastStepRes {
    type Target = Option<domain::Step>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for LastStepRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
