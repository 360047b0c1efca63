//! Episode configuration.
//!
//! A configuration is validated once when an episode is created and is immutable afterwards, so
//! that it can be shared between episodes.

use thiserror::Error;

use super::SteeringVariant;

/// Smallest allowed arena width and height.
pub const MIN_ARENA_EXTENT: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("unknown steering model '{name}', expected one of: {valid}")]
    UnknownSteering { name: String, valid: String },
    #[error("arena {axis} of {value} is below the minimum of {min}", min = MIN_ARENA_EXTENT)]
    ArenaTooSmall { axis: &'static str, value: f64 },
    #[error("turn count must be at least 1")]
    InvalidTurnCount,
    #[error("maximum number of steps must be at least 1")]
    InvalidMaxSteps,
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Source of the agent's initial position or heading on reset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StartMode {
    /// Taken from the world layout.
    #[default]
    Layout,
    /// Drawn from the episode's random source.
    Random,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeConfig {
    pub world_width: f64,
    pub world_height: f64,
    pub max_steps: u32,
    pub max_reward: f64,
    pub collision_penalty: f64,
    pub steering: SteeringVariant,
    /// Discrete rotations per full circle.
    pub turn_count: u32,
    pub speed: f64,
    pub dt: f64,
    pub agent_radius: f64,
    pub start_position: StartMode,
    pub start_heading: StartMode,
    pub seed: u64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            world_width: 600.0,
            world_height: 600.0,
            max_steps: 500,
            max_reward: 1.0,
            collision_penalty: 0.01,
            steering: SteeringVariant::Discrete,
            turn_count: 4,
            speed: 100.0,
            dt: 1.0,
            agent_radius: 15.0,
            start_position: StartMode::Layout,
            start_heading: StartMode::Layout,
            seed: 0,
        }
    }
}

impl EpisodeConfig {
    pub fn with_world_size(self, world_width: f64, world_height: f64) -> Self {
        Self {
            world_width,
            world_height,
            ..self
        }
    }

    pub fn with_max_steps(self, max_steps: u32) -> Self {
        Self { max_steps, ..self }
    }

    pub fn with_max_reward(self, max_reward: f64) -> Self {
        Self { max_reward, ..self }
    }

    pub fn with_collision_penalty(self, collision_penalty: f64) -> Self {
        Self {
            collision_penalty,
            ..self
        }
    }

    pub fn with_steering(self, steering: SteeringVariant) -> Self {
        Self { steering, ..self }
    }

    pub fn with_steering_name(self, name: &str) -> Result<Self, ConfigurationError> {
        Ok(self.with_steering(name.parse()?))
    }

    pub fn with_turn_count(self, turn_count: u32) -> Self {
        Self { turn_count, ..self }
    }

    pub fn with_speed(self, speed: f64) -> Self {
        Self { speed, ..self }
    }

    pub fn with_dt(self, dt: f64) -> Self {
        Self { dt, ..self }
    }

    pub fn with_agent_radius(self, agent_radius: f64) -> Self {
        Self {
            agent_radius,
            ..self
        }
    }

    pub fn with_start(self, start_position: StartMode, start_heading: StartMode) -> Self {
        Self {
            start_position,
            start_heading,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Degrees turned by one discrete turn.
    pub fn turn_increment(&self) -> f64 {
        360.0 / self.turn_count as f64
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (axis, value) in [("width", self.world_width), ("height", self.world_height)] {
            if !(value >= MIN_ARENA_EXTENT) {
                return Err(ConfigurationError::ArenaTooSmall { axis, value });
            }
        }
        if self.turn_count == 0 {
            return Err(ConfigurationError::InvalidTurnCount);
        }
        if self.max_steps == 0 {
            return Err(ConfigurationError::InvalidMaxSteps);
        }
        for (field, value) in [
            ("speed", self.speed),
            ("dt", self.dt),
            ("agent radius", self.agent_radius),
        ] {
            if !(value > 0.0) {
                return Err(ConfigurationError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EpisodeConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.turn_increment(), 90.0);
    }

    #[rstest]
    #[case::narrow(
        EpisodeConfig::default().with_world_size(99.0, 600.0),
        ConfigurationError::ArenaTooSmall { axis: "width", value: 99.0 }
    )]
    #[case::flat(
        EpisodeConfig::default().with_world_size(600.0, 50.0),
        ConfigurationError::ArenaTooSmall { axis: "height", value: 50.0 }
    )]
    #[case::no_turns(EpisodeConfig::default().with_turn_count(0), ConfigurationError::InvalidTurnCount)]
    #[case::no_steps(EpisodeConfig::default().with_max_steps(0), ConfigurationError::InvalidMaxSteps)]
    #[case::standing(
        EpisodeConfig::default().with_speed(0.0),
        ConfigurationError::NonPositive { field: "speed", value: 0.0 }
    )]
    #[case::frozen_time(
        EpisodeConfig::default().with_dt(-1.0),
        ConfigurationError::NonPositive { field: "dt", value: -1.0 }
    )]
    fn test_validate(#[case] config: EpisodeConfig, #[case] error: ConfigurationError) {
        assert_eq!(config.validate(), Err(error));
    }

    #[test]
    fn test_minimal_arena_is_valid() {
        let config = EpisodeConfig::default().with_world_size(100.0, 100.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_with_steering_name() {
        let config = EpisodeConfig::default().with_steering_name("skidsteer").unwrap();
        assert_eq!(config.steering, SteeringVariant::SkidSteer);

        let error = EpisodeConfig::default().with_steering_name("hover").unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::UnknownSteering { ref name, .. } if name == "hover"
        ));
    }

    #[test]
    fn test_error_messages() {
        insta::assert_snapshot!(
            ConfigurationError::ArenaTooSmall { axis: "width", value: 80.0 }.to_string(),
            @"arena width of 80 is below the minimum of 100"
        );
        insta::assert_snapshot!(
            ConfigurationError::NonPositive { field: "speed", value: -2.5 }.to_string(),
            @"speed must be positive, got -2.5"
        );
    }

    #[test]
    fn test_arena_error_names_minimum() {
        let error = ConfigurationError::ArenaTooSmall { axis: "height", value: 99.5 };
        assert!(error.to_string().ends_with(&format!("minimum of {MIN_ARENA_EXTENT}")));
    }

    #[rstest]
    #[case(8, 45.0)]
    #[case(3, 120.0)]
    #[case(1, 360.0)]
    fn test_turn_increment(#[case] turn_count: u32, #[case] increment: f64) {
        let config = EpisodeConfig::default().with_turn_count(turn_count);
        assert_eq!(config.turn_increment(), increment);
    }
}
