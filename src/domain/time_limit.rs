//! Episode length limit on top of an episode.

use super::{Episode, EpisodeError, Observation, Step, WorldBuilder};

/// Episode length of the registered arenas.
pub const DEFAULT_MAX_EPISODE_STEPS: u32 = 200;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LimitedStep {
    pub step: Step,
    /// The step limit was reached. Independent of `step.terminal`.
    pub truncated: bool,
}

/// Reports truncation once a number of steps has passed since the last reset. The wrapped
/// episode is unaware of the limit and keeps accepting steps after truncation.
pub struct TimeLimit<B: WorldBuilder> {
    episode: Episode<B>,
    max_episode_steps: u32,
    elapsed_steps: u32,
}

impl<B: WorldBuilder> TimeLimit<B> {
    pub fn new(episode: Episode<B>, max_episode_steps: u32) -> Self {
        Self {
            episode,
            max_episode_steps,
            elapsed_steps: 0,
        }
    }

    pub fn episode(&self) -> &Episode<B> {
        &self.episode
    }

    pub fn max_episode_steps(&self) -> u32 {
        self.max_episode_steps
    }

    pub fn elapsed_steps(&self) -> u32 {
        self.elapsed_steps
    }

    pub fn reset(&mut self) -> Observation {
        self.elapsed_steps = 0;
        self.episode.reset()
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> Observation {
        self.elapsed_steps = 0;
        self.episode.reset_with_seed(seed)
    }

    pub fn step(&mut self, action: &[f64]) -> Result<LimitedStep, EpisodeError> {
        let step = self.episode.step(action)?;
        self.elapsed_steps += 1;
        Ok(LimitedStep {
            step,
            truncated: self.elapsed_steps >= self.max_episode_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        domain::{DiscreteAction, EpisodeConfig, Pose, Position, Scenario},
        tests::arena,
    };

    #[test]
    fn test_truncates_after_limit() {
        let episode = Episode::new(Scenario::Empty, EpisodeConfig::default()).unwrap();
        let mut limited = TimeLimit::new(episode, 3);
        limited.reset();
        let turn = DiscreteAction::Left.one_hot();

        let truncated = (0..4)
            .map(|_| limited.step(&turn).unwrap().truncated)
            .collect::<Vec<_>>();
        assert_eq!(truncated, [false, false, true, true]);

        limited.reset();
        assert_eq!(limited.elapsed_steps(), 0);
        assert!(!limited.step(&turn).unwrap().truncated);
    }

    #[test]
    fn test_truncation_keeps_terminal() {
        let start = Pose::new(Position::new(450.0, 550.0), 0.0);
        let builder = arena(start, Position::new(550.0, 550.0), vec![]);
        let episode = Episode::new(builder, EpisodeConfig::default()).unwrap();
        let mut limited = TimeLimit::new(episode, 1);
        limited.reset();

        let limited_step = limited.step(&DiscreteAction::Forward.one_hot()).unwrap();
        assert!(limited_step.truncated);
        assert!(limited_step.step.terminal);
        assert_eq!(limited_step.step.reward, 1.0 - 0.9 * (1.0 / 500.0));
    }

    #[test]
    fn test_rejected_step_does_not_count() {
        let episode = Episode::new(Scenario::Empty, EpisodeConfig::default()).unwrap();
        let mut limited = TimeLimit::new(episode, DEFAULT_MAX_EPISODE_STEPS);
        limited.reset_with_seed(5);

        assert!(limited.step(&[1.0]).is_err());
        assert_eq!(limited.elapsed_steps(), 0);
        assert_eq!(limited.episode().step_count(), 0);
        assert_eq!(limited.max_episode_steps(), 200);
    }
}
