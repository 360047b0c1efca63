//! A 2D arena in which a single agent steers towards a goal around static obstacles, stepped one
//! action at a time for reinforcement learning.

pub mod domain;
