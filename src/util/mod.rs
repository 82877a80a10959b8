//! Utility functions shared by the scheduler and its tests.

pub mod time;
