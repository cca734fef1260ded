//! Kinship - Personality matching service
//!
//! Users play through a short narrative whose choices shape a Big Five trait
//! profile, then check in at places to be matched with the most compatible
//! person there.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
