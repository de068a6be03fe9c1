//! A deterministic football match-analysis engine. Converts historical statistics
//! for a pairing — recent results, head-to-head meetings, squad availability,
//! scoring leaders, standings and bookmaker odds — into per-team form metrics,
//! absence impacts and a ranked set of market recommendations with bounded
//! confidence scores and reproducible reasoning.

pub mod availability;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod form;
pub mod h2h;
pub mod print;
pub mod recency;
pub mod recommend;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
