//! A statistical football score predictor. Historical results are distilled into
//! rolling-form features, a pair of independently fitted regressors estimates the
//! expected goals of either side, and a Monte Carlo sampler converts the
//! continuous estimates into a discrete scoreline.

pub mod csv;
pub mod data;
pub mod domain;
pub mod fixtures;
pub mod form;
pub mod linear;
pub mod matchweek;
pub mod model;
pub mod poisson;
pub mod print;
pub mod sim;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
