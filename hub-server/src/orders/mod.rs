//! Order lifecycle engine
//!
//! - [`identity`] - code/role/status normalization, legacy token migration
//! - [`chain`] - service approval chains and stage advancement
//! - [`policy`] - who may do what, and where each action leads
//! - [`metadata`] - the JSON facet bag on every order row
//! - [`projector`] - per-viewer read model (status, stages, actions)
//! - [`store`] - transactional workflows over the repositories
//! - [`service`] - the facade the API layer calls

pub mod chain;
pub mod identity;
pub mod metadata;
pub mod policy;
pub mod projector;
pub mod service;
pub mod store;
