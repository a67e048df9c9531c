//! Word lookup for Carnet
//!
//! This module provides:
//! - Dictionary and speech collaborator traits
//! - An offline glossary dictionary read from CSV
//! - The lookup flow that checks the notebook before the dictionary

pub mod flow;
pub mod models;
pub mod provider;

pub use flow::look_up;
pub use models::*;
pub use provider::{
    resolve, speak, Dictionary, Glossary, LookupError, NoDictionary, Silent, Speech,
};
