//! Generic parameterisation: canonical instances of generic types and functions.
//!
//! A parameterised instance is identified by its [`ParameterizedKey`] (base
//! identity plus ordered argument identities). The table keeps at most one
//! instance per key along a scope chain, so later phases can compare the
//! resulting types by identity.

mod cache;
mod resolver;


pub use cache::InstanceCache;
pub use resolver::{ParameterizedTypeResolver, TypeExpr};

pub use crate::symbols::ParameterizedKey;
