//! AI rewrite pipeline: extraction → validation → persistence.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod validate;
