//! Domain layer containing business entities.

pub mod entities;
