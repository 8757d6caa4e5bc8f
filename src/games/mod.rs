//! Game implementations built on the engine.
//!
//! - `regicide`: cooperative boss fight against the castle deck

pub mod regicide;
