//! Domain types for seqlab

pub mod bar;
pub mod label;

pub use bar::Bar;
pub use label::Label;
