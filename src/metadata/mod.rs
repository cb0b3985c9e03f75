pub mod decoder;
pub mod tags;
pub mod tagset;
