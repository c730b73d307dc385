pub mod echo;
pub mod sequence;
pub mod status;
