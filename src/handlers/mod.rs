pub mod export;
pub mod orders;
