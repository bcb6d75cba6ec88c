pub mod entities;
pub mod signature;
