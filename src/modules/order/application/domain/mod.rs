pub mod checkout;
pub mod entities;
pub mod stats;
pub mod transitions;
