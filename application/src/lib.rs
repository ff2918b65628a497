pub mod ledger;
pub mod service;
pub mod transfer;
