pub mod dialog;
pub mod transactions;
