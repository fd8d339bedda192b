pub mod account_store;
pub mod document_store;
