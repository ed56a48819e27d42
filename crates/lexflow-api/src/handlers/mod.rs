pub mod clio_matters;
pub mod login;
pub mod workflows;
