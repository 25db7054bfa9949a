pub mod describe;
pub mod run;
pub mod test_credentials;
