pub mod client;
pub mod memory;
pub mod s3;
