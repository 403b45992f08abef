pub mod generic;
pub mod gs;
pub mod http;
pub mod s3;
