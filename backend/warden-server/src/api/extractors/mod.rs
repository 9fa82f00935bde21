pub mod authenticated;
pub mod client_info;
