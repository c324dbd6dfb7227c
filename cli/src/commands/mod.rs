pub mod cli;
pub mod http_server;
pub mod tasks;
