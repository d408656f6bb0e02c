#[cfg(test)]
pub mod fake;
pub mod http_server;
pub mod https;
