//! Email transport infrastructure

pub mod smtp;
