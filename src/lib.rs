pub mod config;
pub mod controller;
pub mod domain;
pub mod http;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
