pub mod api;
pub mod config;
pub mod sync;
pub mod ui;
pub mod utils;

#[cfg(test)]
mod test_utils;
