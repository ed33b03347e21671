pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;
