pub mod config;
pub mod oembed;

#[cfg(test)]
mod tests;
