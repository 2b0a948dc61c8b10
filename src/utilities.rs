pub mod api_utils;
pub mod config;
pub mod display;
pub mod logchamp;
pub mod text_utils;
pub mod variant;

#[cfg(test)]
pub mod test_fixtures;
