pub mod errors;
pub mod db;
pub mod video;
pub mod task;
pub mod cafe;

#[cfg(test)]
mod tests;
