pub mod cache;
pub mod expand;
pub mod filter;
pub mod freq;
pub mod scorer;
pub mod settings;
pub mod translit;
pub mod unicode;
pub mod variants;
