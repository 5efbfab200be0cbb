//! Service layer for the site customize form.
//! - Narrow store capabilities (`assets`, `settings`, `cache`) and their implementations.
//! - The form handler in `customize` and the read side in `content`.

pub mod errors;
pub mod storage;
pub mod settings;
pub mod assets;
pub mod cache;
pub mod content;
pub mod customize;
#[cfg(test)]
pub mod test_support;
