//! Template rendering adapters.

mod compat;
mod tera;

pub use self::tera::TeraRenderer;
