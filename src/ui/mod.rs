pub mod theme;

pub use theme::{paint, ColorClass};
