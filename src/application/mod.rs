pub mod menu;

pub use menu::{MenuChoice, MenuSession};
