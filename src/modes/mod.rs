pub mod hello;
pub mod scanner;
pub mod snake;
mod terminal;

pub use hello::HelloMode;
pub use scanner::{Scanner, ScannerMode};
pub use snake::SnakeMode;
