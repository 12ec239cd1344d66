pub mod error;
pub mod format;
pub mod interactive;
pub mod output;

pub use error::{AppError, AppResult};
pub use interactive::*;
pub use output::{print_success, OutputStyle};
