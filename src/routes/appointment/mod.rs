mod add;
mod delete;
mod get;
mod status;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use status::*;
