pub mod dispatcher;
pub mod telegram;

pub use dispatcher::*;
pub use telegram::*;
