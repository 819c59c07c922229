pub mod model;
pub mod schema;

pub use model::{Homework, HomeworkKey, HomeworkStatus, StatusPayload};
pub use schema::validate;
