pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{SourceRow, Submission};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RowSource, Storage};
pub use crate::utils::error::Result;
