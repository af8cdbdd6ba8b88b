pub mod id_gen;
pub mod model;

mod timestamp;

pub use id_gen::{generate_task_id, TaskIdGenerator};
pub use model::{Priority, StatusFilter, Task, TaskStats};
pub use timestamp::{format as format_timestamp, parse as parse_timestamp};
