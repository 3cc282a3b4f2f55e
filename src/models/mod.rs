pub mod course;
pub mod session;
pub mod week;

pub use course::{Course, NewCourseRequest};
pub use session::{SessionPlan, TimeBlock};
pub use week::Week;
