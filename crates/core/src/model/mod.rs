mod course;
mod ids;
mod navigation;
mod progress;
mod session;

pub use ids::{CourseId, ParseIdError};

pub use course::Course;
pub use navigation::{NavigationTarget, Screen};
pub use progress::{Progress, ProgressMap};
pub use session::{AuthMode, Credentials, Session};
