pub mod controls;
pub mod host;
pub mod session;

pub use controls::{ControlKind, ControlState, Controls};
pub use host::{first_tracker_url, PageHost, RouteEvent};
pub use session::PageSession;
