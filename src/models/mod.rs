pub mod community;
pub mod notification;
pub mod placement;
pub mod profile;

pub use community::{Community, CommunityMember, CommunityPost};
pub use notification::Notification;
pub use placement::{
    Application, ApplicationStatus, CafForm, CafStatus, Company, Document, Event, Job,
    PlacementEvent,
};
pub use profile::{Profile, Role, StudentProfile};
