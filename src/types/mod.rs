mod team;

pub use team::{Team, VolunteerEmail};
