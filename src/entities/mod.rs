//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod challenge;
pub mod contribution;
pub mod envelope;
pub mod goal;
pub mod notification;

// Re-export specific types to avoid conflicts
pub use challenge::{Column as ChallengeColumn, Entity as Challenge, Model as ChallengeModel};
pub use contribution::{
    Column as ContributionColumn, Entity as Contribution, Model as ContributionModel,
};
pub use envelope::{Column as EnvelopeColumn, Entity as Envelope, Model as EnvelopeModel};
pub use goal::{Column as GoalColumn, Entity as Goal, Model as GoalModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
