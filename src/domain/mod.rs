mod interest;
mod submission;
mod waitlist_email;
mod waitlist_name;

pub use interest::Interest;
pub use submission::{
    RequestMetadata, SignupField, SignupForm, SubmissionStatus, ValidSignup, ValidationError,
    WaitlistSubmission,
};
pub use waitlist_email::WaitlistEmail;
pub use waitlist_name::WaitlistName;
