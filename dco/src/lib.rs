//! Developer Certificate of Origin checks for pull request commits.
//!
//! The entry point is [`validate`], which walks a list of [`Commit`]s and
//! returns a [`FailureRecord`] for every commit whose `Signed-off-by` trailers
//! do not satisfy the DCO policy. Rendering those records for a human lives in
//! [`report`].

mod commit;
mod email;
pub mod report;
mod signoff;
mod validate;

pub use self::commit::{Account, AccountKind, Commit, Identity};
pub use self::email::is_valid_email;
pub use self::report::{create_code_block, Remediation, Report};
pub use self::signoff::{extract_signoffs, Signoff};
pub use self::validate::{validate, FailureReason, FailureRecord};
