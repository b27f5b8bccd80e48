//! # CLI Module
//!
//! Command-line entry points of RecordRecs.
//!
//! - [`serve`] - Runs the web app: login with Spotify, then recommendations in the
//!   browser
//! - [`recs`] - Runs the recommendation engine once with an access token given on the
//!   command line and prints the result as tables
//!
//! ```bash
//! recordrecs serve --open
//! recordrecs recs --token BQC...
//! ```

mod recs;
mod serve;

pub use recs::recs;
pub use recs::to_sections;
pub use serve::serve;
