//! Azure DevOps client module for pull request listing

mod client;
mod ingest;
mod traits;

pub use client::{AzureConnector, ClientSettings};
pub use ingest::list_open_requests;
pub use traits::{Connector, ReviewApi, Session};

#[cfg(test)]
pub use client::{RawPullRequest, RawReviewer, Repository};
#[cfg(test)]
pub use traits::{MockConnector, MockReviewApi};
