//! Response normalizer module
//!
//! Every call answers with an envelope carrying its own `StatusCode`; an
//! HTTP 200 with `StatusCode` 403 is still a failure. This module checks that
//! code and reshapes the envelope into output items.

mod envelope;
mod normalize;

pub use envelope::{Envelope, PageResponse};
pub use normalize::{
    check_status, checked_envelope, normalize_get, normalize_mutation, SUCCESS_STATUS,
};

#[cfg(test)]
mod tests;
