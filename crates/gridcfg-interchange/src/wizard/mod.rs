//! Import wizard state machine
//!
//! Steps run `drivers → connect → schemas → tables → options → saved`. The
//! wizard never performs I/O itself: transitions that need remote data return
//! a request and the caller feeds the response back through the matching
//! `*_loaded` transition.

mod machine;
mod types;

pub use machine::ImportWizard;
pub use types::*;

#[cfg(test)]
mod tests;
