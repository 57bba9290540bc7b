//! Renders a [`crate::driver::CompileError`] to stderr.
//!
//! Every phase error already formats itself as `[line L:C] <Phase> error:
//! <message>` (or, for the handful of phase-less infrastructure failures,
//! a plain sentence) -- this module just owns the one place that writes
//! that text to the user.

use crate::driver::CompileError;

pub fn report(error: &CompileError) {
    eprintln!("{error}");
}
