//! Simple to use cli for logging hours worked per project and looking at them week by week.
//! Everything lives in a single json file that is rewritten after every change.
//!

pub mod analysis;
pub mod cli;
pub mod tracker;
pub mod utils;
