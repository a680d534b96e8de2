//!  Storage is organized through [project_storage::JsonProjectStorage].
//!  The basic idea is:
//!   - There is a single json file holding every project.
//!   - The whole file is loaded once at startup.
//!   - The whole file is rewritten after every mutation.

pub mod entities;
pub mod project_storage;
