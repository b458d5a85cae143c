//! Progress indication while a participant is being resolved

pub mod reporter;
