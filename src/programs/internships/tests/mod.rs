mod common;
mod registry;
mod reports;
