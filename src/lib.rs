// Library root
// -----------
// The binary (`main.rs`) is a thin interactive shell; everything it does is
// exposed here so the catalog rules can be tested without a terminal.
//
// Module responsibilities:
// - `slug`, `indices`: pure text rules (slug derivation, index lists).
// - `images`: the image folder on disk (lookups, group scans, renames).
// - `store`: project/media data shape and the JSON catalog file.
// - `catalog`: the menu use-cases built on the modules above.
// - `config`: the fixed catalog and image locations.
// - `ui`: prompts and console output using `dialoguer`.
pub mod catalog;
pub mod config;
pub mod error;
pub mod images;
pub mod indices;
pub mod slug;
pub mod store;
pub mod ui;
