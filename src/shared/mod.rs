pub mod json_merge;
pub mod result;
