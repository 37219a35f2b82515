pub mod db_utils;
pub mod mime;
pub mod nested_set;
