extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate itertools;
extern crate regex;
#[macro_use]
extern crate lazy_static;
extern crate failure;
extern crate reqwest;
extern crate mime;
extern crate toml;
extern crate directories;
extern crate url;
extern crate time;
extern crate csv;

pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod report;
pub mod table;
