// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg_attr(test, deny(warnings))]
#![allow(unused_parens)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate htmlforge_common;

extern crate phf;

pub use driver::{
    parse_document, parse_document_bytes, parse_fragment, parse_fragment_for_element,
    ConfigurationError, ParseOpts, Parser, ParserConfig,
};
pub use htmlforge_common::*;

pub use serialize::serialize;

#[macro_use]
mod macros;

mod util {
    pub mod str;
}

pub mod driver;
pub mod serialize;
pub mod tokenizer;
pub mod tree_builder;

/// Re-export the tendril crate.
pub mod tendril {
    extern crate tendril;
    pub use self::tendril::*;
}
