// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

static NAMESPACES: &[(&str, &str)] = &[
    ("", ""),
    ("*", "*"),
    ("html", "http://www.w3.org/1999/xhtml"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("xmlns", "http://www.w3.org/2000/xmlns/"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("svg", "http://www.w3.org/2000/svg"),
    ("mathml", "http://www.w3.org/1998/Math/MathML"),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    let generated = Path::new(&out_dir).join("generated.rs");
    let mut generated = BufWriter::new(File::create(&generated).unwrap());

    named_entities_to_phf(
        &Path::new(&manifest_dir).join("data").join("entities.json"),
        &Path::new(&out_dir).join("named_entities.rs"),
    );

    let local_names = Path::new(&manifest_dir).join("local_names.txt");
    let mut local_names_atom = string_cache_codegen::AtomType::new("LocalName", "local_name!");
    for line in BufReader::new(File::open(&local_names).unwrap()).lines() {
        let local_name = line.unwrap();
        local_names_atom.atom(&local_name);
        local_names_atom.atom(&local_name.to_ascii_lowercase());
    }
    local_names_atom
        .with_macro_doc("Takes a local name as a string and returns its key in the string cache.")
        .write_to(&mut generated)
        .unwrap();

    string_cache_codegen::AtomType::new("Prefix", "namespace_prefix!")
        .with_macro_doc("Takes a namespace prefix string and returns its key in a string cache.")
        .atoms(NAMESPACES.iter().map(|&(prefix, _url)| prefix))
        .write_to(&mut generated)
        .unwrap();

    string_cache_codegen::AtomType::new("Namespace", "namespace_url!")
        .with_macro_doc("Takes a namespace url string and returns its key in a string cache.")
        .atoms(NAMESPACES.iter().map(|&(_prefix, url)| url))
        .write_to(&mut generated)
        .unwrap();

    writeln!(
        generated,
        r#"
        /// Maps the input of [`namespace_prefix!`] to the output of [`namespace_url!`].
        #[macro_export] macro_rules! ns {{
        "#
    )
    .unwrap();
    for &(prefix, url) in NAMESPACES {
        writeln!(
            generated,
            "({prefix}) => {{ $crate::namespace_url!({url:?}) }};"
        )
        .unwrap();
    }
    writeln!(generated, "}}").unwrap();

    println!("cargo:rerun-if-changed=local_names.txt");
    println!("cargo:rerun-if-changed=data/entities.json");
}

/// Turns the curated named-character-reference table into a `phf::Map` from
/// entity name (sans the leading `&`) to its one or two decoded codepoints
/// (the second is 0 when the reference decodes to a single character).
///
/// This mirrors the flat perfect-hash-map shape used by the build script
/// this crate's entity tokenizer was adapted from, rather than a DAFSA: the
/// curated subset here is small enough that a trie's extra code isn't
/// justified, and the lookup interface (`NAMED_ENTITIES.get(name)`) is the
/// same either way.
fn named_entities_to_phf(from: &Path, to: &Path) {
    #[derive(Deserialize, Debug)]
    struct CharRef {
        codepoints: Vec<u32>,
    }

    let entities: HashMap<String, CharRef> =
        serde_json::from_reader(File::open(from).unwrap()).unwrap();

    let mut entities: HashMap<String, (u32, u32)> = entities
        .iter()
        .map(|(name, char_ref)| {
            assert!(name.starts_with('&'));
            assert!(char_ref.codepoints.len() <= 2);
            (
                name[1..].to_owned(),
                (
                    char_ref.codepoints[0],
                    *char_ref.codepoints.get(1).unwrap_or(&0),
                ),
            )
        })
        .collect();

    // Every proper prefix of a legacy (semicolon-less) reference is also a
    // legal match candidate while scanning character-by-character; record
    // the ones that aren't themselves full references as a miss sentinel.
    for key in entities.keys().cloned().collect::<Vec<_>>() {
        for n in 1..key.len() {
            entities.entry(key[..n].to_owned()).or_insert((0, 0));
        }
    }
    entities.entry(String::new()).or_insert((0, 0));

    let mut phf_map = phf_codegen::Map::new();
    for (key, value) in &entities {
        phf_map.entry(key.as_str(), format!("{value:?}"));
    }

    let mut file = File::create(to).unwrap();
    writeln!(
        file,
        r#"
/// Maps named character reference names (with the leading `&` stripped) to
/// their decoded codepoints. The second codepoint is 0 for references that
/// decode to a single character.
"#
    )
    .unwrap();
    write!(
        file,
        "pub static NAMED_ENTITIES: phf::Map<&'static str, (u32, u32)> = "
    )
    .unwrap();
    phf_map.build(&mut file).unwrap();
    writeln!(file, ";").unwrap();
}
