//! Parser for known answer files in the NIST `.rsp` format.
#![allow(dead_code)]

use std::{fs, path::Path};

pub struct KatSet {
    /// Digest length in bits.
    pub length: usize,
    pub tests: Vec<Test>,
}

pub struct Test {
    /// Message length in bits, always a multiple of 8.
    pub len: usize,
    pub msg: Vec<u8>,
    pub digest: String,
}

impl KatSet {
    /// Load a file from `tests/test-vectors/`.
    pub fn load(name: &str) -> Self {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/test-vectors")
            .join(name);
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|err| panic!("unable to read {}: {err}", path.display()));
        Self::parse(&content)
    }

    fn parse(inp: &str) -> Self {
        let mut lines = inp
            .lines()
            .map(str::trim)
            .filter(|line| !(line.starts_with('#') || line.is_empty()));

        let length = lines
            .next()
            .and_then(|line| line.strip_prefix("[L = "))
            .and_then(|line| line.strip_suffix(']'))
            .expect("missing [L = ...] header")
            .parse()
            .expect("L can't be parsed as usize");

        let mut tests = vec![];
        while let Some(len_line) = lines.next() {
            let len: usize = field(len_line, "Len")
                .parse()
                .expect("unable to parse Len");
            assert_eq!(0, len % 8, "bit-oriented messages are not supported");

            let mut msg = hex::decode(field(lines.next().expect("missing Msg"), "Msg"))
                .expect("unable to decode Msg");
            // empty messages are written as a single zero byte
            msg.truncate(len / 8);
            let digest = field(lines.next().expect("missing MD"), "MD").to_owned();

            tests.push(Test { len, msg, digest });
        }
        KatSet { length, tests }
    }
}

fn field<'a>(line: &'a str, name: &str) -> &'a str {
    line.strip_prefix(name)
        .and_then(|rest| rest.strip_prefix(" = "))
        .unwrap_or_else(|| panic!("expected `{name} = ...`, got `{line}`"))
}
