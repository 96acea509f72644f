use jproperties::escape::{decode, encode_key, encode_value};
use jproperties::{split_key_value, Properties};
use proptest::prelude::*;
use std::io::Cursor;
use tempfile::NamedTempFile;

const PROPSTR: &str = "\nfoo = bar\nbar = baz";

fn propfile() -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(file.path(), PROPSTR).expect("Failed to write temp file");
    file
}

#[test]
pub fn load_from_path() {
    let file = propfile();
    let properties = Properties::load_path(file.path()).unwrap();
    assert_eq!(properties.to_string(), "foo = bar\nbar = baz\n");
}

#[test]
pub fn load_from_file() {
    let file = propfile();
    let reader = std::io::BufReader::new(file.reopen().unwrap());
    let properties = Properties::load_reader(reader).unwrap();
    assert_eq!(properties.to_string(), "foo = bar\nbar = baz\n");
}

#[test]
pub fn save() {
    let p = Properties::load_str(PROPSTR).unwrap();
    let file = NamedTempFile::new().unwrap();
    p.save_path(file.path()).unwrap();

    let p2 = Properties::load_path(file.path()).unwrap();
    assert_eq!(p, p2);
}

#[test]
pub fn newline_at_eof() {
    let file = NamedTempFile::new().unwrap();
    let prop: Properties = [("a", "b"), ("c", "d"), ("e", "f")].into_iter().collect();
    prop.save_path(file.path()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let lastline = text.split_inclusive('\n').last().unwrap();
    assert_eq!(lastline, "e = f\n");
}

#[test]
pub fn save_overwrites() {
    let file = propfile();
    let prop: Properties = [("only", "one")].into_iter().collect();
    prop.save_path(file.path()).unwrap();

    assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "only = one\n");
}

#[test]
pub fn formatting_is_canonical() {
    let text = "# header\n  a:1\nb    2\n\nc=\\\n   3\n";
    let props = Properties::load_str(text).unwrap();
    assert_eq!(props.to_string(), "a = 1\nb = 2\nc = 3\n");
}

fn arb_props() -> impl Strategy<Value = Properties> {
    prop::collection::vec((any::<String>(), any::<String>()), 0..8)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn text_round_trip(props in arb_props()) {
        let reloaded = Properties::load_str(props.to_string()).expect("own output must parse");
        prop_assert_eq!(&reloaded, &props);
        prop_assert_eq!(reloaded.keys().collect::<Vec<_>>(), props.keys().collect::<Vec<_>>());
    }

    #[test]
    fn bytes_round_trip(props in arb_props()) {
        let mut utf8 = Vec::new();
        props.save(&mut utf8).unwrap();
        prop_assert_eq!(Properties::load_reader(Cursor::new(utf8)).unwrap(), props.clone());

        let mut ascii = Vec::new();
        jproperties::write_ascii(&props, &mut ascii, "\n").unwrap();
        prop_assert!(ascii.is_ascii());
        prop_assert_eq!(Properties::load_reader(Cursor::new(ascii)).unwrap(), props);
    }

    #[test]
    fn escape_round_trip(key in any::<String>(), value in any::<String>()) {
        prop_assert_eq!(decode(&encode_key(&key)).unwrap(), key.clone());
        prop_assert_eq!(decode(&encode_value(&value)).unwrap(), value.clone());

        let line = format!("{} = {}", encode_key(&key), encode_value(&value));
        let raw = split_key_value(&line);
        prop_assert_eq!(decode(raw.key).unwrap(), key);
        prop_assert_eq!(decode(raw.value).unwrap(), value);
    }

    #[test]
    fn control_escapes_round_trip(value in "[a-z\\x0C\\n\\r\\t]{0,16}") {
        let props: Properties = [("k", value.as_str())].into_iter().collect();
        let reloaded = Properties::load_str(props.to_string()).unwrap();
        prop_assert_eq!(reloaded.get("k").unwrap(), value.as_str());
    }
}
