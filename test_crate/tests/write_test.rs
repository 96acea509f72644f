use jproperties::escape::{encode_key, encode_value};
use jproperties::{Properties, Record};

fn do_test(data: &[(&str, &str, &str)]) {
    for (key, value, expected) in data {
        let mut out = String::new();
        jproperties::write([(key, value)], &mut out, "\n").unwrap();
        assert_eq!(&out, expected, "{:?}={:?}", key, value);

        let back = jproperties::parse_str_to_vec(&out).expect("Parsing failed");
        assert_eq!(back, vec![(key.to_string(), value.to_string())]);
    }
}

#[test]
pub fn t1() {
    let v = vec![("k", "v"), ("k2", "v2")];

    let mut out = String::new();
    jproperties::write(&v, &mut out, "\n").unwrap();

    assert_eq!(&out, "k = v\nk2 = v2\n");
}

#[test]
pub fn t2() {
    let v = vec![("k", "v"), ("k2", "v2ä")];

    let mut out = String::new();
    jproperties::write(&v, &mut out, "\n").unwrap();

    assert_eq!(&out, "k = v\nk2 = v2ä\n");
}

#[test]
pub fn t3() {
    let v = vec![("k", "v"), ("k2", "v2\u{1D54A}")];

    let mut out = Vec::new();
    jproperties::write_utf8(&v, &mut out, "\n").unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "k = v\nk2 = v2\u{1D54A}\n");
}

#[test]
pub fn t4() {
    let v = vec![("k", "v"), ("k2", "v2\u{1D54A}"), ("\u{e4}", "\u{e4}")];

    let mut out = Vec::new();
    jproperties::write_ascii(&v, &mut out, "\n").unwrap();

    let str = String::from_utf8(out).unwrap();

    assert_eq!(&str, "k = v\nk2 = v2\\uD835\\uDD4A\n\\u00E4 = \\u00E4\n");

    let n = jproperties::parse_str_to_vec(&str).expect("Parsing failed");
    assert_eq!(
        format!("{n:?}").as_str(),
        "[(\"k\", \"v\"), (\"k2\", \"v2\u{1D54A}\"), (\"\u{e4}\", \"\u{e4}\")]"
    );
}

#[test]
pub fn eq_separator() {
    do_test(&[("a", "b", "a = b\n")]);
}

#[test]
pub fn empty_value() {
    do_test(&[("a", "", "a = \n"), ("", "", " = \n"), ("", "v", " = v\n")]);
}

#[test]
pub fn escaped_whitespace() {
    do_test(&[
        ("a", "\x0C", "a = \\f\n"),
        ("a", "\n", "a = \\n\n"),
        ("a", "\r", "a = \\r\n"),
        ("a", "\t", "a = \\t\n"),
    ]);
}

#[test]
pub fn separator_in_key() {
    do_test(&[
        ("key:with:colons", "b", "key\\:with\\:colons = b\n"),
        ("key=with=equals", "b", "key\\=with\\=equals = b\n"),
        ("key with spaces", "b", "key\\ with\\ spaces = b\n"),
        ("key\twith\ttabs", "b", "key\\twith\\ttabs = b\n"),
    ]);
}

#[test]
pub fn separators_in_value_stay_plain() {
    do_test(&[
        ("a", "http://example.org/?foo=bar", "a = http://example.org/?foo=bar\n"),
        ("a", "=b", "a = =b\n"),
        ("a", "x y z ", "a = x y z \n"),
    ]);
}

#[test]
pub fn leading_whitespace_in_value() {
    do_test(&[
        ("a", " b", "a = \\ b\n"),
        ("a", "  b c", "a = \\ \\ b c\n"),
        ("a", "\t b", "a = \\t\\ b\n"),
        ("a", "   ", "a = \\ \\ \\ \n"),
    ]);
}

#[test]
pub fn backslashes() {
    do_test(&[
        ("path", "c:\\wiki\\templates", "path = c:\\\\wiki\\\\templates\n"),
        ("a", "b\\", "a = b\\\\\n"),
        ("a\\b", "c", "a\\\\b = c\n"),
    ]);
}

#[test]
pub fn comment_characters() {
    do_test(&[
        ("#a", "b", "\\#a = b\n"),
        ("!a", "b", "\\!a = b\n"),
        ("a#!", "#b", "a#! = #b\n"),
    ]);
}

#[test]
pub fn control_characters() {
    do_test(&[
        ("a", "\x01", "a = \\u0001\n"),
        ("\x7F", "b", "\\u007F = b\n"),
    ]);
}

#[test]
pub fn encode_helpers() {
    assert_eq!(encode_key("key with:sep=x"), "key\\ with\\:sep\\=x");
    assert_eq!(encode_value(" key with:sep=x"), "\\ key with:sep=x");
    assert_eq!(encode_value(""), "");
}

#[test]
pub fn line_ending() {
    let v = vec![("a", "1"), ("b", "2")];

    let mut out = String::new();
    jproperties::write(&v, &mut out, "\r\n").unwrap();
    assert_eq!(&out, "a = 1\r\nb = 2\r\n");

    let back = jproperties::parse_str_to_vec(&out).unwrap();
    assert_eq!(back.len(), 2);
}

#[test]
pub fn char_output() {
    let v = vec![Record {
        key: "k".to_string(),
        value: "v".to_string(),
    }];

    let mut chars = Vec::new();
    jproperties::write(&v, &mut &mut chars, "\n").unwrap();
    assert_eq!(chars, vec!['k', ' ', '=', ' ', 'v', '\n']);
}

#[test]
pub fn save_ends_with_newline() {
    let props: Properties = [("a", "b"), ("c", "d"), ("e", "f")].into_iter().collect();

    let mut out = Vec::new();
    props.save(&mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "a = b\nc = d\ne = f\n");
    assert_eq!(text, props.to_string());
    assert!(text.lines().last().is_some());
    assert!(text.ends_with('\n'));
}

#[test]
pub fn empty_store_writes_nothing() {
    assert_eq!(Properties::new().to_string(), "");
}
