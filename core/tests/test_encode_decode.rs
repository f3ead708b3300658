// Byte-exact record encoding and strict decoding.
//
// * `encode_record` / `encode_into` / `encoded_len`
// * `decode_record` / `decode_record_into`
// * `parse_entry_header`

#[cfg(test)]
mod tests {
    use kvlog_core::record::{
        decode_record, decode_record_into, encode_into, encode_record, encoded_len,
        entry_encoded_len, parse_entry_header, EntryHeader, Record, RecordError,
    };
    use kvlog_core::types::Format;
    use proptest::prelude::*;

    fn large_value() -> String {
        "0123456789".repeat(32)
    }

    fn rec(pairs: &[&str]) -> Record {
        let mut r = Record::new();
        r.append(pairs);
        r
    }

// # ✅ 1. Exact encodings

    #[test]
    fn short_value_encoding() {
        let r = rec(&["key", "val"]);
        assert_eq!(encode_record(&r, Format::SizePrefix), b"key: val\n");
        assert_eq!(r.marshal_with_separator(), b"key: val\n---\n");
    }

    #[test]
    fn embedded_newline_forces_long_form() {
        let r = rec(&["k2", "a\nb"]);
        assert_eq!(r.marshal(), b"k2:+3\na\nb\n");
    }

    #[test]
    fn large_value_encoding() {
        let v = large_value();
        let r = rec(&["long key", &v]);
        let expected = format!("long key:+320\n{v}\n---\n");
        assert_eq!(r.marshal_with_separator(), expected.as_bytes());
    }

    #[test]
    fn long_value_ending_in_newline_is_not_doubled() {
        let r = rec(&["k", "line\n"]);
        assert_eq!(r.marshal(), b"k:+5\nline\n");
    }

    #[test]
    fn empty_value_encoding() {
        let r = rec(&["k", "", "next", "v"]);
        assert_eq!(r.marshal(), b"k:+0\nnext: v\n");
        assert_eq!(decode_record(&r.marshal()).unwrap(), r);
    }

// # ✅ 2. Short/long threshold

    #[test]
    fn threshold_boundary() {
        let at = "a".repeat(120);
        let over = "a".repeat(121);

        let short = rec(&["k", &at]).marshal();
        assert_eq!(short, format!("k: {at}\n").as_bytes());

        let long = rec(&["k", &over]).marshal();
        assert_eq!(long, format!("k:+121\n{over}\n").as_bytes());
    }

    #[test]
    fn non_printable_bytes_force_long_form() {
        for b in [0u8, 9, 31, 127, 128, 255] {
            let mut r = Record::new();
            r.push("k", [b'a', b]);
            let wire = r.marshal();
            assert!(wire.starts_with(b"k:+2\n"), "byte {b} encoded as {wire:?}");
            assert_eq!(decode_record(&wire).unwrap(), r);
        }
    }

// # ✅ 3. Exact sizing

    #[test]
    fn encoded_len_matches_output() {
        let v = large_value();
        let mut r = rec(&["a", "1", "big", &v, "nl", "x\n", "empty", ""]);
        r.push("bin", [0u8, 1, 2, 3]);

        for format in [Format::Separator, Format::SizePrefix] {
            assert_eq!(encode_record(&r, format).len(), encoded_len(&r, format));
        }
        let sum: usize = r.entries().iter().map(entry_encoded_len).sum();
        assert_eq!(sum, encoded_len(&r, Format::SizePrefix));
    }

    #[test]
    fn encode_into_appends() {
        let r = rec(&["k", "v"]);
        let mut out = b"prefix".to_vec();
        let n = encode_into(&r, Format::Separator, &mut out);
        assert_eq!(n, 9);
        assert_eq!(out, b"prefixk: v\n---\n");
    }

// # ✅ 4. Decoding

    #[test]
    fn decode_empty_input_is_empty_record() {
        assert!(decode_record(b"").unwrap().is_empty());
    }

    #[test]
    fn decode_accepts_trailing_separator() {
        let r = decode_record(b"key: val\n---\n").unwrap();
        assert_eq!(r, rec(&["key", "val"]));
    }

    #[test]
    fn decode_long_value_without_optional_newline() {
        let r = decode_record(b"a:+2\nhib: x\n").unwrap();
        assert_eq!(r, rec(&["a", "hi", "b", "x"]));
    }

    #[test]
    fn decode_reuses_record() {
        let mut r = rec(&["old", "entry", "other", "x"]);
        r.name = "kept?".into();
        decode_record_into(b"new: 1\n", &mut r).unwrap();
        assert_eq!(r, rec(&["new", "1"]));
    }

    #[test]
    fn parse_entry_header_variants() {
        assert_eq!(
            parse_entry_header(b"key: a value").unwrap(),
            EntryHeader::Short { key: b"key", value: b"a value" }
        );
        assert_eq!(
            parse_entry_header(b"key:+17").unwrap(),
            EntryHeader::Long { key: b"key", len: 17 }
        );
        // value may itself contain ':'
        assert_eq!(
            parse_entry_header(b"url: http://x").unwrap(),
            EntryHeader::Short { key: b"url", value: b"http://x" }
        );
    }

// # ❌ 5. Malformed input

    #[test]
    fn malformed_inputs_are_rejected() {
        let cases: &[&[u8]] = &[
            b"ha",
            b"ha\n",
            b"ha:\n",
            b"ha:_\n",
            b"ha:+32\nma",
            b"ha:+2\nmara",
            b"ha:+los\nma",
        ];
        for case in cases {
            assert!(decode_record(case).is_err(), "accepted {case:?}");
        }
    }

    #[test]
    fn malformed_input_error_kinds() {
        assert!(matches!(decode_record(b"ha"), Err(RecordError::MissingNewline { .. })));
        assert!(matches!(decode_record(b"ha\n"), Err(RecordError::MissingColon { .. })));
        assert!(matches!(decode_record(b"ha:\n"), Err(RecordError::MissingTag { .. })));
        assert!(matches!(
            decode_record(b"ha:_\n"),
            Err(RecordError::UnknownTag { tag: b'_', .. })
        ));
        assert!(matches!(
            decode_record(b"ha:+32\nma"),
            Err(RecordError::Truncated { need: 32, have: 2 })
        ));
        assert!(matches!(decode_record(b"ha:+los\nma"), Err(RecordError::InvalidLength { .. })));
        assert!(matches!(decode_record(b"ha:+-1\n"), Err(RecordError::InvalidLength { .. })));
    }

    #[test]
    fn failed_decode_leaves_record_empty() {
        let mut r = rec(&["a", "1"]);
        assert!(decode_record_into(b"good: 1\nha:+32\nma", &mut r).is_err());
        assert!(r.is_empty());
    }

    #[test]
    fn error_message_quotes_offending_line() {
        let err = decode_record(b"no colon here\n").unwrap_err();
        assert!(err.to_string().contains("no colon here"), "{err}");
    }

// # ✅ 6. Round-trip over arbitrary values

    proptest! {
        #[test]
        fn prop_roundtrip(
            pairs in proptest::collection::vec(
                ("[a-zA-Z0-9 _.-]{0,16}", proptest::collection::vec(any::<u8>(), 0..300)),
                0..12,
            )
        ) {
            let mut r = Record::new();
            for (k, v) in &pairs {
                r.push(k, v);
            }
            for format in [Format::Separator, Format::SizePrefix] {
                let wire = encode_record(&r, format);
                prop_assert_eq!(wire.len(), encoded_len(&r, format));
                prop_assert_eq!(decode_record(&wire).unwrap(), r.clone());
            }
        }
    }
}
