// Record data model: appending, lookups, reuse and key validation.

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use kvlog_core::record::{Entry, Record, RecordError, ValueTag};

// # ✅ 1. Appending and lookups

    #[test]
    fn append_pairs_in_order() {
        let mut rec = Record::new();
        rec.append(&["counter", "1", "random", "42"]);
        rec.append(&["counter", "2"]);

        let keys: Vec<&str> = rec.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["counter", "random", "counter"]);
        assert_eq!(rec.len(), 3);
    }

    #[test]
    fn get_returns_first_match() {
        let mut rec = Record::new();
        rec.append(&["k", "first", "k", "second"]);

        assert_eq!(rec.get("k"), Some(&b"first"[..]));
        assert_eq!(rec.get_str("k"), Some("first"));
        assert_eq!(rec.get("missing"), None);
    }

    #[test]
    fn push_accepts_binary_values() {
        let mut rec = Record::new();
        rec.push("img", [0xffu8, 0x00, 0x10]);

        assert_eq!(rec.get("img"), Some(&[0xffu8, 0x00, 0x10][..]));
        assert_eq!(rec.get_str("img"), None);
        assert_eq!(rec.entries()[0].value_str(), None);
    }

    #[test]
    fn entry_value_str() {
        assert_eq!(Entry::new("k", "text").value_str(), Some("text"));
        assert_eq!(Entry::new("k", "").value_str(), Some(""));
        assert_eq!(Entry::new("k", vec![0xc3u8, 0x28]).value_str(), None);
    }

    #[test]
    fn from_iterator_collects_pairs() {
        let rec: Record = [("a", &b"1"[..]), ("b", &b"2"[..])].into_iter().collect();
        assert_eq!(rec.entries(), &[Entry::new("a", "1"), Entry::new("b", "2")]);
    }

// # ❌ 2. Misuse

    #[test]
    #[should_panic(expected = "invalid number of args: 1")]
    fn append_odd_arguments_panics() {
        let mut rec = Record::new();
        rec.append(&["foo"]);
    }

    #[test]
    #[should_panic(expected = "invalid number of args: 0")]
    fn append_no_arguments_panics() {
        let mut rec = Record::new();
        rec.append(&[]);
    }

    #[test]
    fn try_append_is_all_or_nothing() {
        let mut rec = Record::new();
        rec.append(&["keep", "me"]);

        let err = rec.try_append(&["ok", "1", "bad:key", "2"]).unwrap_err();
        assert!(matches!(err, RecordError::InvalidKey { reason: "contains ':'", .. }));
        assert_eq!(rec.len(), 1);

        let err = rec.try_append(&["a", "b", "c"]).unwrap_err();
        assert_eq!(err, RecordError::OddArguments { count: 3 });
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn keys_with_newline_are_rejected() {
        let mut rec = Record::new();
        let err = rec.try_push("multi\nline", b"v").unwrap_err();
        assert!(matches!(err, RecordError::InvalidKey { reason: "contains '\\n'", .. }));
        assert!(rec.is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid key")]
    fn push_invalid_key_panics() {
        let mut rec = Record::new();
        rec.push("a:b", "v");
    }

// # ✅ 3. Reset and reuse

    #[test]
    fn reset_clears_everything() {
        let mut rec = Record::new();
        rec.append(&["k", "v"]);
        rec.name = "httplog".into();
        rec.timestamp = Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        rec.reset();

        assert!(rec.is_empty());
        assert!(rec.name.is_empty());
        assert!(rec.timestamp.is_none());
        assert_eq!(rec.get("k"), None);
    }

    #[test]
    fn reset_keeps_entry_buffers() {
        let mut rec = Record::new();
        let big = "x".repeat(4096);
        rec.append(&["k", &big, "k2", &big]);
        let before = rec.retained_capacity();

        rec.reset();
        rec.append(&["k", "small"]);

        assert!(rec.retained_capacity() >= before);
        assert_eq!(rec.entries(), &[Entry::new("k", "small")]);
    }

    #[test]
    fn spare_slots_do_not_affect_equality() {
        let mut reused = Record::new();
        reused.append(&["a", "1", "b", "2", "c", "3"]);
        reused.reset();
        reused.append(&["a", "1"]);

        let mut fresh = Record::new();
        fresh.append(&["a", "1"]);

        assert_eq!(reused, fresh);
        assert_eq!(reused.clone(), fresh);
        assert_eq!(format!("{reused:?}"), format!("{fresh:?}"));
    }

// # ✅ 4. Value tags

    #[test]
    fn entry_tag_follows_value_shape() {
        assert_eq!(Entry::new("k", "short").tag(), ValueTag::Short);
        assert_eq!(Entry::new("k", "").tag(), ValueTag::Long);
        assert_eq!(Entry::new("k", "a\nb").tag(), ValueTag::Long);
        assert_eq!(Entry::new("k", "caf\u{e9}").tag(), ValueTag::Long);
        assert_eq!(ValueTag::Short.as_byte(), b' ');
        assert_eq!(ValueTag::Long.as_byte(), b'+');
    }
}
