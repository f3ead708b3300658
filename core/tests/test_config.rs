#[cfg(test)]
mod tests {
    use kvlog_core::config::{ReaderConfig, WriterConfig};
    use kvlog_core::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_RETAINED_CAPACITY};
    use kvlog_core::types::{Format, StreamError};

    #[test]
    fn defaults() {
        let r = ReaderConfig::default();
        assert_eq!(r.format, Format::SizePrefix);
        assert_eq!(r.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(r.max_retained_capacity, DEFAULT_MAX_RETAINED_CAPACITY);
        assert_eq!(r.max_payload_len, None);
        r.validate().unwrap();

        let w = WriterConfig::default();
        assert!(w.pad_frames);
        assert!(!w.flush_each_write);
        w.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let r = ReaderConfig::from_json(r#"{"format": "separator", "max_payload_len": 4096}"#).unwrap();
        assert_eq!(r.format, Format::Separator);
        assert_eq!(r.max_payload_len, Some(4096));
        assert_eq!(r.initial_capacity, DEFAULT_INITIAL_CAPACITY);

        let w = WriterConfig::from_json(r#"{"pad_frames": false}"#).unwrap();
        assert_eq!(w.format, Format::SizePrefix);
        assert!(!w.pad_frames);
    }

    #[test]
    fn json_roundtrip() {
        let cfg = WriterConfig { flush_each_write: true, ..WriterConfig::new(Format::Separator) };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"format\":\"separator\""), "{json}");
        assert_eq!(WriterConfig::from_json(&json).unwrap(), cfg);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let err = ReaderConfig::from_json(r#"{"initial_capacity": 100, "max_retained_capacity": 10}"#)
            .unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));

        let err = WriterConfig::from_json(r#"{"max_retained_capacity": 0}"#).unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));

        let err = ReaderConfig::from_json(r#"{"format": "xml"}"#).unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }

    #[test]
    fn format_names() {
        assert_eq!(Format::Separator.as_str(), "separator");
        assert_eq!(Format::SizePrefix.as_str(), "size_prefix");
        assert_eq!(Format::default(), Format::SizePrefix);
    }
}
