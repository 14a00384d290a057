//! Tests for settings parsing and loading

use super::*;

mod parsing_tests {
    use super::*;

    #[test]
    fn test_load_config_from_toml() {
        let toml = r#"
[limits]
max_input_bytes = 1024

[classifier]
field_max_chars = 60
"#;

        let settings: Settings = toml::from_str(toml).unwrap();

        assert_eq!(settings.limits.max_input_bytes, 1024);
        assert_eq!(settings.classifier.field_max_chars, 60);
        // Missing field uses default
        assert_eq!(settings.classifier.value_max_chars, 200);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.classifier.separator_min_run, 10);
        assert_eq!(
            settings.document.confidentiality_notice,
            DEFAULT_CONFIDENTIALITY_NOTICE
        );
    }

    #[test]
    fn test_pdf_config_parsing() {
        let toml = r#"
[pdf]
compress = false
footer_band_mm = 25.0
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert!(!settings.pdf.compress);
        assert_eq!(settings.pdf.footer_band_mm, 25.0);
        assert_eq!(settings.pdf.margin_mm, 20.0);
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let toml = r#"
[limits]
max_input_bytes = "lots"
"#;
        assert!(Settings::from_toml_str(toml).is_err());
    }
}

mod loader_tests {
    use super::*;
    use crate::error::FormatError;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policydoc.toml");
        std::fs::write(
            &path,
            "[document]\nconfidentiality_notice = \"Internal\"\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.document.confidentiality_notice, "Internal");
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[limits\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        match err {
            FormatError::Config { path: p, .. } => assert!(p.ends_with("broken.toml")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load(std::path::Path::new("/nonexistent/policydoc.toml")).unwrap_err();
        assert!(matches!(err, FormatError::Io(_)));
    }
}
