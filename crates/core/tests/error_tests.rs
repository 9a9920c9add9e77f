// ═══════════════════════════════════════════════════════════════════
// Error Tests: CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use defi_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn data_unavailable() {
        let err = CoreError::DataUnavailable {
            source_name: "historical TVL".into(),
            reason: "HTTP 503".into(),
        };
        assert_eq!(err.to_string(), "Data unavailable from historical TVL: HTTP 503");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "DefiLlama".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "API error (DefiLlama): rate limited");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection reset".into());
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("expected array".into());
        assert_eq!(err.to_string(), "Deserialization error: expected array");
    }

    #[test]
    fn alignment() {
        let err = CoreError::Alignment("no overlapping dates".into());
        assert_eq!(err.to_string(), "Alignment failed: no overlapping dates");
    }

    #[test]
    fn invalid_table() {
        let err = CoreError::InvalidTable("dates not increasing".into());
        assert_eq!(err.to_string(), "Invalid table: dates not increasing");
    }

    #[test]
    fn unknown_column() {
        let err = CoreError::UnknownColumn("DAI".into());
        assert_eq!(err.to_string(), "Unknown column: DAI");
    }

    #[test]
    fn invalid_date_selection() {
        let err = CoreError::InvalidDateSelection {
            date: "2017-01-01".into(),
            min: "2018-08-16".into(),
            max: "2024-05-01".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date selection: 2017-01-01 is outside [2018-08-16, 2024-05-01]"
        );
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

mod helpers {
    use super::*;

    #[test]
    fn unavailable_wraps_inner_error_message() {
        let inner = CoreError::Api {
            provider: "YahooFinance".into(),
            message: "no quotes".into(),
        };
        let err = CoreError::unavailable("price history", inner);
        match &err {
            CoreError::DataUnavailable { source_name, reason } => {
                assert_eq!(source_name, "price history");
                assert_eq!(reason, "API error (YahooFinance): no quotes");
            }
            other => panic!("Expected DataUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn unavailable_accepts_plain_strings() {
        let err = CoreError::unavailable(String::from("stablecoin listing"), "empty");
        assert_eq!(err.to_string(), "Data unavailable from stablecoin listing: empty");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let result: Result<Vec<f64>, _> = serde_json::from_str("{{invalid json");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }

    #[test]
    fn from_serde_json_error_eof() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("");
        let core_err: CoreError = result.unwrap_err().into();
        match &core_err {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {:?}", other),
        }
    }
}

// ── Error is std::error::Error ──────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Alignment("test".into()));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn core_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
