// ═══════════════════════════════════════════════════════════════════
// Error Tests — DashboardError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use fifo_pl_dashboard_core::errors::DashboardError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn network() {
        let err = DashboardError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn http() {
        let err = DashboardError::Http {
            status: 503,
            endpoint: "/api/FifoPl/dashboard-summary".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from /api/FifoPl/dashboard-summary");
    }

    #[test]
    fn deserialization() {
        let err = DashboardError::Deserialization("missing field `totalPnl`".into());
        assert_eq!(err.to_string(), "Deserialization error: missing field `totalPnl`");
    }

    #[test]
    fn chart() {
        let err = DashboardError::Chart("canvas context lost".into());
        assert_eq!(err.to_string(), "Chart error: canvas context lost");
    }

    #[test]
    fn config() {
        let err = DashboardError::Config("bad url".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad url");
    }
}

// ── Classification ──────────────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn transport_errors() {
        assert!(DashboardError::Network("x".into()).is_transport());
        assert!(DashboardError::Http {
            status: 404,
            endpoint: "/".into()
        }
        .is_transport());
    }

    #[test]
    fn non_transport_errors() {
        assert!(!DashboardError::Deserialization("x".into()).is_transport());
        assert!(!DashboardError::Chart("x".into()).is_transport());
        assert!(!DashboardError::Config("x".into()).is_transport());
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DashboardError = json_err.into();
        assert!(matches!(err, DashboardError::Deserialization(_)));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<DashboardError>();
    }
}
