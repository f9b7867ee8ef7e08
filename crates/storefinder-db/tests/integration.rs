//! Offline unit tests for storefinder-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use chrono::Utc;
use storefinder_core::{AppConfig, Environment, StoreRecord};
use storefinder_db::{PoolConfig, StoreRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        postal_lookup_url: "https://viacep.com.br".to_string(),
        geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
        http_user_agent: "ua".to_string(),
        upstream_timeout_secs: 10,
        default_radius_km: 100.0,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn store_row_converts_into_record() {
    let row = StoreRow {
        id: 11,
        name: "Loja Savassi".to_string(),
        street: "Rua Pernambuco".to_string(),
        number: "1000".to_string(),
        neighborhood: "Savassi".to_string(),
        city: "Belo Horizonte".to_string(),
        state: "MG".to_string(),
        postal_code: "30130-151".to_string(),
        latitude: -19.937,
        longitude: -43.934,
        created_at: Utc::now(),
    };

    let record = StoreRecord::from(row);
    assert_eq!(record.id, 11);
    assert_eq!(record.neighborhood, "Savassi");
    assert_eq!(record.postal_code, "30130-151");
    assert!((record.latitude - -19.937).abs() < f64::EPSILON);
}
