//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod strategies;

use std::sync::Arc;

use authz_sql::schema::{
    Aggregation, Association, ColumnType, EntityCatalog, EntityType, EnumDefinition,
};
use authz_sql::RelationalAdapter;

/// Teams ← users ← widgets (owner, creator) → parts
pub fn sample_catalog() -> EntityCatalog {
    EntityCatalog::new()
        .with(
            EntityType::new("Team", "teams")
                .column("id", ColumnType::BigInt)
                .column("name", ColumnType::Text),
        )
        .with(
            EntityType::new("User", "users")
                .column("id", ColumnType::BigInt)
                .column("name", ColumnType::Text)
                .column("team_id", ColumnType::BigInt)
                .column("prefs", ColumnType::Jsonb)
                .column("role", ColumnType::Integer)
                .alias("login", "name")
                .association(Association::belongs_to("team", "Team"))
                .enum_attribute(
                    "role",
                    EnumDefinition::from_pairs([("member", 1), ("admin", 2)]),
                ),
        )
        .with(
            EntityType::new("Part", "parts")
                .column("id", ColumnType::BigInt)
                .column("widget_id", ColumnType::BigInt)
                .column("sku", ColumnType::Text),
        )
        .with(
            EntityType::new("Widget", "widgets")
                .column("id", ColumnType::BigInt)
                .column("status", ColumnType::Text)
                .column("state", ColumnType::Integer)
                .column("color", ColumnType::Text)
                .column("data", ColumnType::Jsonb)
                .column("owner_id", ColumnType::BigInt)
                .column("creator_id", ColumnType::BigInt)
                .column("price_amount", ColumnType::Decimal)
                .column("price_currency", ColumnType::Text)
                .alias("colour", "color")
                .association(Association::belongs_to("owner", "User"))
                .association(Association::belongs_to("creator", "User"))
                .association(Association::has_many("parts", "Part", "widget_id"))
                .aggregation(
                    Aggregation::new("price")
                        .map("amount", "price_amount")
                        .map("currency", "price_currency"),
                )
                .enum_attribute(
                    "state",
                    EnumDefinition::from_pairs([("active", 1), ("archived", 2)]),
                ),
        )
}

pub fn widget_adapter() -> RelationalAdapter {
    RelationalAdapter::for_entity(Arc::new(sample_catalog()), "Widget")
        .expect("Widget is registered in the sample catalog")
}

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
