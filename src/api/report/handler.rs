//! Report Handlers
//!
//! Aggregates the catalog and the trailing order window in memory on
//! every request; the work is O(orders × items) and nothing is cached.

use std::collections::{BTreeMap, HashMap};

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Order, Product, Supplier};
use crate::db::repository::{OrderRepository, ProductRepository, SupplierRepository};
use crate::utils::{AppResult, time};

/// Stock bucket threshold: at or below this (and above zero) is low stock
const LOW_STOCK_THRESHOLD: i64 = 10;

/// How many top products the report carries
const TOP_PRODUCT_COUNT: usize = 5;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevels {
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProductCount {
    pub supplier_name: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderVolume {
    pub supplier_name: String,
    pub order_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub stock_levels: StockLevels,
    pub revenue_by_day: BTreeMap<String, f64>,
    pub top_products: Vec<TopProduct>,
    pub supplier_product_count: Vec<SupplierProductCount>,
    pub supplier_order_volume: Vec<SupplierOrderVolume>,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Trailing window length in days
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    30
}

// ============================================================================
// Aggregation
// ============================================================================

fn stock_levels(products: &[Product]) -> StockLevels {
    StockLevels {
        in_stock: products
            .iter()
            .filter(|p| p.quantity > LOW_STOCK_THRESHOLD)
            .count(),
        low_stock: products
            .iter()
            .filter(|p| p.quantity > 0 && p.quantity <= LOW_STOCK_THRESHOLD)
            .count(),
        out_of_stock: products.iter().filter(|p| p.quantity == 0).count(),
    }
}

fn revenue_by_day(orders: &[Order]) -> BTreeMap<String, f64> {
    let mut revenue = BTreeMap::new();
    for order in orders {
        let day = time::day_string(order.order_date);
        *revenue.entry(day).or_insert(0.0) += order.total_amount;
    }
    revenue
}

fn top_products(orders: &[Order], products: &[Product]) -> Vec<TopProduct> {
    let names: HashMap<String, &str> = products
        .iter()
        .filter_map(|p| p.id.map(|oid| (oid.to_hex(), p.name.as_str())))
        .collect();

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for order in orders {
        for item in &order.items {
            *counts.entry(item.product_id.as_str()).or_insert(0) += item.quantity;
        }
    }

    let mut ranked: Vec<(&str, i64)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOP_PRODUCT_COUNT)
        .map(|(product_id, count)| TopProduct {
            name: names.get(product_id).map_or_else(
                || "Unknown".to_string(),
                |name| (*name).to_string(),
            ),
            count,
        })
        .collect()
}

fn supplier_product_counts(
    suppliers: &[Supplier],
    products: &[Product],
) -> Vec<SupplierProductCount> {
    suppliers
        .iter()
        .map(|supplier| {
            let id = supplier.id.map(|oid| oid.to_hex()).unwrap_or_default();
            SupplierProductCount {
                supplier_name: supplier.name.clone(),
                product_count: products
                    .iter()
                    .filter(|p| p.supplier_id.as_deref() == Some(id.as_str()))
                    .count(),
            }
        })
        .collect()
}

/// An order counts for a supplier when any of its line items' product
/// belongs to that supplier.
fn supplier_order_volumes(
    suppliers: &[Supplier],
    products: &[Product],
    orders: &[Order],
) -> Vec<SupplierOrderVolume> {
    suppliers
        .iter()
        .map(|supplier| {
            let id = supplier.id.map(|oid| oid.to_hex()).unwrap_or_default();
            let supplier_product_ids: Vec<String> = products
                .iter()
                .filter(|p| p.supplier_id.as_deref() == Some(id.as_str()))
                .filter_map(|p| p.id.map(|oid| oid.to_hex()))
                .collect();

            let order_count = orders
                .iter()
                .filter(|o| {
                    o.items
                        .iter()
                        .any(|item| supplier_product_ids.contains(&item.product_id))
                })
                .count();

            SupplierOrderVolume {
                supplier_name: supplier.name.clone(),
                order_count,
            }
        })
        .collect()
}

// ============================================================================
// Handler
// ============================================================================

/// GET /api/report - stock, revenue, and supplier aggregates
pub async fn report(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportResponse>> {
    let product_repo = ProductRepository::new(state.get_db());
    let supplier_repo = SupplierRepository::new(state.get_db());
    let order_repo = OrderRepository::new(state.get_db());

    let products = product_repo.find_all().await?;
    let suppliers = supplier_repo.find_all().await?;
    let orders = order_repo
        .find_since(time::window_start_millis(query.days))
        .await?;

    let response = ReportResponse {
        stock_levels: stock_levels(&products),
        revenue_by_day: revenue_by_day(&orders),
        top_products: top_products(&orders, &products),
        supplier_product_count: supplier_product_counts(&suppliers, &products),
        supplier_order_volume: supplier_order_volumes(&suppliers, &products, &orders),
        products,
        orders,
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{OrderItem, OrderStatus};
    use bson::oid::ObjectId;

    fn product(id: &str, name: &str, quantity: i64, supplier_id: Option<&str>) -> Product {
        Product {
            id: Some(ObjectId::parse_str(id).unwrap()),
            name: name.to_string(),
            price: 10.0,
            quantity,
            image_url: None,
            category: None,
            supplier_id: supplier_id.map(str::to_string),
            created_at: 0,
            updated_at: None,
        }
    }

    fn supplier(id: &str, name: &str) -> Supplier {
        Supplier {
            id: Some(ObjectId::parse_str(id).unwrap()),
            name: name.to_string(),
            contact_email: "sales@example.com".to_string(),
            contact_phone: None,
            address: None,
            product_count: None,
        }
    }

    fn order(order_date: i64, total: f64, lines: &[(&str, i64)]) -> Order {
        Order {
            id: Some(ObjectId::new()),
            customer_id: "65f0a1b2c3d4e5f6a7b8c9ff".to_string(),
            items: lines
                .iter()
                .map(|(pid, qty)| OrderItem {
                    product_id: pid.to_string(),
                    quantity: *qty,
                    price: 10.0,
                })
                .collect(),
            total_amount: total,
            status: OrderStatus::Processing,
            order_date,
            updated_at: None,
        }
    }

    const P1: &str = "65f0a1b2c3d4e5f6a7b8c901";
    const P2: &str = "65f0a1b2c3d4e5f6a7b8c902";
    const P3: &str = "65f0a1b2c3d4e5f6a7b8c903";
    const S1: &str = "65f0a1b2c3d4e5f6a7b8c9a1";
    const S2: &str = "65f0a1b2c3d4e5f6a7b8c9a2";

    #[test]
    fn test_stock_levels_threshold_boundaries() {
        let products = vec![
            product(P1, "plenty", 11, None),
            product(P2, "low", 10, None),
            product(P3, "one", 1, None),
            product("65f0a1b2c3d4e5f6a7b8c904", "gone", 0, None),
        ];

        let levels = stock_levels(&products);
        assert_eq!(
            levels,
            StockLevels {
                in_stock: 1,
                low_stock: 2,
                out_of_stock: 1,
            }
        );
    }

    #[test]
    fn test_revenue_groups_by_calendar_day() {
        let day1_morning = 1_709_251_200_000; // 2024-03-01T00:00:00Z
        let day1_evening = 1_709_330_400_000; // 2024-03-01T22:00:00Z
        let day2 = 1_709_337_600_000; // 2024-03-02T00:00:00Z

        let orders = vec![
            order(day1_morning, 100.0, &[(P1, 1)]),
            order(day1_evening, 50.0, &[(P1, 1)]),
            order(day2, 25.0, &[(P1, 1)]),
        ];

        let revenue = revenue_by_day(&orders);
        assert_eq!(revenue.len(), 2);
        assert!((revenue["2024-03-01"] - 150.0).abs() < 1e-9);
        assert!((revenue["2024-03-02"] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_products_ranked_by_quantity() {
        let products = vec![
            product(P1, "alpha", 5, None),
            product(P2, "beta", 5, None),
        ];
        let orders = vec![
            order(0, 0.0, &[(P1, 2), (P2, 7)]),
            order(0, 0.0, &[(P1, 1)]),
        ];

        let top = top_products(&orders, &products);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "beta");
        assert_eq!(top[0].count, 7);
        assert_eq!(top[1].name, "alpha");
        assert_eq!(top[1].count, 3);
    }

    #[test]
    fn test_top_products_caps_at_five_and_handles_unknown() {
        let products: Vec<Product> = Vec::new();
        let lines: Vec<(String, i64)> = (1..=7)
            .map(|i| (format!("65f0a1b2c3d4e5f6a7b8c90{i}"), i))
            .collect();
        let line_refs: Vec<(&str, i64)> =
            lines.iter().map(|(id, q)| (id.as_str(), *q)).collect();
        let orders = vec![order(0, 0.0, &line_refs)];

        let top = top_products(&orders, &products);
        assert_eq!(top.len(), 5);
        assert!(top.iter().all(|t| t.name == "Unknown"));
        assert_eq!(top[0].count, 7);
        assert_eq!(top[4].count, 3);
    }

    #[test]
    fn test_supplier_product_counts() {
        let suppliers = vec![supplier(S1, "Acme"), supplier(S2, "Globex")];
        let products = vec![
            product(P1, "a", 1, Some(S1)),
            product(P2, "b", 1, Some(S1)),
            product(P3, "c", 1, None),
        ];

        let counts = supplier_product_counts(&suppliers, &products);
        assert_eq!(counts[0].supplier_name, "Acme");
        assert_eq!(counts[0].product_count, 2);
        assert_eq!(counts[1].supplier_name, "Globex");
        assert_eq!(counts[1].product_count, 0);
    }

    #[test]
    fn test_supplier_order_volume_counts_orders_not_lines() {
        let suppliers = vec![supplier(S1, "Acme"), supplier(S2, "Globex")];
        let products = vec![
            product(P1, "a", 1, Some(S1)),
            product(P2, "b", 1, Some(S1)),
            product(P3, "c", 1, Some(S2)),
        ];
        // Both lines belong to Acme: still one order
        let orders = vec![
            order(0, 0.0, &[(P1, 1), (P2, 1)]),
            order(0, 0.0, &[(P3, 1)]),
        ];

        let volumes = supplier_order_volumes(&suppliers, &products, &orders);
        assert_eq!(volumes[0].order_count, 1);
        assert_eq!(volumes[1].order_count, 1);
    }
}
