use std::path::PathBuf;
use std::sync::Arc;

use storefront_pages::content::ContentBundle;
use storefront_pages::pages::PageDescriptor;
use storefront_pages::rewrites::{RewriteRule, RewriteTable};
use storefront_pages::slugs::SlugMap;

fn page(slug: &str) -> PageDescriptor {
    PageDescriptor {
        template_path: PathBuf::from("/site/src/views/pages/index.html"),
        slug: slug.to_string(),
        shared_params: Arc::new(ContentBundle::empty()),
    }
}

#[test]
fn test_page_rules() {
    let table = RewriteTable::from_pages(&[page("index"), page("account/orders")]).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.resolve("/index"), Some("/index.html"));
    assert_eq!(table.resolve("/account/orders"), Some("/account/orders.html"));
    assert_eq!(table.resolve("/index/more"), None);
    assert_eq!(table.resolve("/ind"), None);
}

#[test]
fn test_slug_map_rules_skip_empty_slugs() {
    let mut table = RewriteTable::default();
    let slugs: SlugMap = [("products", vec!["shoe", "", "hat"])].into_iter().collect();

    table.extend_from_slug_map(&slugs).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.resolve("/shoe"), Some("/_products.html"));
    assert_eq!(table.resolve("/hat"), Some("/_products.html"));
    assert_eq!(table.resolve("/"), None);
}

#[test]
fn test_slug_is_matched_literally() {
    let rule = RewriteRule::new("shoe.v2", "/_products.html".to_string()).unwrap();
    assert!(rule.matches("/shoe.v2"));
    assert!(!rule.matches("/shoexv2"));
    assert_eq!(rule.pattern.as_str(), r"^/shoe\.v2$");
}

#[test]
fn test_duplicate_routes_first_match_wins() {
    let mut table = RewriteTable::from_pages(&[page("sale")]).unwrap();
    let slugs: SlugMap = [("categories", vec!["sale"])].into_iter().collect();
    table.extend_from_slug_map(&slugs).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.rules()[1].target, "/_categories.html");
    assert_eq!(table.resolve("/sale"), Some("/sale.html"));
}

#[test]
fn test_serializes_as_from_to_pairs() {
    let table = RewriteTable::from_pages(&[page("cart")]).unwrap();
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(value, serde_json::json!([{"from": "^/cart$", "to": "/cart.html"}]));
}
