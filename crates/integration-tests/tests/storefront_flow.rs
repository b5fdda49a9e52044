//! End-to-end storefront flows over the bundled dataset.

use fiber_fit_core::{Page, Price};
use fiber_fit_integration_tests::embedded_config;
use fiber_fit_storefront::AppState;
use fiber_fit_storefront::filter::filter_products;
use fiber_fit_storefront::pages::{PageBody, PageQuery};

async fn state() -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let state = AppState::init(embedded_config(&dir.path().join("storage.json")))
        .await
        .expect("init");
    (state, dir)
}

// =============================================================================
// Browsing
// =============================================================================

#[tokio::test]
async fn test_filter_identity_on_bundled_catalog() {
    let (state, _dir) = state().await;
    let products = state.catalog().products();

    let all = filter_products(products, "all", Some(""));
    let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
    let expected: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_search_ragi_in_flour() {
    let (state, _dir) = state().await;

    let found = filter_products(state.catalog().products(), "flour", Some("ragi"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Organic Ragi Flour");
}

#[tokio::test]
async fn test_blog_page_lists_featured_post() {
    let (state, _dir) = state().await;

    let view = state.page(Page::from_slug("blog.html"), &PageQuery::default());
    let PageBody::Blog(blog) = view.body else {
        panic!("blog slug should render the blog page");
    };
    assert_eq!(blog.posts.len(), 1);
    assert!(blog.posts[0].featured);
    assert_eq!(blog.posts[0].published, "October 15, 2024");
}

// =============================================================================
// Shopping
// =============================================================================

#[tokio::test]
async fn test_add_update_remove_flow() {
    let (mut state, _dir) = state().await;

    state.add_to_cart("ragi-flour", 2, None).expect("add");
    state.add_to_cart("ragi-flour", 3, None).expect("add");
    assert_eq!(state.cart().line("ragi-flour", None).expect("line").quantity, 5);

    state.add_to_cart("jowar-flour", 1, None).expect("add");
    state.update_quantity("ragi-flour", None, 2).expect("update");
    assert_eq!(state.cart_totals().total_price, Price::from_whole(273));

    state.update_quantity("ragi-flour", None, 0).expect("update");
    state.remove_from_cart("jowar-flour", None).expect("remove");
    state.remove_from_cart("jowar-flour", None).expect("remove again");
    assert!(state.cart().is_empty());

    let view = state.page(Page::Index, &PageQuery::default());
    assert_eq!(view.cart.item_count, 0);
}

#[tokio::test]
async fn test_add_recipe_ingredients() {
    let (mut state, _dir) = state().await;

    let notice = state
        .add_recipe_to_cart("jowar-roti")
        .expect("add recipe")
        .expect("Recipe links a catalog product");

    assert_eq!(notice.message, "1 ingredients from Jowar Roti");
    assert!(state.cart().line("jowar-flour", None).is_some());
}

#[tokio::test]
async fn test_cart_view_after_mutation() {
    let (mut state, _dir) = state().await;
    state.add_to_cart("ragi-flour", 2, Some("1kg")).expect("add");

    let view = state.cart_view();
    assert_eq!(view.item_count, 2);
    assert_eq!(view.subtotal, "₹178.00");
    assert_eq!(view.items[0].size.as_deref(), Some("1kg"));

    state.clear_cart().expect("clear");
    assert!(state.cart_view().is_empty());
}
