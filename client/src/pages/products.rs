//! Product inventory table with search, pagination and delete.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use leptos::prelude::*;

use crate::net::api::Api;
use crate::net::types::{Category, Product};
use crate::state::notify::Notifier;
use crate::util::table::{ROWS_PER_PAGE, StockStatus, filter_products, format_currency, page_count, paginate};

/// Display name for a product's category: the expanded record if present,
/// otherwise a lookup by id, otherwise "Uncategorized".
pub(crate) fn category_name(product: &Product, categories: &[Category]) -> String {
    product
        .category
        .as_ref()
        .or_else(|| categories.iter().find(|c| c.id == product.category_id))
        .map_or_else(|| "Uncategorized".to_owned(), |c| c.name.clone())
}

/// Keep `page` inside `0..pages` after the result set shrinks.
pub(crate) fn clamp_page(page: usize, pages: usize) -> usize {
    page.min(pages.saturating_sub(1))
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let api = Api::expect();
    let notify = Notifier::expect();

    let products = RwSignal::new(Vec::<Product>::new());
    let categories = RwSignal::new(Vec::<Category>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let query = RwSignal::new(String::new());
    let page = RwSignal::new(0_usize);

    leptos::task::spawn_local(async move {
        match api.products().await {
            Ok(list) => products.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
        // Names are cosmetic; a failed lookup falls back to "Uncategorized".
        if let Ok(list) = api.categories().await {
            categories.set(list);
        }
        loading.set(false);
    });

    let pages = move || products.with(|all| page_count(filter_products(all, &query.get()).len(), ROWS_PER_PAGE));
    let current_page = move || clamp_page(page.get(), pages());

    let on_delete = move |id: String| {
        leptos::task::spawn_local(async move {
            match api.delete_product(&id).await {
                Ok(()) => {
                    products.update(|all| all.retain(|p| p.id != id));
                    notify.success("Product deleted");
                }
                Err(e) => notify.error(e.to_string()),
            }
        });
    };

    let rows = move || {
        let query = query.get();
        let page = current_page();
        products.with(|all| {
            categories.with(|cats| {
                let filtered = filter_products(all, &query);
                paginate(&filtered, page, ROWS_PER_PAGE)
                    .iter()
                    .map(|p| {
                        let status = StockStatus::of(p.quantity, p.min_stock_level);
                        let id = p.id.clone();
                        view! {
                            <tr class="products-table__row">
                                <td>{p.name.clone()}</td>
                                <td class="products-table__sku">{p.sku.clone()}</td>
                                <td>{category_name(p, cats)}</td>
                                <td class="products-table__num">{format_currency(p.price)}</td>
                                <td class="products-table__num">{p.quantity}</td>
                                <td><span class=status.class()>{status.label()}</span></td>
                                <td>
                                    <button
                                        class="btn btn--danger"
                                        title="Delete product"
                                        on:click=move |_| on_delete(id.clone())
                                    >
                                        "Delete"
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()
            })
        })
    };

    view! {
        <div class="products-page">
            <h1 class="products-page__title">"Products"</h1>
            <input
                class="products-page__search"
                type="search"
                placeholder="Search by name or SKU"
                prop:value=move || query.get()
                on:input=move |ev| {
                    query.set(event_target_value(&ev));
                    page.set(0);
                }
            />
            <Show when=move || error.get().is_some()>
                <p class="products-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="products-page__status">"Loading products..."</p> }
            >
                <table class="products-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"SKU"</th>
                            <th>"Category"</th>
                            <th>"Price"</th>
                            <th>"Quantity"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                <div class="products-page__pager">
                    <button
                        class="btn"
                        disabled=move || current_page() == 0
                        on:click=move |_| page.set(current_page().saturating_sub(1))
                    >
                        "Previous"
                    </button>
                    <span class="products-page__page">
                        {move || format!("Page {} of {}", current_page() + 1, pages())}
                    </span>
                    <button
                        class="btn"
                        disabled=move || current_page() + 1 >= pages()
                        on:click=move |_| page.set(current_page() + 1)
                    >
                        "Next"
                    </button>
                </div>
            </Show>
        </div>
    }
}
