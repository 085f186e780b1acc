//! Dashboard page with inventory headline cards and restock alerts.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. Products and sales are fetched once on
//! mount; the cards are derived locally through `util::table`.

use leptos::prelude::*;

use crate::net::api::{Api, ApiError};
use crate::net::types::{Product, Sale};
use crate::util::table::{StockStatus, dashboard_stats, format_currency, low_stock};

type Snapshot = (Vec<Product>, Vec<Sale>);

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = Api::expect();
    let data = RwSignal::new(None::<Result<Snapshot, ApiError>>);

    leptos::task::spawn_local(async move {
        data.set(Some(load(api).await));
    });

    let body = move || match data.get() {
        None => view! { <p class="dashboard__status">"Loading inventory..."</p> }.into_any(),
        Some(Err(e)) => view! { <p class="dashboard__status dashboard__status--error">{e.to_string()}</p> }.into_any(),
        Some(Ok((products, sales))) => {
            let stats = dashboard_stats(&products, &sales);
            let alerts = low_stock(&products)
                .into_iter()
                .map(|p| {
                    let status = StockStatus::of(p.quantity, p.min_stock_level);
                    view! {
                        <li class="dashboard__alert">
                            <span class="dashboard__alert-name">{p.name.clone()}</span>
                            <span class="dashboard__alert-sku">{p.sku.clone()}</span>
                            <span class="dashboard__alert-qty">
                                {format!("{} / min {}", p.quantity, p.min_stock_level)}
                            </span>
                            <span class=status.class()>{status.label()}</span>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <div class="dashboard__cards">
                    <StatCard label="Total Products" value=stats.total_products.to_string()/>
                    <StatCard label="Total Sales" value=stats.total_sales.to_string()/>
                    <StatCard label="Revenue" value=format_currency(stats.total_revenue)/>
                    <StatCard label="Low Stock" value=stats.low_stock_products.to_string()/>
                </div>
                <section class="dashboard__section">
                    <h2>"Low Stock Alerts"</h2>
                    {if stats.low_stock_products == 0 {
                        view! { <p class="dashboard__empty">"All products are sufficiently stocked."</p> }.into_any()
                    } else {
                        view! { <ul class="dashboard__alerts">{alerts}</ul> }.into_any()
                    }}
                </section>
            }
            .into_any()
        }
    };

    view! {
        <div class="dashboard-page">
            <h1 class="dashboard-page__title">"Dashboard"</h1>
            {body}
        </div>
    }
}

async fn load(api: Api) -> Result<Snapshot, ApiError> {
    Ok((api.products().await?, api.sales().await?))
}

#[component]
fn StatCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__label">{label}</span>
            <span class="stat-card__value">{value}</span>
        </div>
    }
}
