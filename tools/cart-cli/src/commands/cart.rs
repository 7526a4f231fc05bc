//! Cart commands.

use anyhow::{bail, Result};
use cart_commerce::prelude::*;
use serde::Serialize;

use super::{ProductArgs, UpdateArgs};
use crate::context::Context;
use crate::output::truncate;

const WIDTHS: [usize; 5] = [6, 32, 6, 10, 10];

/// JSON view of the cart.
#[derive(Serialize)]
struct CartView<'a> {
    items: &'a Cart,
    item_count: u64,
    total: Money,
}

/// Show the cart.
pub async fn show(ctx: &Context) -> Result<()> {
    let manager = ctx.manager()?;
    print_cart(manager.cart(), ctx)
}

/// List catalog products with the amount already in the cart.
pub async fn products(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let manager = ctx.manager_with(catalog.clone())?;
    let in_cart = manager.cart().amounts_by_product();

    if ctx.output.is_json() {
        let rows: Vec<_> = catalog
            .products()
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "product": p,
                    "in_cart": in_cart.get(&p.id).copied().unwrap_or(0),
                })
            })
            .collect();
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Products");
    let widths = [6, 32, 10, 8];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "IN CART"], &widths);
    for product in catalog.products() {
        let amount = in_cart.get(&product.id).copied().unwrap_or(0);
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &truncate(&product.title, widths[1]),
                &product.price.display(),
                &amount.to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}

/// Add one unit of a product.
pub async fn add(args: ProductArgs, ctx: &Context) -> Result<()> {
    run(
        CartCommand::Add {
            product_id: args.product_id,
        },
        ctx,
    )
    .await
}

/// Remove a product.
pub async fn remove(args: ProductArgs, ctx: &Context) -> Result<()> {
    run(
        CartCommand::Remove {
            product_id: args.product_id,
        },
        ctx,
    )
    .await
}

/// Set the quantity of a product.
pub async fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    run(
        CartCommand::UpdateAmount(UpdateProductAmount {
            product_id: args.product_id,
            amount: args.amount,
        }),
        ctx,
    )
    .await
}

/// Dispatch a command through the cart boundary and print the outcome.
async fn run(command: CartCommand, ctx: &Context) -> Result<()> {
    let mut manager = ctx.manager()?;

    if let Some(notice) = manager.dispatch(command).await {
        bail!("{}", notice);
    }

    match command {
        CartCommand::Add { product_id } => {
            ctx.output.success(&format!("Added product {}", product_id))
        }
        CartCommand::Remove { product_id } => {
            ctx.output.success(&format!("Removed product {}", product_id))
        }
        CartCommand::UpdateAmount(UpdateProductAmount { product_id, amount }) => {
            match manager.cart().get(product_id) {
                Some(item) if i64::from(item.amount) == amount => ctx
                    .output
                    .success(&format!("Product {} quantity set to {}", product_id, amount)),
                _ => ctx.output.info("Cart unchanged"),
            }
        }
    }
    print_cart(manager.cart(), ctx)
}

fn print_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    let total = cart.total()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            items: cart,
            item_count: cart.item_count(),
            total,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "TITLE", "AMOUNT", "PRICE", "SUBTOTAL"], &WIDTHS);
    for item in cart {
        ctx.output.table_row(
            &[
                &item.product_id.to_string(),
                &item.title,
                &item.amount.to_string(),
                &item.unit_price.display(),
                &item.subtotal()?.display(),
            ],
            &WIDTHS,
        );
    }
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("total", &total.display());
    Ok(())
}
