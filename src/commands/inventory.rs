//! Inventory command handlers.

use crate::args::{AddInventoryArgs, AdjustInventoryArgs, DeleteArgs};
use crate::commands::{generate_id, Out};
use crate::model::InventoryItem;
use crate::{Ledger, Result};
use anyhow::{bail, ensure};

/// Adds a stocked supply with a generated `inv-` id.
pub async fn add_inventory_item(
    ledger: &Ledger,
    args: AddInventoryArgs,
) -> Result<Out<InventoryItem>> {
    ensure!(!args.name().trim().is_empty(), "The item name must not be empty");
    ensure!(
        args.quantity() >= rust_decimal::Decimal::ZERO,
        "The starting quantity must not be negative, got '{}'",
        args.quantity()
    );

    let item = InventoryItem {
        id: generate_id("inv"),
        name: args.name().trim().to_string(),
        category: args.category().clone(),
        quantity: args.quantity(),
        unit: args.unit().clone(),
        price_per_unit: args.price_per_unit(),
    };
    ledger.save_inventory_item(item.clone()).await;

    let message = format!(
        "Added '{}' with {} {} in stock, ID: {}",
        item.name, item.quantity, item.unit, item.id
    );
    Ok(Out::new(message, item))
}

/// Lists all inventory items with their current stock.
pub async fn list_inventory(ledger: &Ledger) -> Result<Out<Vec<InventoryItem>>> {
    let items = ledger.inventory().await;
    let mut lines = vec![format!("{} inventory item(s)", items.len())];
    for item in &items {
        lines.push(format!(
            "{:<20} {:>10} {:<6} {:<12} [{}]",
            item.name,
            item.quantity.to_string(),
            item.unit.to_string(),
            item.category.to_string(),
            item.id
        ));
    }
    Ok(Out::new(lines.join("\n"), items))
}

/// Applies a signed stock adjustment and reports the new quantity. Negative stock is
/// allowed so a missed entry can be corrected later.
///
/// # Errors
///
/// Returns an error when no item has the given id.
pub async fn adjust_inventory(
    ledger: &Ledger,
    args: AdjustInventoryArgs,
) -> Result<Out<InventoryItem>> {
    if ledger.inventory_item(args.id()).await.is_none() {
        bail!("No inventory item found with ID: {}", args.id());
    }
    ledger.adjust_inventory(args.id(), args.delta()).await;
    let Some(item) = ledger.inventory_item(args.id()).await else {
        bail!("No inventory item found with ID: {}", args.id());
    };

    let message = format!(
        "Adjusted '{}' by {}; now {} {} in stock",
        item.name,
        args.delta(),
        item.quantity,
        item.unit
    );
    Ok(Out::new(message, item))
}

/// Deletes an inventory item by id. Transactions that linked the item are kept.
pub async fn delete_inventory_item(ledger: &Ledger, args: DeleteArgs) -> Result<Out<String>> {
    ledger.delete_inventory_item(args.id()).await;
    let message = format!("Deleted inventory item with ID: {}", args.id());
    Ok(Out::new(message, args.id().to_string()))
}
