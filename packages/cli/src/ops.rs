//! Worker-side operations: one load-mutate-save cycle each.
//!
//! A worker serves exactly one operation and never touches the terminal.
//! [`run`] is the worker boundary: it reads the request payload, executes,
//! and turns every domain failure into the result message the coordinator
//! will print - nothing escapes as a hard error.

use std::path::Path;

use till_records::{Product, ProductKind, Transaction, User};
use till_store::{fileio, next_id};

use crate::context::StoreContext;
use crate::error::OpError;
use crate::request::{OpKind, Request};

/// Multiplier applied to the final price for VIP buyers.
const VIP_DISCOUNT: f64 = 0.9;

/// One-time fee debited by the upgrade operation.
const VIP_FEE: f64 = 20.0;

/// Serve one operation end to end, yielding the result message.
pub fn run(kind: OpKind, ctx: &StoreContext, request_path: Option<&Path>) -> String {
    match execute(kind, ctx, request_path) {
        Ok(message) => message,
        Err(err) => err.into_message(),
    }
}

fn execute(
    kind: OpKind,
    ctx: &StoreContext,
    request_path: Option<&Path>,
) -> Result<String, OpError> {
    if !kind.needs_request() {
        return match kind {
            OpKind::ListProducts => list_products(ctx),
            OpKind::ListUsers => list_users(ctx),
            _ => unreachable!("every other kind needs a request"),
        };
    }

    let path = request_path
        .ok_or_else(|| OpError::MalformedRequest("missing request payload".into()))?;
    let payload = fileio::read_text(path)?
        .ok_or_else(|| OpError::MalformedRequest("empty request payload".into()))?;

    match Request::parse(kind, &payload)? {
        Request::AddProduct { name, price, kind } => add_product(ctx, name, price, kind),
        Request::RegisterUser { name, balance } => register_user(ctx, name, balance),
        Request::Purchase {
            user_id,
            product_id,
        } => purchase(ctx, user_id, product_id),
        Request::UpgradeVip { user_id } => upgrade_vip(ctx, user_id),
    }
}

fn list_products(ctx: &StoreContext) -> Result<String, OpError> {
    let mut products = ctx.products.load_all()?;
    products.sort_by(|a, b| a.final_price().total_cmp(&b.final_price()));

    let mut out = String::from("-- products --\n");
    for product in &products {
        out.push_str(&product.to_string());
        out.push('\n');
    }
    Ok(out)
}

fn list_users(ctx: &StoreContext) -> Result<String, OpError> {
    let users = ctx.users.load_all()?;

    let mut out = String::from("-- users --\n");
    for user in &users {
        out.push_str(&user.to_string());
        out.push('\n');
    }
    Ok(out)
}

fn add_product(
    ctx: &StoreContext,
    name: String,
    price: f64,
    kind: ProductKind,
) -> Result<String, OpError> {
    let id = ctx.products.update(|products| {
        let id = next_id(products);
        products.push(Product {
            id,
            name,
            price,
            kind,
        });
        id
    })?;
    Ok(format!("added product, ID={}", id))
}

fn register_user(ctx: &StoreContext, name: String, balance: f64) -> Result<String, OpError> {
    let id = ctx.users.update(|users| {
        let id = next_id(users);
        users.push(User::new(id, name, balance));
        id
    })?;
    Ok(format!("registered user, ID={}", id))
}

fn purchase(ctx: &StoreContext, user_id: u32, product_id: u32) -> Result<String, OpError> {
    let products = ctx.products.load_all()?;
    let product = products
        .into_iter()
        .find(|p| p.id == product_id)
        .ok_or(OpError::NotFound("product"))?;

    // Price, debit, and write-back happen under one exclusive lock on the
    // user resource; a refused charge mutates nothing, so the write-back is
    // skipped and the resource stays untouched.
    let (paid, balance) = ctx.users.update(|users| {
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(OpError::NotFound("user"))?;

        let mut price = product.final_price();
        if user.vip {
            price *= VIP_DISCOUNT;
        }
        if !user.charge(price) {
            return Err(OpError::InsufficientFunds);
        }
        Ok((price, user.balance))
    })??;

    ctx.transactions.update(|transactions| {
        let id = next_id(transactions);
        transactions.push(Transaction {
            id,
            user_id,
            product_id,
            qty: 1,
            total: paid,
        });
    })?;

    Ok(format!(
        "final price: ${:.2}\npurchase complete, balance left ${:.2}",
        paid, balance
    ))
}

fn upgrade_vip(ctx: &StoreContext, user_id: u32) -> Result<String, OpError> {
    let balance = ctx.users.update(|users| {
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(OpError::NotFound("user"))?;

        if !user.charge(VIP_FEE) {
            return Err(OpError::InsufficientFunds);
        }
        user.vip = true;
        Ok(user.balance)
    })??;

    Ok(format!(
        "upgrade complete, now VIP, balance left ${:.2}",
        balance
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_store::fileio::write_text;

    fn ctx_in(dir: &tempfile::TempDir) -> StoreContext {
        StoreContext::open(dir.path())
    }

    fn request_file(dir: &tempfile::TempDir, payload: &str) -> std::path::PathBuf {
        let path = dir.path().join("request.tmp");
        write_text(&path, payload).unwrap();
        path
    }

    #[test]
    fn add_product_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);

        for (i, payload) in ["P|Lamp|20|5", "D|Song|1.29", "D|Movie|4.99"]
            .iter()
            .enumerate()
        {
            let req = request_file(&dir, payload);
            let msg = run(OpKind::AddProduct, &ctx, Some(&req));
            assert_eq!(msg, format!("added product, ID={}", i + 1));
        }

        let products = ctx.products.load_all().unwrap();
        let ids: Vec<u32> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn list_products_sorts_by_final_price() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.products
            .save_all(&[
                Product::physical(1, "Lamp", 20.0, 5.0),
                Product::digital(2, "Song", 1.29),
            ])
            .unwrap();

        let msg = run(OpKind::ListProducts, &ctx, None);
        let song = msg.find("Song").unwrap();
        let lamp = msg.find("Lamp").unwrap();
        assert!(song < lamp, "cheaper final price should list first");
    }

    #[test]
    fn purchase_applies_vip_discount_and_records_transaction() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.products
            .save_all(&[Product::physical(1, "Lamp", 20.0, 5.0)])
            .unwrap();
        ctx.users
            .save_all(&[User {
                id: 1,
                name: "alice".into(),
                balance: 100.0,
                vip: true,
            }])
            .unwrap();

        let req = request_file(&dir, "1|1");
        let msg = run(OpKind::Purchase, &ctx, Some(&req));
        assert!(msg.contains("$22.50"), "got: {}", msg);
        assert!(msg.contains("$77.50"), "got: {}", msg);

        let users = ctx.users.load_all().unwrap();
        assert!((users[0].balance - 77.5).abs() < 1e-9);

        let transactions = ctx.transactions.load_all().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].user_id, 1);
        assert_eq!(transactions[0].product_id, 1);
        assert!((transactions[0].total - 22.5).abs() < 1e-9);
    }

    #[test]
    fn purchase_without_discount_for_regular_user() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.products
            .save_all(&[Product::digital(1, "Song", 10.0)])
            .unwrap();
        ctx.users.save_all(&[User::new(1, "bob", 15.0)]).unwrap();

        let req = request_file(&dir, "1|1");
        let msg = run(OpKind::Purchase, &ctx, Some(&req));
        assert!(msg.contains("$10.00"), "got: {}", msg);
        assert!(msg.contains("$5.00"), "got: {}", msg);
    }

    #[test]
    fn purchase_of_unknown_product_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.users.save_all(&[User::new(1, "bob", 15.0)]).unwrap();

        let req = request_file(&dir, "1|42");
        let msg = run(OpKind::Purchase, &ctx, Some(&req));
        assert_eq!(msg, "product not found");

        assert_eq!(ctx.users.load_all().unwrap()[0].balance, 15.0);
        assert!(ctx.transactions.load_all().unwrap().is_empty());
    }

    #[test]
    fn purchase_by_unknown_user_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.products
            .save_all(&[Product::digital(1, "Song", 1.0)])
            .unwrap();

        let req = request_file(&dir, "9|1");
        assert_eq!(run(OpKind::Purchase, &ctx, Some(&req)), "user not found");
    }

    #[test]
    fn insufficient_funds_leaves_resources_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.products
            .save_all(&[Product::digital(1, "Expensive", 1000.0)])
            .unwrap();
        ctx.users.save_all(&[User::new(1, "bob", 5.0)]).unwrap();
        let before = std::fs::read_to_string(ctx.users.path()).unwrap();

        let req = request_file(&dir, "1|1");
        let msg = run(OpKind::Purchase, &ctx, Some(&req));
        assert_eq!(msg, "insufficient funds");

        assert_eq!(std::fs::read_to_string(ctx.users.path()).unwrap(), before);
        assert!(ctx.transactions.load_all().unwrap().is_empty());
    }

    #[test]
    fn upgrade_charges_fee_and_sets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.users.save_all(&[User::new(1, "alice", 100.0)]).unwrap();

        let req = request_file(&dir, "1");
        let msg = run(OpKind::UpgradeVip, &ctx, Some(&req));
        assert!(msg.contains("now VIP"), "got: {}", msg);

        let users = ctx.users.load_all().unwrap();
        assert!(users[0].vip);
        assert!((users[0].balance - 80.0).abs() < 1e-9);
    }

    #[test]
    fn upgrade_without_funds_keeps_flag_and_balance() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);
        ctx.users.save_all(&[User::new(1, "alice", 5.0)]).unwrap();

        let req = request_file(&dir, "1");
        assert_eq!(run(OpKind::UpgradeVip, &ctx, Some(&req)), "insufficient funds");

        let users = ctx.users.load_all().unwrap();
        assert!(!users[0].vip);
        assert_eq!(users[0].balance, 5.0);
    }

    #[test]
    fn malformed_payload_becomes_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);

        let req = request_file(&dir, "only-one-field");
        let msg = run(OpKind::RegisterUser, &ctx, Some(&req));
        assert!(msg.starts_with("invalid request"), "got: {}", msg);
    }

    #[test]
    fn missing_request_file_becomes_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ctx_in(&dir);

        let absent = dir.path().join("never-written.tmp");
        let msg = run(OpKind::UpgradeVip, &ctx, Some(&absent));
        assert!(msg.starts_with("invalid request"), "got: {}", msg);
    }
}
