//! Operation kinds and their one-line request payloads.
//!
//! Payload formats, `|`-separated, parsed by the worker (not the menu):
//! - add-product: `type|name|price|extra` (`P` physical with shipping, `D` digital)
//! - register-user: `name|balance`
//! - purchase: `userId|productId`
//! - upgrade: `userId`
//!
//! List operations carry no payload.

use till_records::ProductKind;

use crate::error::OpError;

/// The closed set of operations a worker can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    ListProducts,
    AddProduct,
    ListUsers,
    RegisterUser,
    Purchase,
    UpgradeVip,
}

impl OpKind {
    /// Whether this operation consumes a request payload.
    pub fn needs_request(self) -> bool {
        !matches!(self, OpKind::ListProducts | OpKind::ListUsers)
    }
}

/// A validated request, parsed from the payload the coordinator wrote.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    AddProduct {
        name: String,
        price: f64,
        kind: ProductKind,
    },
    RegisterUser {
        name: String,
        balance: f64,
    },
    Purchase {
        user_id: u32,
        product_id: u32,
    },
    UpgradeVip {
        user_id: u32,
    },
}

impl Request {
    /// Parse and validate one payload line for the given operation.
    ///
    /// Validation here is what makes a request well-formed: required fields
    /// present, names non-empty, money non-negative. Whether the referenced
    /// ids exist is the operation's business, not the parser's.
    pub fn parse(kind: OpKind, payload: &str) -> Result<Request, OpError> {
        let malformed = |reason: &str| OpError::MalformedRequest(reason.to_string());
        let parts: Vec<&str> = payload.trim().split('|').collect();

        match kind {
            OpKind::AddProduct => {
                if parts.len() < 3 {
                    return Err(malformed("expected type|name|price|extra"));
                }
                let name = parts[1].trim().to_string();
                if name.is_empty() {
                    return Err(malformed("empty name"));
                }
                let price: f64 = parts[2]
                    .trim()
                    .parse()
                    .map_err(|_| malformed("price is not a number"))?;
                if price < 0.0 {
                    return Err(malformed("negative price"));
                }
                // The extra field is blank for digital products.
                let extra: f64 = match parts.get(3).map(|raw| raw.trim()) {
                    Some(raw) if !raw.is_empty() => raw
                        .parse()
                        .map_err(|_| malformed("extra is not a number"))?,
                    _ => 0.0,
                };
                let kind = match parts[0].trim() {
                    "P" | "p" => {
                        if extra < 0.0 {
                            return Err(malformed("negative shipping"));
                        }
                        ProductKind::Physical { shipping: extra }
                    }
                    "D" | "d" => ProductKind::Digital,
                    _ => return Err(malformed("type must be P or D")),
                };
                Ok(Request::AddProduct { name, price, kind })
            }

            OpKind::RegisterUser => {
                if parts.len() < 2 {
                    return Err(malformed("expected name|balance"));
                }
                let name = parts[0].trim().to_string();
                if name.is_empty() {
                    return Err(malformed("empty name"));
                }
                let balance: f64 = parts[1]
                    .trim()
                    .parse()
                    .map_err(|_| malformed("balance is not a number"))?;
                if balance < 0.0 {
                    return Err(malformed("negative balance"));
                }
                Ok(Request::RegisterUser { name, balance })
            }

            OpKind::Purchase => {
                if parts.len() < 2 {
                    return Err(malformed("expected userId|productId"));
                }
                let user_id = parts[0]
                    .trim()
                    .parse()
                    .map_err(|_| malformed("user id is not a number"))?;
                let product_id = parts[1]
                    .trim()
                    .parse()
                    .map_err(|_| malformed("product id is not a number"))?;
                Ok(Request::Purchase {
                    user_id,
                    product_id,
                })
            }

            OpKind::UpgradeVip => {
                let user_id = payload
                    .trim()
                    .parse()
                    .map_err(|_| malformed("user id is not a number"))?;
                Ok(Request::UpgradeVip { user_id })
            }

            OpKind::ListProducts | OpKind::ListUsers => {
                Err(malformed("operation takes no request payload"))
            }
        }
    }
}
