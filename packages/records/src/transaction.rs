//! Purchase transactions, appended once per successful purchase.
//!
//! Unlike the other kinds this one is comma-separated:
//! `id,userId,productId,qty,total`.

use std::fmt;

use till_store::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: u32,
    pub user_id: u32,
    pub product_id: u32,
    pub qty: u32,
    /// Amount actually paid, after any discount.
    pub total: f64,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} user {} bought product {} x{} for ${:.2}",
            self.id, self.user_id, self.product_id, self.qty, self.total
        )
    }
}

impl Record for Transaction {
    const KIND: &'static str = "transaction";
    const HEADER: &'static str = "# id,user_id,product_id,qty,total";
    const SEPARATOR: char = ',';

    fn id(&self) -> u32 {
        self.id
    }

    fn encode_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.id,
            self.user_id,
            self.product_id,
            self.qty,
            self.total,
            sep = Self::SEPARATOR
        )
    }

    fn decode_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(Self::SEPARATOR).collect();
        if parts.len() < 5 {
            return None;
        }

        Some(Transaction {
            id: parts[0].trim().parse().ok()?,
            user_id: parts[1].trim().parse().ok()?,
            product_id: parts[2].trim().parse().ok()?,
            qty: parts[3].trim().parse().ok()?,
            total: parts[4].trim().parse().ok()?,
        })
    }
}
