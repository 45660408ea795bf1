//! Product records: physical (with a shipping surcharge) or digital.

use std::fmt;

use till_store::Record;

/// Closed set of product variants.
///
/// Adding a variant forces every `match` over products to be revisited at
/// compile time, which is the point of keeping this a sum type instead of a
/// trait-object hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind {
    /// Ships physically; `shipping` is added to the final price.
    Physical { shipping: f64 },
    /// Delivered digitally; no surcharge.
    Digital,
}

impl ProductKind {
    /// One-character tag used in the encoded line.
    fn tag(&self) -> char {
        match self {
            ProductKind::Physical { .. } => 'P',
            ProductKind::Digital => 'D',
        }
    }
}

/// One product record: `id|type|name|price|extra`.
///
/// `extra` carries the shipping surcharge for physical products and is
/// written as `0` (and ignored on decode) for digital ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub kind: ProductKind,
}

impl Product {
    pub fn physical(id: u32, name: impl Into<String>, price: f64, shipping: f64) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            kind: ProductKind::Physical { shipping },
        }
    }

    pub fn digital(id: u32, name: impl Into<String>, price: f64) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            kind: ProductKind::Digital,
        }
    }

    /// Price actually charged: base price plus shipping for physical goods.
    pub fn final_price(&self) -> f64 {
        match self.kind {
            ProductKind::Physical { shipping } => self.price + shipping,
            ProductKind::Digital => self.price,
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ProductKind::Physical { shipping } => write!(
                f,
                "{} - {} (Physical) : ${:.2} + ship ${:.2} = ${:.2}",
                self.id,
                self.name,
                self.price,
                shipping,
                self.final_price()
            ),
            ProductKind::Digital => write!(
                f,
                "{} - {} (Digital) : ${:.2}",
                self.id, self.name, self.price
            ),
        }
    }
}

impl Record for Product {
    const KIND: &'static str = "product";
    const HEADER: &'static str = "# id|type|name|price|extra";
    const SEPARATOR: char = '|';

    fn id(&self) -> u32 {
        self.id
    }

    fn encode_line(&self) -> String {
        let extra = match self.kind {
            ProductKind::Physical { shipping } => shipping,
            ProductKind::Digital => 0.0,
        };
        format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.id,
            self.kind.tag(),
            self.name,
            self.price,
            extra,
            sep = Self::SEPARATOR
        )
    }

    fn decode_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(Self::SEPARATOR).collect();
        if parts.len() < 5 {
            return None;
        }

        let id = parts[0].trim().parse().ok()?;
        let name = parts[2].to_string();
        let price = parts[3].trim().parse().ok()?;
        let extra: f64 = parts[4].trim().parse().ok()?;

        let kind = match parts[1].trim() {
            "P" => ProductKind::Physical { shipping: extra },
            "D" => ProductKind::Digital,
            _ => return None,
        };

        Some(Product {
            id,
            name,
            price,
            kind,
        })
    }
}
