//! User records: identity, balance, VIP flag.

use std::fmt;

use till_store::Record;

/// One user record: `id|name|balance|is_vip`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub balance: f64,
    pub vip: bool,
}

impl User {
    /// A freshly registered user is never VIP.
    pub fn new(id: u32, name: impl Into<String>, balance: f64) -> Self {
        User {
            id,
            name: name.into(),
            balance,
            vip: false,
        }
    }

    /// Debit `amount` if the balance covers it.
    ///
    /// Returns `true` and debits on success; returns `false` and leaves the
    /// balance untouched otherwise. The epsilon absorbs accumulated float
    /// error from repeated debits. No concurrency control here - callers
    /// serialize through the resource's exclusive lock.
    pub fn charge(&mut self, amount: f64) -> bool {
        if self.balance + 1e-9 >= amount {
            self.balance -= amount;
            true
        } else {
            false
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} : ${:.2}", self.id, self.name, self.balance)?;
        if self.vip {
            write!(f, " (VIP)")?;
        }
        Ok(())
    }
}

impl Record for User {
    const KIND: &'static str = "user";
    const HEADER: &'static str = "# id|name|balance|is_vip";
    const SEPARATOR: char = '|';

    fn id(&self) -> u32 {
        self.id
    }

    fn encode_line(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}{sep}{}",
            self.id,
            self.name,
            self.balance,
            u8::from(self.vip),
            sep = Self::SEPARATOR
        )
    }

    fn decode_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(Self::SEPARATOR).collect();
        if parts.len() < 4 {
            return None;
        }

        Some(User {
            id: parts[0].trim().parse().ok()?,
            name: parts[1].to_string(),
            balance: parts[2].trim().parse().ok()?,
            vip: parts[3].trim().parse::<u8>().ok()? != 0,
        })
    }
}
