use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use storefront_core::{CustomerId, DomainError, DomainResult, Entity};

/// Loyalty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Membership {
    #[default]
    #[serde(rename = "B")]
    Bronze,
    #[serde(rename = "S")]
    Silver,
    #[serde(rename = "G")]
    Gold,
}

impl Membership {
    /// Single-letter storage code.
    pub fn code(self) -> &'static str {
        match self {
            Membership::Bronze => "B",
            Membership::Silver => "S",
            Membership::Gold => "G",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Membership::Bronze => "Bronze",
            Membership::Silver => "Silver",
            Membership::Gold => "Gold",
        }
    }
}

impl core::fmt::Display for Membership {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for Membership {
    type Err = DomainError;

    /// Accepts either the code (`"G"`) or the label (`"gold"`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "b" | "bronze" => Ok(Membership::Bronze),
            "s" | "silver" => Ok(Membership::Silver),
            "g" | "gold" => Ok(Membership::Gold),
            other => Err(DomainError::validation(format!("unknown membership: {other:?}"))),
        }
    }
}

/// Input for [`Customer::register`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCustomer")]
pub struct Customer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
    membership: Membership,
}

impl Customer {
    pub fn register(id: CustomerId, new: NewCustomer) -> DomainResult<Self> {
        let first_name = required("first name", &new.first_name)?;
        let last_name = required("last name", &new.last_name)?;

        let email = new.email.trim().to_ascii_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(DomainError::validation(format!("invalid email: {:?}", new.email))),
        }

        Ok(Self {
            id,
            first_name,
            last_name,
            email,
            phone: new.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            birth_date: new.birth_date,
            membership: new.membership,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    pub fn set_membership(&mut self, membership: Membership) {
        self.membership = membership;
    }
}

#[derive(Deserialize)]
struct StoredCustomer {
    id: CustomerId,
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    birth_date: Option<NaiveDate>,
    membership: Membership,
}

impl TryFrom<StoredCustomer> for Customer {
    type Error = DomainError;

    fn try_from(stored: StoredCustomer) -> DomainResult<Self> {
        Customer::register(
            stored.id,
            NewCustomer {
                first_name: stored.first_name,
                last_name: stored.last_name,
                email: stored.email,
                phone: stored.phone,
                birth_date: stored.birth_date,
                membership: stored.membership,
            },
        )
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(email: &str) -> NewCustomer {
        NewCustomer {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: Some("  ".to_string()),
            birth_date: None,
            membership: Membership::default(),
        }
    }

    #[test]
    fn register_normalizes_fields() {
        let c = Customer::register(CustomerId::new(), new_customer("Ada@Example.com")).unwrap();
        assert_eq!(c.first_name(), "Ada");
        assert_eq!(c.email(), "ada@example.com");
        assert_eq!(c.phone(), None);
        assert_eq!(c.membership(), Membership::Bronze);
        assert_eq!(c.full_name(), "Ada Lovelace");
    }

    #[test]
    fn register_rejects_bad_email() {
        for bad in ["", "ada", "@example.com", "ada@"] {
            assert!(Customer::register(CustomerId::new(), new_customer(bad)).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn deserialization_rejects_bad_email() {
        let c = Customer::register(CustomerId::new(), new_customer("ada@example.com")).unwrap();
        let mut json = serde_json::to_value(&c).unwrap();
        assert_eq!(serde_json::from_value::<Customer>(json.clone()).unwrap(), c);

        json["email"] = serde_json::json!("not-an-email");
        assert!(serde_json::from_value::<Customer>(json).is_err());
    }

    #[test]
    fn membership_parses_codes_and_labels() {
        assert_eq!("G".parse::<Membership>().unwrap(), Membership::Gold);
        assert_eq!("silver".parse::<Membership>().unwrap(), Membership::Silver);
        assert!("platinum".parse::<Membership>().is_err());
        assert_eq!(Membership::Gold.code(), "G");
        assert_eq!(serde_json::to_string(&Membership::Silver).unwrap(), "\"S\"");
    }
}
