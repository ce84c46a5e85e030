//! A user's saved delivery address.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::place_id::unassigned;
use crate::error::PlaceError;

/// Saved delivery address belonging to a user.
///
/// At most one address per `user_id` should carry `is_default`. Storage does
/// not enforce this; [`Address::default_for`] reports a violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    /// Address identifier, omitted while unassigned.
    #[serde(rename = "_id", default, skip_serializing_if = "unassigned")]
    pub id: i64,
    /// Owning user. Not checked against any user table.
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Whether this is the user's default address.
    #[serde(rename = "default")]
    pub is_default: bool,
    /// Street name.
    pub street: String,
    /// House number, kept as text (`"12b"`).
    pub number: String,
    /// Postal code.
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Free-text delivery notes.
    pub description: String,
}

impl Address {
    /// Returns the default address of `user_id` among `addresses`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError::Validation`] if more than one address of the
    /// user is flagged as default.
    pub fn default_for(addresses: &[Self], user_id: i64) -> Result<Option<&Self>, PlaceError> {
        let mut defaults = addresses
            .iter()
            .filter(|a| a.user_id == user_id && a.is_default);
        let first = defaults.next();
        if defaults.next().is_some() {
            return Err(PlaceError::Validation(format!(
                "user {user_id} has more than one default address"
            )));
        }
        Ok(first)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn address(id: i64, user_id: i64, is_default: bool) -> Address {
        Address {
            id,
            user_id,
            is_default,
            street: "Main St".to_string(),
            number: "12".to_string(),
            city: "Springfield".to_string(),
            ..Address::default()
        }
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(address(3, 11, true)).unwrap_or_default();
        assert_eq!(json["_id"], 3);
        assert_eq!(json["userID"], 11);
        assert_eq!(json["default"], true);
        assert!(json.get("zipCode").is_some());
    }

    #[test]
    fn finds_the_single_default() {
        let list = vec![address(1, 7, false), address(2, 7, true), address(3, 8, true)];
        let Ok(found) = Address::default_for(&list, 7) else {
            panic!("expected a single default");
        };
        assert_eq!(found.map(|a| a.id), Some(2));
    }

    #[test]
    fn user_without_default_yields_none() {
        let list = vec![address(1, 7, false)];
        assert!(matches!(Address::default_for(&list, 7), Ok(None)));
    }

    #[test]
    fn two_defaults_for_one_user_is_rejected() {
        let list = vec![address(1, 7, true), address(2, 7, true)];
        assert!(matches!(
            Address::default_for(&list, 7),
            Err(PlaceError::Validation(_))
        ));
    }
}
