//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

/// Non-negative price of a listing.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] if the given `amount` is non-negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.
    //!
    //! A [`Price`] travels over the wire as a numeric string.

    use std::str::FromStr as _;

    use serde::{
        de::Error, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::Price;

    impl Serialize for Price {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Price {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            Self::from_str(&String::deserialize(deserializer)?)
                .map_err(Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Price;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Price::from_str("4500000").unwrap(),
            Price::new(decimal("4500000")).unwrap(),
        );
        assert_eq!(
            Price::from_str("123.45").unwrap(),
            Price::new(decimal("123.45")).unwrap(),
        );
        assert_eq!(
            Price::from_str("0").unwrap(),
            Price::new(decimal("0")).unwrap(),
        );

        assert_eq!(Price::from_str("-1"), Err("negative amount"));
        assert_eq!(Price::from_str("1,5"), Err("invalid amount"));
        assert_eq!(Price::from_str(""), Err("invalid amount"));
    }

    #[test]
    fn displays_normalized() {
        assert_eq!(Price::from_str("4500000.00").unwrap().to_string(), {
            "4500000"
        });
        assert_eq!(Price::from_str("123.450").unwrap().to_string(), "123.45");
    }
}
